//! Lazy, de-duplicated loading of variant modules.
//!
//! Each layout ships as its own module script. [`ModuleLoader`] injects a
//! layout's script at most once per load: concurrent requests share the
//! same in-flight future, and a module whose export already exists is not
//! loaded again. Failed loads are retried with backoff and then fall back
//! to the default layout.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use plaudit_config::LoaderSettings;
use plaudit_fetch::RetryPolicy;
use plaudit_protocol::Layout;
use tracing::{debug, instrument, warn};

use crate::error::LoadError;
use crate::host::ScriptHost;
use crate::registry::ModuleRegistry;

/// A loaded variant module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantApi {
    /// Layout the module renders.
    pub layout: Layout,
    /// Export the module registered.
    pub export_name: &'static str,
}

/// Result of [`ModuleLoader::load_with_fallback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedVariant {
    /// The module that will render the widget.
    pub api: VariantApi,
    /// Whether the requested layout failed and the default was used.
    pub fell_back: bool,
}

type SharedLoad = Shared<BoxFuture<'static, Result<VariantApi, LoadError>>>;

/// Loads variant modules through a [`ScriptHost`].
pub struct ModuleLoader {
    scripts: Arc<dyn ScriptHost>,
    registry: ModuleRegistry,
    settings: LoaderSettings,
    default_layout: Layout,
    in_flight: Mutex<HashMap<Layout, (u64, SharedLoad)>>,
    generation: AtomicU64,
}

impl std::fmt::Debug for ModuleLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleLoader")
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .field("default_layout", &self.default_layout)
            .finish_non_exhaustive()
    }
}

impl ModuleLoader {
    /// Creates a loader.
    #[must_use]
    pub fn new(
        scripts: Arc<dyn ScriptHost>,
        registry: ModuleRegistry,
        settings: LoaderSettings,
        default_layout: Layout,
    ) -> Self {
        Self {
            scripts,
            registry,
            settings,
            default_layout,
            in_flight: Mutex::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// The module registry.
    #[must_use]
    pub const fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Loads the module for `layout`.
    ///
    /// Resolves immediately if the module's export already exists. While a
    /// load is in flight, further calls await that same load instead of
    /// injecting another script.
    ///
    /// # Errors
    ///
    /// Returns the last [`LoadError`] once every attempt failed.
    #[instrument(skip(self))]
    pub async fn load_variant_module(&self, layout: Layout) -> Result<VariantApi, LoadError> {
        let spec = self
            .registry
            .spec(layout)
            .ok_or(LoadError::Unregistered(layout))?;
        let api = VariantApi {
            layout,
            export_name: spec.export_name,
        };
        if self.scripts.has_export(spec.export_name) {
            return Ok(api);
        }

        let (generation, load) = {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            match in_flight.get(&layout) {
                Some((generation, load)) => {
                    debug!("joining in-flight load");
                    (*generation, load.clone())
                }
                None => {
                    let generation = self.generation.fetch_add(1, Ordering::Relaxed);
                    let load = load_with_retry(
                        Arc::clone(&self.scripts),
                        self.registry.script_url(layout),
                        api,
                        self.settings,
                    )
                    .boxed()
                    .shared();
                    in_flight.insert(layout, (generation, load.clone()));
                    (generation, load)
                }
            }
        };

        let result = load.await;

        // Finished loads leave the map: a success is found through its
        // export next time and a failure may be attempted again.
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if in_flight
            .get(&layout)
            .is_some_and(|(current, _)| *current == generation)
        {
            in_flight.remove(&layout);
        }
        result
    }

    /// Loads `layout`, falling back to the default layout if it fails.
    ///
    /// # Errors
    ///
    /// Returns the error of the default layout if it fails too (or if it
    /// was the one requested).
    pub async fn load_with_fallback(&self, layout: Layout) -> Result<LoadedVariant, LoadError> {
        match self.load_variant_module(layout).await {
            Ok(api) => Ok(LoadedVariant {
                api,
                fell_back: false,
            }),
            Err(err) if layout != self.default_layout => {
                warn!(%layout, fallback = %self.default_layout, error = %err, "variant failed to load, falling back");
                let api = self.load_variant_module(self.default_layout).await?;
                Ok(LoadedVariant {
                    api,
                    fell_back: true,
                })
            }
            Err(err) => Err(err),
        }
    }
}

async fn load_with_retry(
    scripts: Arc<dyn ScriptHost>,
    url: String,
    api: VariantApi,
    settings: LoaderSettings,
) -> Result<VariantApi, LoadError> {
    let scripts = &*scripts;
    let url = url.as_str();
    RetryPolicy::from(&settings)
        .run(|attempt| load_once(scripts, url, api, settings, attempt))
        .await
}

async fn load_once(
    scripts: &dyn ScriptHost,
    url: &str,
    api: VariantApi,
    settings: LoaderSettings,
    attempt: u32,
) -> Result<VariantApi, LoadError> {
    debug!(url, attempt, "injecting module script");
    let timeout = settings.load_timeout();
    match tokio::time::timeout(timeout, scripts.inject_script(url)).await {
        Err(_) => {
            return Err(LoadError::Timeout {
                url: url.to_string(),
                timeout,
            });
        }
        Ok(Err(message)) => {
            return Err(LoadError::Injection {
                url: url.to_string(),
                message,
            });
        }
        Ok(Ok(())) => {}
    }

    // Modules register their export right after evaluation.
    tokio::time::sleep(settings.grace()).await;
    if scripts.has_export(api.export_name) {
        Ok(api)
    } else {
        Err(LoadError::MissingExport {
            url: url.to_string(),
            export: api.export_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StaticPage;

    fn loader(page: Arc<StaticPage>) -> ModuleLoader {
        ModuleLoader::new(
            page,
            ModuleRegistry::new("https://w.example"),
            LoaderSettings::default(),
            Layout::Carousel,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn existing_export_skips_injection() {
        let page = Arc::new(StaticPage::new(1024.0));
        page.register_export("PlauditGridWidget");
        let api = loader(page.clone()).load_variant_module(Layout::Grid).await.unwrap();
        assert_eq!(api.layout, Layout::Grid);
        assert!(page.injected_scripts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn self_registering_module_loads_once() {
        let page = Arc::new(
            StaticPage::new(1024.0).with_modules(ModuleRegistry::new("https://w.example")),
        );
        let loader = loader(page.clone());
        loader.load_variant_module(Layout::Badge).await.unwrap();
        loader.load_variant_module(Layout::Badge).await.unwrap();
        assert_eq!(
            page.injected_scripts(),
            vec!["https://w.example/widgets/badge.js".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn missing_export_falls_back() {
        // The page never registers exports on its own.
        let page = Arc::new(StaticPage::new(1024.0));
        page.register_export("PlauditCarouselWidget");
        let loaded = loader(page.clone()).load_with_fallback(Layout::Masonry).await.unwrap();
        assert!(loaded.fell_back);
        assert_eq!(loaded.api.layout, Layout::Carousel);
        assert_eq!(page.injected_scripts().len(), 3);
    }
}
