//! Widget bootstrap.
//!
//! [`WidgetRuntime::init`] takes a widget from configuration to a mounted
//! [`WidgetInstance`]: validate, find or create the container, load the
//! variant module, fetch the first page and render.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use plaudit_config::origin::{resolve_asset_origin, synthesize_container_id};
use plaudit_config::{ConfigError, InitArg, RuntimeConfig, WidgetConfig};
use plaudit_fetch::WidgetDataClient;
use plaudit_protocol::WidgetPayload;
use plaudit_render::{
    Element, ModalManager, RenderContext, Rendered, WidgetRuntimeState, render_error,
    render_widget,
};
use tracing::{debug, info, instrument, warn};

use crate::error::InitError;
use crate::host::{HostPage, ScriptHost};
use crate::instance::WidgetInstance;
use crate::loader::ModuleLoader;
use crate::registry::ModuleRegistry;

/// Message shown in the inline error block.
pub const LOAD_FAILED_MESSAGE: &str = "We couldn't load these reviews right now.";

/// How an [`init`](WidgetRuntime::init) call ended.
#[derive(Debug)]
pub enum InitOutcome {
    /// Reviews were rendered and the widget is interactive.
    Rendered(WidgetInstance),

    /// The widget has no displayable review; the empty state was rendered.
    Empty {
        /// The container the empty state went into.
        container_id: String,
    },

    /// Loading or fetching failed; the inline error block was rendered.
    ///
    /// `config` carries the resolved container id, so passing it to
    /// [`WidgetRuntime::retry`] re-renders into the same container.
    Failed {
        /// The configuration to retry with.
        config: Box<WidgetConfig>,
        /// Why it failed.
        error: InitError,
    },

    /// The configuration was unusable; nothing was rendered.
    Aborted(ConfigError),
}

impl InitOutcome {
    /// The container the widget rendered into, if any.
    #[must_use]
    pub fn container_id(&self) -> Option<&str> {
        match self {
            Self::Rendered(instance) => Some(instance.container_id()),
            Self::Empty { container_id } => Some(container_id),
            Self::Failed { config, .. } => config.container_id.as_deref(),
            Self::Aborted(_) => None,
        }
    }

    /// Returns the instance of a rendered widget.
    #[must_use]
    pub fn into_instance(self) -> Option<WidgetInstance> {
        match self {
            Self::Rendered(instance) => Some(instance),
            _ => None,
        }
    }
}

/// The page-level widget runtime.
///
/// One runtime serves every widget on a page. It owns the module loader
/// (so concurrent widgets share module loads), the data client and its
/// page cache, and the single detail modal.
pub struct WidgetRuntime {
    page: Arc<dyn HostPage>,
    loader: ModuleLoader,
    client: Arc<WidgetDataClient>,
    modal: Arc<Mutex<ModalManager>>,
    ordinal: AtomicUsize,
}

impl std::fmt::Debug for WidgetRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetRuntime")
            .field("loader", &self.loader)
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl WidgetRuntime {
    /// Creates a runtime over a host page.
    #[must_use]
    pub fn new(
        page: Arc<dyn HostPage>,
        scripts: Arc<dyn ScriptHost>,
        client: WidgetDataClient,
        config: &RuntimeConfig,
    ) -> Self {
        let loader = ModuleLoader::new(
            scripts,
            registry_for(config, page.as_ref()),
            config.loader,
            config.default_layout,
        );
        Self {
            page,
            loader,
            client: Arc::new(client),
            modal: Arc::new(Mutex::new(ModalManager::default())),
            ordinal: AtomicUsize::new(0),
        }
    }

    /// The module loader.
    #[must_use]
    pub const fn loader(&self) -> &ModuleLoader {
        &self.loader
    }

    /// The widget-data client.
    #[must_use]
    pub fn client(&self) -> &WidgetDataClient {
        &self.client
    }

    /// Initializes one widget from a widget id or configuration.
    pub async fn init(&self, arg: impl Into<InitArg>) -> InitOutcome {
        self.init_config(arg.into().into_config()).await
    }

    /// Initializes one widget from embed-tag attributes.
    pub async fn init_from_attributes<'a, I>(&self, attributes: I) -> InitOutcome
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        match WidgetConfig::from_attributes(attributes) {
            Ok(config) => self.init_config(config).await,
            Err(err) => abort(err),
        }
    }

    /// Re-runs initialization after a failure, as the retry button does.
    pub async fn retry(&self, config: WidgetConfig) -> InitOutcome {
        info!(widget_id = %config.widget_id, "retrying widget");
        self.init_config(config).await
    }

    #[instrument(skip_all, fields(widget_id = %config.widget_id, layout = %config.layout))]
    async fn init_config(&self, mut config: WidgetConfig) -> InitOutcome {
        if let Err(err) = config.validate() {
            return abort(err);
        }

        let container_id = match config.container_id.clone() {
            Some(id) if self.page.has_container(&id) => id,
            Some(id) => return abort(ConfigError::ContainerNotFound(id)),
            None => {
                let ordinal = self.ordinal.fetch_add(1, Ordering::Relaxed);
                let id = synthesize_container_id(&config.widget_id, ordinal);
                debug!(container = %id, "creating container after loader script");
                self.page.insert_container_after_script(&id);
                id
            }
        };
        config.container_id = Some(container_id.clone());

        let loaded = match self.loader.load_with_fallback(config.layout).await {
            Ok(loaded) => loaded,
            Err(err) => return self.fail(config, err.into()),
        };
        config.layout = loaded.api.layout;

        let limit = config.layout.page_size().initial;
        let payload = match self
            .client
            .fetch_page(&config.widget_id, config.layout, 0, limit)
            .await
        {
            Ok(payload) => payload,
            Err(err) => return self.fail(config, err.into()),
        };

        let state = WidgetRuntimeState::new(config.widget_id.clone(), config.layout, &payload);
        let ctx = RenderContext::new(config, container_id.clone(), &payload, Utc::now())
            .with_viewport_width(self.page.viewport_width());
        let mut markup = Element::new("div").id(container_id.as_str());

        match render_widget(&mut markup, &payload, &state, &ctx) {
            Rendered::Empty => {
                self.page.update_container(&container_id, &markup);
                InitOutcome::Empty { container_id }
            }
            Rendered::Reviews { layout, count } => {
                info!(%layout, count, container = %container_id, "widget rendered");
                InitOutcome::Rendered(WidgetInstance::mount(
                    Arc::clone(&self.page),
                    Arc::clone(&self.client),
                    Arc::clone(&self.modal),
                    ctx,
                    state,
                    markup,
                ))
            }
        }
    }

    fn fail(&self, config: WidgetConfig, error: InitError) -> InitOutcome {
        warn!(error = %error, "widget failed to initialize");
        let container_id = config.container_id.clone().unwrap_or_default();
        let ctx = RenderContext::new(
            config.clone(),
            container_id.clone(),
            &WidgetPayload::default(),
            Utc::now(),
        );
        let mut markup = Element::new("div").id(container_id.as_str());
        render_error(&mut markup, &ctx, LOAD_FAILED_MESSAGE);
        self.page.update_container(&container_id, &markup);
        InitOutcome::Failed {
            config: Box::new(config),
            error,
        }
    }
}

/// The module registry for a runtime configuration.
///
/// Uses the configured asset origin. Without one, the origin is discovered
/// from the page's scripts, falling back to the production origin.
#[must_use]
pub fn registry_for(config: &RuntimeConfig, page: &dyn HostPage) -> ModuleRegistry {
    let origin = config.asset_origin.clone().unwrap_or_else(|| {
        let current = page.current_script_src();
        let srcs = page.script_srcs();
        let srcs: Vec<&str> = srcs.iter().map(String::as_str).collect();
        resolve_asset_origin(current.as_deref(), &srcs)
    });
    ModuleRegistry::new(origin)
}

fn abort(err: ConfigError) -> InitOutcome {
    warn!(error = %err, "widget initialization aborted");
    InitOutcome::Aborted(err)
}
