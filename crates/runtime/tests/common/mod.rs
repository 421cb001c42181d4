//! Fake hosts shared by the runtime tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use plaudit_config::RuntimeConfig;
use plaudit_fetch::{StaticTransport, WidgetDataClient};
use plaudit_protocol::WidgetPayload;
use plaudit_runtime::{ModuleRegistry, ScriptHost, StaticPage, WidgetRuntime, registry_for};

/// How the fake host treats an injected script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptBehavior {
    /// Fires `load` and registers the module's export.
    Register,
    /// Fires `load` without registering anything.
    LoadOnly,
    /// Fires `error`.
    Error,
    /// Never fires anything.
    Hang,
}

/// A script host with load latency and per-layout behavior.
pub struct FakeScripts {
    registry: ModuleRegistry,
    latency: Duration,
    overrides: Vec<(String, ScriptBehavior)>,
    exports: Mutex<HashSet<String>>,
    injections: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl FakeScripts {
    pub fn new(latency: Duration) -> Self {
        Self {
            registry: registry_for(&RuntimeConfig::default(), &StaticPage::new(1280.0)),
            latency,
            overrides: Vec::new(),
            exports: Mutex::new(HashSet::new()),
            injections: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    /// Scripts whose URL ends with `suffix` behave like `behavior`
    /// instead of registering.
    pub fn with_script(mut self, suffix: &str, behavior: ScriptBehavior) -> Self {
        self.overrides.push((suffix.to_string(), behavior));
        self
    }

    /// Registers an export as if its module were already on the page.
    pub fn register_export(&self, export: &str) {
        self.exports.lock().unwrap().insert(export.to_string());
    }

    pub fn injections(&self) -> usize {
        self.injections.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    fn behavior_for(&self, url: &str) -> ScriptBehavior {
        self.overrides
            .iter()
            .find(|(suffix, _)| url.ends_with(suffix.as_str()))
            .map_or(ScriptBehavior::Register, |(_, behavior)| *behavior)
    }
}

impl ScriptHost for FakeScripts {
    fn inject_script<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<(), String>> {
        self.injections.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());
        let behavior = self.behavior_for(url);
        async move {
            if behavior == ScriptBehavior::Hang {
                futures::future::pending::<()>().await;
            }
            tokio::time::sleep(self.latency).await;
            match behavior {
                ScriptBehavior::Register => {
                    if let Some(spec) = self
                        .registry
                        .layout_for_url(url)
                        .and_then(|layout| self.registry.spec(layout))
                    {
                        self.exports.lock().unwrap().insert(spec.export_name.to_string());
                    }
                    Ok(())
                }
                ScriptBehavior::LoadOnly => Ok(()),
                ScriptBehavior::Error | ScriptBehavior::Hang => Err("script error".to_string()),
            }
        }
        .boxed()
    }

    fn has_export(&self, export: &str) -> bool {
        self.exports.lock().unwrap().contains(export)
    }
}

/// A runtime over a static page, fake scripts and a canned payload.
pub fn runtime_with(
    payload: WidgetPayload,
    scripts: Arc<FakeScripts>,
) -> (WidgetRuntime, Arc<StaticPage>, Arc<StaticTransport>) {
    let config = RuntimeConfig::default();
    let page = Arc::new(StaticPage::new(1280.0));
    let transport = Arc::new(StaticTransport::new(payload));
    let client = WidgetDataClient::new(transport.clone(), &config);
    let runtime = WidgetRuntime::new(page.clone(), scripts, client, &config);
    (runtime, page, transport)
}
