//! Widget runtime for plaudit.
//!
//! The runtime ties the other crates together on a host page: it loads
//! variant modules, fetches widget data, renders into containers and keeps
//! each widget interactive.
//!
//! # Overview
//!
//! - [`bootstrap`]: [`WidgetRuntime`] and [`InitOutcome`]
//! - [`instance`]: [`WidgetInstance`], one per rendered widget
//! - [`loader`]: [`ModuleLoader`] with in-flight dedup, retry and fallback
//! - [`registry`]: where each layout's module script lives
//! - [`host`]: the [`HostPage`] and [`ScriptHost`] seams and [`StaticPage`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use plaudit_config::RuntimeConfig;
//! use plaudit_fetch::{StaticTransport, WidgetDataClient};
//! use plaudit_protocol::dummy::sample_payload;
//! use plaudit_runtime::{InitOutcome, StaticPage, WidgetRuntime, registry_for};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let config = RuntimeConfig::default();
//! let page = StaticPage::new(1280.0);
//! let registry = registry_for(&config, &page);
//! let page = Arc::new(page.with_modules(registry));
//! let client = WidgetDataClient::new(Arc::new(StaticTransport::new(sample_payload())), &config);
//! let runtime = WidgetRuntime::new(page.clone(), page.clone(), client, &config);
//!
//! let outcome = runtime.init("w_123").await;
//! assert!(matches!(outcome, InitOutcome::Rendered(_)));
//! assert_eq!(page.container_ids().len(), 1);
//! # });
//! ```

pub mod bootstrap;
pub mod error;
pub mod host;
pub mod instance;
pub mod loader;
pub mod registry;

pub use bootstrap::{InitOutcome, LOAD_FAILED_MESSAGE, WidgetRuntime, registry_for};
pub use error::{InitError, LoadError, Result, RuntimeError};
pub use host::{HostPage, ScriptHost, StaticPage};
pub use instance::WidgetInstance;
pub use loader::{LoadedVariant, ModuleLoader, VariantApi};
pub use registry::{ModuleRegistry, ModuleSpec};
