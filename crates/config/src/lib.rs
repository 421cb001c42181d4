//! Configuration for the plaudit widget runtime.
//!
//! This crate turns the ways a host page configures a widget into typed,
//! validated values, and loads the page-wide runtime settings from files and
//! the environment.
//!
//! # Overview
//!
//! - [`widget`]: per-embed [`WidgetConfig`] from script attributes or `init()`
//! - [`breakpoints`]: viewport breakpoints and card count overrides
//! - [`runtime`]: page-wide [`RuntimeConfig`] (API domain, retries, timeouts)
//! - [`origin`]: asset origin discovery and container id synthesis
//! - [`persistence`]: config file reading and writing
//! - [`error`]: error types for configuration operations
//!
//! # Embedding
//!
//! ```html
//! <div id="reviews"></div>
//! <script src="https://widgets.plaudit.app/plaudit-widget.js"
//!         data-widget-id="w_123"
//!         data-container-id="reviews"
//!         data-layout="carousel"
//!         data-cards-desktop="3"
//!         data-autoplay-delay="7000"></script>
//! ```
//!
//! # Examples
//!
//! ```
//! use plaudit_config::{RuntimeConfig, WidgetConfig};
//!
//! let widget = WidgetConfig::from_attributes([
//!     ("data-widget-id", "w_123"),
//!     ("data-container-id", "reviews"),
//! ])?;
//! widget.validate()?;
//!
//! let runtime = RuntimeConfig::default();
//! assert_eq!(
//!     runtime.widget_data_url(&widget.widget_id),
//!     "https://api.plaudit.app/api/public/widget-data/w_123",
//! );
//! # Ok::<(), plaudit_config::ConfigError>(())
//! ```

pub mod breakpoints;
pub mod error;
pub mod origin;
pub mod persistence;
pub mod runtime;
pub mod widget;

pub use breakpoints::{Breakpoint, CardsPerBreakpoint};
pub use error::{ConfigError, Result};
pub use runtime::{FetchSettings, LoaderSettings, RuntimeConfig};
pub use widget::{InitArg, WidgetConfig};
