//! Terminal preview for plaudit widgets.
//!
//! Renders a widget's reviews as a carousel with Ratatui, driven by the
//! same [`CarouselEngine`](plaudit_carousel::CarouselEngine) a browser host
//! uses: one terminal column stands for ten pixels, the mouse drags the
//! track and autoplay ticks from the run loop.
//!
//! - [`app`]: [`App`] and its run loop
//! - [`state`]: [`PreviewState`]
//! - [`event`]: key and mouse mappings
//! - [`layout`]: pixel/column conversion and fixed heights
//! - [`terminal`]: setup, teardown and the panic hook
//! - [`widgets`]: rendering functions
//!
//! # Example
//!
//! ```no_run
//! use std::time::Instant;
//! use chrono::Utc;
//! use plaudit_config::WidgetConfig;
//! use plaudit_protocol::dummy::sample_payload;
//! use plaudit_tui::{App, PreviewState, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::TerminalGuard::new()?;
//!
//!     let width = terminal.size()?.width;
//!     let state = PreviewState::new(&sample_payload(), WidgetConfig::new("w"), width, Instant::now(), Utc::now());
//!     let result = App::new(state).run(&mut terminal).await;
//!
//!     terminal.restore()?;
//!     result
//! }
//! ```

pub mod app;
pub mod event;
pub mod layout;
pub mod state;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

pub use app::App;
pub use event::Message;
pub use state::PreviewState;
