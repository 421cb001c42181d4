//! Widget data fetcher for plaudit.
//!
//! This crate fetches review pages from the widget-data endpoint:
//!
//! ```text
//! GET {api_domain}/api/public/widget-data/{widgetId}?limit=&offset=&layout=
//! ```
//!
//! Every request runs under a hard timeout and is retried with exponential
//! backoff. Pages can be served from an in-memory cache keyed by
//! `(widget id, offset, limit)`.
//!
//! # Modules
//!
//! - [`retry`]: the transport-independent [`RetryPolicy`]
//! - [`transport`]: the [`Transport`] seam with HTTP, static and scripted
//!   implementations
//! - [`cache`]: the append-only [`PageCache`]
//! - [`client`]: [`WidgetDataClient`], tying the pieces together
//! - [`error`]: [`FetchError`]
//!
//! # Examples
//!
//! ```no_run
//! use plaudit_config::RuntimeConfig;
//! use plaudit_fetch::WidgetDataClient;
//! use plaudit_protocol::Layout;
//!
//! # async fn example() -> plaudit_fetch::Result<()> {
//! let client = WidgetDataClient::http(&RuntimeConfig::default())?;
//! let page = client.fetch_page("w_123", Layout::Carousel, 0, 20).await?;
//! println!("{} reviews", page.reviews.len());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod error;
pub mod retry;
pub mod transport;

pub use cache::{PageCache, PageKey};
pub use client::WidgetDataClient;
pub use error::{FetchError, Result};
pub use retry::RetryPolicy;
pub use transport::{HttpResponse, HttpTransport, StaticTransport, Transport};
#[cfg(any(test, feature = "test-util"))]
pub use transport::{ScriptStep, ScriptedTransport};
