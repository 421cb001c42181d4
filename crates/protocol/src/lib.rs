//! Shared protocol types for the plaudit widget runtime.
//!
//! This crate defines the data consumed by every other plaudit component:
//! the review records served by the widget-data endpoint, the payload that
//! wraps them, the layout variants a widget can be rendered with, and the
//! small pieces of presentation logic (source detection, aggregate rating,
//! truncation) that every variant shares.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`review`]: `ReviewRecord`, review sources and source detection
//! - [`payload`]: The `WidgetPayload` returned by the widget-data endpoint
//! - [`layout`]: Layout variants and their per-variant display conventions
//! - [`rating`]: Aggregate rating computation and star fills
//! - [`text`]: Truncation, relative dates and author initials
//! - [`dummy`]: A realistic sample payload for previews and tests
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! Decoding a payload and computing its aggregate rating:
//!
//! ```
//! use plaudit_protocol::{WidgetPayload, aggregate_rating, AggregateRating};
//!
//! let json = r#"{
//!     "reviews": [
//!         { "author": "Ada", "rating": 5, "content": "Superb service" },
//!         { "author": "Bob", "rating": 4, "text": "Quick and friendly" },
//!         { "author": "Eve", "rating": 1, "content": "" }
//!     ],
//!     "widgetSettings": {}
//! }"#;
//!
//! let payload = WidgetPayload::from_json(json)?;
//! let reviews = payload.displayable_reviews();
//! assert_eq!(reviews.len(), 2);
//!
//! let aggregate = aggregate_rating(reviews.iter().copied(), payload.primary_source());
//! assert_eq!(aggregate, AggregateRating::Stars { average: 4.5, count: 2 });
//! # Ok::<(), plaudit_protocol::ProtocolError>(())
//! ```

pub mod dummy;
pub mod error;
pub mod layout;
pub mod payload;
pub mod rating;
pub mod review;
pub mod text;

// Re-export primary types at crate root for convenience
pub use error::{ProtocolError, Result};
pub use layout::{Layout, PageSize};
pub use payload::WidgetPayload;
pub use rating::{AggregateRating, StarFill, aggregate_rating, star_fills};
pub use review::{PostedAt, RecommendationStatus, ReviewRecord, Source, SourceHints};
pub use text::{Truncated, initials, relative_time, truncate};
