//! Carousel interaction engine for plaudit.
//!
//! The carousel is a pure state machine plus a derived view:
//!
//! ```text
//! event ──▶ CarouselState::apply ──▶ CarouselState ──▶ CarouselView ──▶ host
//! ```
//!
//! [`CarouselEngine`] wraps the state machine with autoplay scheduling and
//! height synchronization. Nothing here touches a screen or a clock; hosts
//! pass measured widths and the current [`Instant`](std::time::Instant).
//!
//! # Modules
//!
//! - [`visible`]: responsive slide count from viewport breakpoints
//! - [`state`]: [`CarouselState`] and [`CarouselEvent`]
//! - [`drag`]: dead zone, commit threshold and edge resistance
//! - [`dots`]: the three-dot indicator
//! - [`height`]: visible range and [`HeightSync`]
//! - [`autoplay`]: [`AutoplayController`]
//! - [`view`]: [`CarouselView`]
//! - [`engine`]: [`CarouselEngine`]

pub mod autoplay;
pub mod dots;
pub mod drag;
pub mod engine;
pub mod height;
pub mod state;
pub mod view;
pub mod visible;

pub use autoplay::{AutoplayController, DEFAULT_RESUME_GRACE};
pub use dots::{DOT_COUNT, Dot, DotSlot, dots_for};
pub use drag::{DRAG_COMMIT_PX, DRAG_DEAD_ZONE_PX, EDGE_RESISTANCE, ReleaseOutcome};
pub use engine::CarouselEngine;
pub use height::{HeightSync, visible_range};
pub use state::{CarouselEvent, CarouselState};
pub use view::CarouselView;
pub use visible::visible_slides;
