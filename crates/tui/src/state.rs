//! Preview state.
//!
//! [`PreviewState`] is everything the preview shows: the displayable
//! reviews, the carousel engine that positions them, the detail modal and
//! the help overlay.

use std::time::Instant;

use chrono::{DateTime, Utc};
use plaudit_carousel::{CarouselEngine, CarouselEvent, CarouselView};
use plaudit_config::WidgetConfig;
use plaudit_protocol::{AggregateRating, ReviewRecord, SourceHints, WidgetPayload, aggregate_rating};
use plaudit_render::ModalManager;
use tracing::debug;

use crate::layout::columns_to_px;

/// The state of the terminal preview.
#[derive(Debug, Clone)]
pub struct PreviewState {
    /// Widget options (layout is always rendered as a carousel).
    pub config: WidgetConfig,
    /// Business name for the header.
    pub business_name: Option<String>,
    /// Reviews with text, in server order.
    pub reviews: Vec<ReviewRecord>,
    /// Source-detection hints.
    pub hints: SourceHints,
    /// Aggregate rating for the header.
    pub aggregate: AggregateRating,
    /// Server-reported review count.
    pub total_review_count: usize,
    /// The carousel engine.
    pub engine: CarouselEngine,
    /// The detail modal.
    pub modal: ModalManager,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// Reference time for relative dates.
    pub now: DateTime<Utc>,
    hovered: bool,
}

impl PreviewState {
    /// Creates the preview of `payload` on a terminal `columns` wide.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Instant;
    /// use chrono::Utc;
    /// use plaudit_config::WidgetConfig;
    /// use plaudit_protocol::dummy::sample_payload;
    /// use plaudit_tui::PreviewState;
    ///
    /// // 128 columns is a 1280px viewport.
    /// let state = PreviewState::new(&sample_payload(), WidgetConfig::new("w"), 128, Instant::now(), Utc::now());
    /// assert_eq!(state.reviews.len(), 9);
    /// assert_eq!(state.visible_slides(), 4);
    /// ```
    #[must_use]
    pub fn new(
        payload: &WidgetPayload,
        config: WidgetConfig,
        columns: u16,
        now: Instant,
        wall_clock: DateTime<Utc>,
    ) -> Self {
        let reviews: Vec<ReviewRecord> =
            payload.displayable_reviews().into_iter().cloned().collect();
        let width = columns_to_px(columns);
        let engine = CarouselEngine::new(reviews.len(), &config, width, width, now);
        Self {
            aggregate: aggregate_rating(&reviews, payload.primary_source()),
            total_review_count: payload.total_or_loaded(),
            business_name: payload.business_name.clone(),
            hints: payload.source_hints(),
            reviews,
            config,
            engine,
            modal: ModalManager::default(),
            help_visible: false,
            now: wall_clock,
            hovered: false,
        }
    }

    /// The current carousel view.
    #[must_use]
    pub fn view(&self) -> CarouselView {
        self.engine.view()
    }

    /// Slides shown side by side.
    #[must_use]
    pub const fn visible_slides(&self) -> usize {
        self.engine.state().visible_slides
    }

    /// Feeds an event to the carousel.
    pub fn handle(&mut self, event: CarouselEvent, now: Instant) -> CarouselView {
        self.engine.handle(event, now)
    }

    /// Recomputes the layout for a new terminal width.
    pub fn resize(&mut self, columns: u16, now: Instant) -> CarouselView {
        let width = columns_to_px(columns);
        self.engine.resize(width, width, now)
    }

    /// Tracks whether the pointer is over the carousel, pausing autoplay
    /// while it is.
    pub fn set_hovered(&mut self, hovered: bool, now: Instant) {
        if hovered == self.hovered {
            return;
        }
        self.hovered = hovered;
        if hovered {
            self.engine.pointer_enter();
        } else {
            self.engine.pointer_leave(now);
        }
    }

    /// The review in the first visible position.
    #[must_use]
    pub fn first_visible_review(&self) -> Option<&ReviewRecord> {
        self.reviews.get(self.view().index)
    }

    /// Opens the modal for the first visible review.
    ///
    /// Returns `false` when there is nothing to open.
    pub fn open_first_visible(&mut self) -> bool {
        let Some(review) = self.first_visible_review().cloned() else {
            return false;
        };
        debug!(author = %review.author, "opening review");
        self.modal.open(review);
        true
    }

    /// Closes the help overlay, else the modal. Returns `true` if something
    /// closed.
    pub fn escape(&mut self) -> bool {
        if self.help_visible {
            self.help_visible = false;
            return true;
        }
        self.modal.handle_key(plaudit_render::modal::ESCAPE_KEY)
    }

    /// Shows or hides the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }
}
