//! The derived view of a carousel state.

use std::ops::Range;

use crate::dots::{DOT_COUNT, Dot, dots_for};
use crate::height::visible_range;
use crate::state::CarouselState;

/// Everything a host needs to draw the carousel after a transition.
///
/// The view is recomputed from [`CarouselState`] after every event; it is
/// never stored separately.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView {
    /// Index of the first visible slide.
    pub index: usize,
    /// Horizontal translation of the track.
    pub translate_px: f32,
    /// Whether the track should animate to `translate_px`. Off while the
    /// track follows a drag.
    pub animate: bool,
    /// Slides currently on screen.
    pub visible: Range<usize>,
    /// The three indicator dots.
    pub dots: [Dot; DOT_COUNT],
    /// Whether the "previous" arrow is enabled.
    pub can_prev: bool,
    /// Whether the "next" arrow is enabled.
    pub can_next: bool,
}

impl From<&CarouselState> for CarouselView {
    fn from(state: &CarouselState) -> Self {
        Self {
            index: state.current_index,
            translate_px: state.current_translate_px,
            animate: !state.is_dragging,
            visible: visible_range(state.current_index, state.visible_slides, state.slide_count),
            dots: dots_for(state),
            can_prev: state.can_go_prev(),
            can_next: state.can_go_next(),
        }
    }
}

impl CarouselView {
    /// Returns the CSS `transform` value for the track.
    ///
    /// ```
    /// use plaudit_carousel::{CarouselEvent, CarouselState, CarouselView};
    ///
    /// let state = CarouselState::new(5, 1, 320.0, true).apply(CarouselEvent::Next);
    /// assert_eq!(CarouselView::from(&state).transform(), "translateX(-320px)");
    /// ```
    #[must_use]
    pub fn transform(&self) -> String {
        format!("translateX({}px)", self.translate_px)
    }
}
