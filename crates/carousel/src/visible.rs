//! Responsive visible-slide count.

use plaudit_config::{Breakpoint, CardsPerBreakpoint};

/// Returns how many slides to show side by side.
///
/// The breakpoint for `viewport_width` gives a default that `cards` may
/// override. The result is clamped to `[1, total_slides]` so the carousel
/// never asks for more slides than exist (and always shows at least one).
///
/// # Examples
///
/// ```
/// use plaudit_carousel::visible_slides;
/// use plaudit_config::CardsPerBreakpoint;
///
/// let cards = CardsPerBreakpoint::default();
/// assert_eq!(visible_slides(1920.0, &cards, 12), 5);
/// assert_eq!(visible_slides(1920.0, &cards, 2), 2);
/// assert_eq!(visible_slides(375.0, &cards, 0), 1);
/// ```
#[must_use]
pub fn visible_slides(viewport_width: f32, cards: &CardsPerBreakpoint, total_slides: usize) -> usize {
    let wanted = usize::from(cards.cards_for(Breakpoint::for_width(viewport_width)));
    wanted.clamp(1, total_slides.max(1))
}
