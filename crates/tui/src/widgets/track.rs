//! The carousel track.
//!
//! Slides sit side by side and the whole track is shifted by the view's
//! translation, so a drag moves the cards column by column before the
//! release commits or snaps back.

use ratatui::{buffer::Buffer, layout::Rect};

use super::card::{CardContext, render_card};
use crate::layout::PX_PER_COLUMN;
use crate::state::PreviewState;

/// Narrowest slice of a card worth drawing, in columns.
const MIN_CARD_COLUMNS: i32 = 3;

/// Column span of slide `index`, relative to the track's left edge.
///
/// ```
/// use plaudit_tui::widgets::slide_columns;
///
/// // 300px slides, track moved one slide to the left.
/// assert_eq!(slide_columns(0, 300.0, -300.0), (-30, 0));
/// assert_eq!(slide_columns(2, 300.0, -300.0), (30, 60));
/// ```
#[must_use]
pub fn slide_columns(index: usize, slide_width_px: f32, translate_px: f32) -> (i32, i32) {
    #[allow(clippy::cast_precision_loss)]
    let left_px = index as f32 * slide_width_px + translate_px;
    let to_columns = |px: f32| {
        #[allow(clippy::cast_possible_truncation)]
        let columns = (px / PX_PER_COLUMN).round() as i32;
        columns
    };
    (to_columns(left_px), to_columns(left_px + slide_width_px))
}

/// Renders the slides that intersect `area`.
pub fn render_track(state: &PreviewState, area: Rect, buf: &mut Buffer) {
    let view = state.view();
    let slide_width_px = state.engine.state().slide_width_px;
    if slide_width_px <= 0.0 {
        return;
    }
    let ctx = CardContext {
        config: &state.config,
        hints: &state.hints,
        now: state.now,
    };
    let width = i32::from(area.width);

    for (index, review) in state.reviews.iter().enumerate() {
        let (left, right) = slide_columns(index, slide_width_px, view.translate_px);
        let (left, right) = (left.max(0), right.min(width));
        if right - left < MIN_CARD_COLUMNS {
            continue;
        }
        // Both bounds lie in 0..=area.width here.
        let (Ok(left), Ok(right)) = (u16::try_from(left), u16::try_from(right)) else {
            continue;
        };
        let slot = Rect::new(area.x + left, area.y, right - left, area.height);
        render_card(review, index == view.index, &ctx, slot, buf);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use chrono::Utc;
    use plaudit_carousel::CarouselEvent;
    use plaudit_config::WidgetConfig;
    use plaudit_protocol::dummy::sample_payload;

    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(state: &PreviewState) -> String {
        let area = Rect::new(0, 0, 80, 10);
        let mut buf = Buffer::empty(area);
        render_track(state, area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn shows_visible_slides_only() {
        let payload = sample_payload();
        let state = PreviewState::new(&payload, WidgetConfig::new("w"), 80, Instant::now(), Utc::now());
        let text = render(&state);

        // 800px is the tablet breakpoint: two cards.
        assert_eq!(state.visible_slides(), 2);
        assert!(text.contains(&state.reviews[0].author));
        assert!(text.contains(&state.reviews[1].author));
        assert!(!text.contains(&state.reviews[2].author));
    }

    #[test]
    fn next_shifts_by_one_slide() {
        let payload = sample_payload();
        let now = Instant::now();
        let mut state = PreviewState::new(&payload, WidgetConfig::new("w"), 80, now, Utc::now());
        state.handle(CarouselEvent::Next, now);
        let text = render(&state);

        assert!(!text.contains(&state.reviews[0].author));
        assert!(text.contains(&state.reviews[1].author));
        assert!(text.contains(&state.reviews[2].author));
    }

    #[test]
    fn drag_moves_the_track_with_the_pointer() {
        let payload = sample_payload();
        let now = Instant::now();
        let mut state = PreviewState::new(&payload, WidgetConfig::new("w"), 80, now, Utc::now());
        state.handle(CarouselEvent::PointerDown { x: 500.0 }, now);
        state.handle(CarouselEvent::PointerMove { x: 300.0 }, now);

        assert!((state.view().translate_px + 200.0).abs() < f32::EPSILON);
        let (left, right) = slide_columns(0, 400.0, state.view().translate_px);
        assert_eq!((left, right), (-20, 20));
    }
}
