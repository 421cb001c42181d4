//! Rendering functions for the preview.
//!
//! Each widget is a function that draws state into a buffer, which keeps
//! them easy to test without a terminal.
//!
//! - [`card`]: one review card
//! - [`track`]: the sliding carousel track
//! - [`controls`]: arrows and the three dots
//! - [`header`] and [`status_bar`]
//! - [`modal`] and [`help`] overlays

pub mod card;
pub mod controls;
pub mod header;
pub mod help;
pub mod modal;
pub mod status_bar;
pub mod track;

use ratatui::layout::Rect;

pub use card::{CardContext, card_title, rating_line, render_card};
pub use controls::{controls_line, dot_glyph, render_controls};
pub use header::{header_line, render_header};
pub use help::render_help_overlay;
pub use modal::render_review_modal;
pub use status_bar::{autoplay_label, render_status_bar};
pub use track::{render_track, slide_columns};

/// A `width` x `height` rectangle centered in `area`, clamped to it.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_positions_correctly() {
        assert_eq!(
            centered_rect(20, 10, Rect::new(0, 0, 80, 24)),
            Rect::new(30, 7, 20, 10)
        );
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        assert_eq!(
            centered_rect(100, 50, Rect::new(2, 1, 40, 12)),
            Rect::new(2, 1, 40, 12)
        );
    }
}
