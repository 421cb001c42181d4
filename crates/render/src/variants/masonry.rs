//! Masonry variant: cards dealt into columns of uneven height.

use plaudit_protocol::{Layout, ReviewRecord, truncate};

use crate::components::review_card;
use crate::context::RenderContext;
use crate::markup::Element;

/// Most columns a masonry layout uses.
pub const MAX_COLUMNS: usize = 4;

const CARD_CHROME_PX: f32 = 96.0;
const LINE_HEIGHT_PX: f32 = 20.0;
const CHARS_PER_LINE: usize = 40;

/// Estimates the rendered height of a card from its (truncated) body.
#[must_use]
pub fn estimated_height(review: &ReviewRecord) -> f32 {
    let chars = truncate(review.body(), Layout::Masonry.truncate_at())
        .text
        .chars()
        .count();
    CARD_CHROME_PX + chars.div_ceil(CHARS_PER_LINE) as f32 * LINE_HEIGHT_PX
}

/// Deals item indices into `columns` columns, always onto the shortest
/// column (the leftmost on ties).
///
/// # Examples
///
/// ```
/// use plaudit_render::variants::masonry::distribute;
///
/// let columns = distribute(&[300.0, 100.0, 100.0, 100.0], 2);
/// assert_eq!(columns, vec![vec![0], vec![1, 2, 3]]);
/// ```
#[must_use]
pub fn distribute(heights: &[f32], columns: usize) -> Vec<Vec<usize>> {
    let columns = columns.max(1);
    let mut dealt = vec![Vec::new(); columns];
    let mut totals = vec![0.0f32; columns];
    for (index, height) in heights.iter().enumerate() {
        let shortest = totals
            .iter()
            .enumerate()
            .fold(0, |best, (column, total)| {
                if *total < totals[best] { column } else { best }
            });
        dealt[shortest].push(index);
        totals[shortest] += height;
    }
    dealt
}

/// Renders the masonry columns.
#[must_use]
pub fn render(reviews: &[&ReviewRecord], ctx: &RenderContext) -> Element {
    let columns = usize::from(ctx.config.cards_for_width(ctx.viewport_width))
        .clamp(1, MAX_COLUMNS)
        .min(reviews.len().max(1));
    let heights: Vec<f32> = reviews.iter().map(|review| estimated_height(review)).collect();

    let columns = distribute(&heights, columns).into_iter().map(|indices| {
        Element::new("div").class("plaudit-masonry-column").children(
            indices
                .into_iter()
                .map(|index| review_card(reviews[index], index, Layout::Masonry, ctx)),
        )
    });

    Element::new("div").class("plaudit-masonry").children(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_item_is_dealt_once() {
        let heights = [120.0, 80.0, 200.0, 50.0, 90.0, 60.0, 150.0];
        let columns = distribute(&heights, 3);
        let mut seen: Vec<usize> = columns.iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..heights.len()).collect::<Vec<_>>());
    }

    #[test]
    fn longer_bodies_are_taller() {
        let short = ReviewRecord::new("A", 5.0, "Hi");
        let long = ReviewRecord::new("A", 5.0, "word ".repeat(60));
        assert!(estimated_height(&long) > estimated_height(&short));
    }
}
