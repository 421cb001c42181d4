//! Grid variant.

use plaudit_protocol::{Layout, ReviewRecord};

use crate::components::review_card;
use crate::context::RenderContext;
use crate::markup::Element;

/// Renders cards in a responsive grid. The column count follows the same
/// breakpoint table as the carousel and never exceeds the review count.
#[must_use]
pub fn render(reviews: &[&ReviewRecord], ctx: &RenderContext) -> Element {
    let columns = usize::from(ctx.config.cards_for_width(ctx.viewport_width))
        .clamp(1, reviews.len().max(1));
    Element::new("div")
        .class("plaudit-grid")
        .attr("style", format!("--plaudit-columns: {columns}"))
        .children(
            reviews
                .iter()
                .enumerate()
                .map(|(index, review)| review_card(review, index, Layout::Grid, ctx)),
        )
}
