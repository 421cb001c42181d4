//! The six layout variants.
//!
//! | Layout | Module | Body |
//! |--------|--------|------|
//! | carousel | [`carousel`] | sliding track, arrows, three dots |
//! | grid | [`grid`] | responsive grid |
//! | list | [`list`] | vertical list with "Load More" / "Show Less" |
//! | bar | [`list`] | compact horizontal strip with "Load More" |
//! | badge | [`badge`] | aggregate summary with up to three snippets |
//! | masonry | [`masonry`] | shortest-column distribution |

pub mod badge;
pub mod carousel;
pub mod grid;
pub mod list;
pub mod masonry;

use plaudit_protocol::{AggregateRating, Layout};

use crate::context::RenderContext;
use crate::markup::Element;
use crate::pagination::WidgetRuntimeState;

pub use list::reviews_subtree;

/// Inputs of a variant body besides the runtime state.
#[derive(Debug, Clone, Copy)]
pub struct VariantInput<'a> {
    /// Aggregate over the displayable reviews.
    pub aggregate: AggregateRating,
    /// Link to the business profile.
    pub business_url: Option<&'a str>,
}

/// Renders the body of `state.layout`.
#[must_use]
pub fn render_body(state: &WidgetRuntimeState, ctx: &RenderContext, input: VariantInput<'_>) -> Element {
    match state.layout {
        Layout::List => list::render_list(state, ctx),
        Layout::Bar => list::render_bar(state, ctx),
        layout => {
            let reviews = state.displayable_reviews();
            match layout {
                Layout::Grid => grid::render(&reviews, ctx),
                Layout::Badge => badge::render(
                    &reviews,
                    input.aggregate,
                    state.total_review_count,
                    input.business_url,
                    ctx,
                ),
                Layout::Masonry => masonry::render(&reviews, ctx),
                Layout::Carousel | Layout::List | Layout::Bar => {
                    let view = carousel::initial_view(reviews.len(), ctx);
                    carousel::render(&reviews, ctx, &view)
                }
            }
        }
    }
}
