//! List and bar variants: paginated reviews with "Load More".
//!
//! Both variants keep their reviews in a subtree with a stable id so
//! "Load More" and "Show Less" can replace it without touching the rest
//! of the widget.

use plaudit_protocol::Layout;

use crate::components::review_card;
use crate::context::RenderContext;
use crate::markup::Element;
use crate::pagination::WidgetRuntimeState;

/// Suffix of the replaceable reviews subtree id.
pub const REVIEWS_ID: &str = "reviews";

/// Renders the list variant.
#[must_use]
pub fn render_list(state: &WidgetRuntimeState, ctx: &RenderContext) -> Element {
    Element::new("div")
        .class("plaudit-list")
        .child(reviews_subtree(state, ctx))
}

/// Renders the bar variant: a compact horizontal strip.
#[must_use]
pub fn render_bar(state: &WidgetRuntimeState, ctx: &RenderContext) -> Element {
    Element::new("div")
        .class("plaudit-bar")
        .attr("role", "region")
        .attr("aria-label", "Customer reviews")
        .child(reviews_subtree(state, ctx))
}

/// Renders the replaceable subtree: the visible reviews and the controls.
#[must_use]
pub fn reviews_subtree(state: &WidgetRuntimeState, ctx: &RenderContext) -> Element {
    let layout = state.layout;
    let cards = state
        .visible_reviews()
        .into_iter()
        .enumerate()
        .map(|(index, review)| review_card(review, index, layout, ctx));

    let items = match layout {
        Layout::Bar => Element::new("div").class("plaudit-bar-items").children(cards),
        _ => Element::new("ul").class("plaudit-list-items").children(
            cards.map(|card| Element::new("li").class("plaudit-list-item").child(card)),
        ),
    };

    Element::new("div")
        .id(ctx.id(REVIEWS_ID))
        .class("plaudit-reviews")
        .attr("data-loaded", state.loaded_reviews.len().to_string())
        .attr("data-total", state.total_review_count.to_string())
        .child(items)
        .child(controls(state))
}

fn controls(state: &WidgetRuntimeState) -> Element {
    let button = state.button();
    let mut load_more = Element::new("button")
        .class("plaudit-load-more")
        .attr("type", "button")
        .attr("data-action", "load-more")
        .attr("aria-busy", button.loading.to_string())
        .text(button.label());
    load_more.toggle_attr("disabled", button.disabled || button.loading);

    let mut controls = Element::new("div")
        .class("plaudit-list-controls")
        .child(load_more);
    if button.show_more {
        controls = controls.child(
            Element::new("button")
                .class("plaudit-show-more")
                .attr("type", "button")
                .attr("data-action", "show-more")
                .text("Show More"),
        );
    }
    if button.show_less {
        controls = controls.child(
            Element::new("button")
                .class("plaudit-show-less")
                .attr("type", "button")
                .attr("data-action", "show-less")
                .text("Show Less"),
        );
    }
    controls
}
