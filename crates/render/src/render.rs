//! Whole-widget rendering.

use plaudit_protocol::{Layout, WidgetPayload, aggregate_rating};
use tracing::{debug, instrument};

use crate::components::{empty_state, error_block, header};
use crate::context::RenderContext;
use crate::markup::Element;
use crate::pagination::WidgetRuntimeState;
use crate::variants::{self, VariantInput};

/// What [`render_widget`] put into the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendered {
    /// Reviews were rendered.
    Reviews {
        /// Layout used.
        layout: Layout,
        /// Number of review cards rendered.
        count: usize,
    },
    /// No review had text; the empty state was rendered.
    Empty,
}

/// Clears `container` and renders the widget into it.
///
/// Each call rebuilds the container from scratch, so rendering twice with
/// the same inputs gives the same markup.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use plaudit_config::WidgetConfig;
/// use plaudit_protocol::{Layout, dummy::sample_payload};
/// use plaudit_render::{RenderContext, Rendered, WidgetRuntimeState, markup::Element, render_widget};
///
/// let payload = sample_payload();
/// let mut config = WidgetConfig::new("w_1");
/// config.layout = Layout::Grid;
/// let ctx = RenderContext::new(config, "reviews", &payload, Utc::now());
/// let state = WidgetRuntimeState::new("w_1", Layout::Grid, &payload);
///
/// let mut container = Element::new("div").id("reviews");
/// let rendered = render_widget(&mut container, &payload, &state, &ctx);
/// assert_eq!(rendered, Rendered::Reviews { layout: Layout::Grid, count: 9 });
/// assert_eq!(container.find_all_by_class("plaudit-card").len(), 9);
/// ```
#[instrument(skip_all, fields(container = %ctx.container_id, layout = %state.layout))]
pub fn render_widget(
    container: &mut Element,
    payload: &WidgetPayload,
    state: &WidgetRuntimeState,
    ctx: &RenderContext,
) -> Rendered {
    container.clear();

    let displayable = state.displayable_reviews();
    if displayable.is_empty() {
        debug!("no displayable reviews");
        container.children.push(widget_root(ctx, state.layout).child(empty_state()).into());
        return Rendered::Empty;
    }

    let aggregate = aggregate_rating(displayable.iter().copied(), payload.primary_source());
    let mut root = widget_root(ctx, state.layout);
    if state.layout != Layout::Badge {
        root = root.child(header(
            payload.business_name.as_deref(),
            payload.business_url_link.as_deref(),
            aggregate,
            state.total_review_count,
            ctx,
        ));
    }
    let body = variants::render_body(
        state,
        ctx,
        VariantInput {
            aggregate,
            business_url: payload.business_url_link.as_deref(),
        },
    );
    let count = body.find_all_by_class("plaudit-card").len();
    container.children.push(root.child(body).into());

    debug!(count, "widget rendered");
    Rendered::Reviews {
        layout: state.layout,
        count,
    }
}

/// Clears `container` and renders the inline error block.
pub fn render_error(container: &mut Element, ctx: &RenderContext, message: &str) {
    container.clear();
    container
        .children
        .push(widget_root(ctx, ctx.config.layout).child(error_block(message)).into());
}

fn widget_root(ctx: &RenderContext, layout: Layout) -> Element {
    let mut root = Element::new("div")
        .id(ctx.id("widget"))
        .class("plaudit-widget")
        .class(&format!("plaudit-widget--{layout}"))
        .attr("data-widget-id", ctx.config.widget_id.as_str());
    if let Some(color) = ctx.config.theme_color.as_deref().filter(|c| !c.is_empty()) {
        root.set_attr("style", format!("--plaudit-theme: {color}"));
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use plaudit_config::WidgetConfig;
    use plaudit_protocol::{ReviewRecord, dummy::sample_payload};

    fn ctx(layout: Layout, payload: &WidgetPayload) -> RenderContext {
        let mut config = WidgetConfig::new("w_1");
        config.layout = layout;
        config.theme_color = Some("#ff6600".into());
        RenderContext::new(config, "box", payload, Utc::now())
    }

    #[test]
    fn rendering_is_idempotent() {
        let payload = sample_payload();
        let ctx = ctx(Layout::Masonry, &payload);
        let state = WidgetRuntimeState::new("w_1", Layout::Masonry, &payload);
        let mut container = Element::new("div").id("box");

        render_widget(&mut container, &payload, &state, &ctx);
        let first = container.to_html();
        render_widget(&mut container, &payload, &state, &ctx);
        assert_eq!(container.to_html(), first);
        assert_eq!(container.children.len(), 1);
    }

    #[test]
    fn empty_reviews_render_empty_state() {
        let payload = WidgetPayload {
            reviews: vec![ReviewRecord::new("A", 5.0, "  ")],
            ..WidgetPayload::default()
        };
        let ctx = ctx(Layout::Carousel, &payload);
        let state = WidgetRuntimeState::new("w_1", Layout::Carousel, &payload);
        let mut container = Element::new("div");

        assert_eq!(render_widget(&mut container, &payload, &state, &ctx), Rendered::Empty);
        assert!(container.find_by_class("plaudit-empty").is_some());
    }

    #[test]
    fn theme_color_reaches_root() {
        let payload = sample_payload();
        let ctx = ctx(Layout::Badge, &payload);
        let state = WidgetRuntimeState::new("w_1", Layout::Badge, &payload);
        let mut container = Element::new("div");
        render_widget(&mut container, &payload, &state, &ctx);

        let root = container.find_by_id("box-widget").unwrap();
        assert_eq!(root.get_attr("style"), Some("--plaudit-theme: #ff6600"));
        assert!(root.has_class("plaudit-widget--badge"));
        assert!(root.find_by_class("plaudit-header").is_none());
    }

    #[test]
    fn error_block_replaces_content() {
        let payload = sample_payload();
        let ctx = ctx(Layout::Grid, &payload);
        let mut container = Element::new("div").child(Element::new("p").text("stale"));
        render_error(&mut container, &ctx, "Couldn't load reviews.");
        assert!(container.find_by_class("plaudit-retry").is_some());
        assert!(!container.to_html().contains("stale"));
    }
}
