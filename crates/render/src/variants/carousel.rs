//! Carousel variant: a sliding track with arrows and three dots.
//!
//! [`render`] builds the static markup for a [`CarouselView`]; after every
//! engine transition the host calls [`apply_view`] to patch the track
//! transform, arrow and dot states, and slide heights in place.

use plaudit_carousel::{CarouselState, CarouselView, Dot, DotSlot, HeightSync, visible_slides};
use plaudit_protocol::{Layout, ReviewRecord};

use crate::components::review_card;
use crate::context::RenderContext;
use crate::markup::{Element, Node};

/// CSS transition used while the track is not following a drag.
const TRACK_TRANSITION: &str = "transform 0.3s ease";

/// The view of a freshly built carousel, before any width is measured.
#[must_use]
pub fn initial_view(slide_count: usize, ctx: &RenderContext) -> CarouselView {
    let visible = visible_slides(ctx.viewport_width, &ctx.config.cards, slide_count);
    let state = CarouselState::new(slide_count, visible, 0.0, ctx.config.loop_slides);
    CarouselView::from(&state)
}

/// Renders the carousel.
#[must_use]
pub fn render(reviews: &[&ReviewRecord], ctx: &RenderContext, view: &CarouselView) -> Element {
    let visible = view.visible.len().max(1);
    let slides = reviews.iter().enumerate().map(|(index, review)| {
        Element::new("div")
            .class("plaudit-slide")
            .attr("data-slide", index.to_string())
            .attr("aria-hidden", (!view.visible.contains(&index)).to_string())
            .child(review_card(review, index, Layout::Carousel, ctx))
    });

    let track = Element::new("div")
        .id(ctx.id("track"))
        .class("plaudit-track")
        .attr("style", track_style(view))
        .children(slides);

    Element::new("div")
        .id(ctx.id("carousel"))
        .class("plaudit-carousel")
        .attr("data-visible", visible.to_string())
        .attr("style", format!("--plaudit-visible: {visible}"))
        .child(arrow("prev", "Previous reviews", "‹", view.can_prev))
        .child(Element::new("div").class("plaudit-viewport").child(track))
        .child(arrow("next", "Next reviews", "›", view.can_next))
        .child(
            Element::new("div")
                .class("plaudit-dots")
                .attr("role", "group")
                .attr("aria-label", "Carousel navigation")
                .children(view.dots.iter().map(dot)),
        )
}

/// Patches a rendered carousel to match `view`.
///
/// Only slides in `sync.range` receive the min-height; every other slide
/// that carries one has it cleared, and any other inline style is left
/// alone. Returns `false` if `root` contains no carousel.
pub fn apply_view(
    root: &mut Element,
    ctx: &RenderContext,
    view: &CarouselView,
    sync: Option<&HeightSync>,
) -> bool {
    let Some(carousel) = root.find_by_id_mut(&ctx.id("carousel")) else {
        return false;
    };

    for child in &mut carousel.children {
        let Node::Element(element) = child else {
            continue;
        };
        if element.has_class("plaudit-arrow") {
            let enabled = match element.get_attr("data-action") {
                Some("prev") => view.can_prev,
                _ => view.can_next,
            };
            element.toggle_attr("disabled", !enabled);
        } else if element.has_class("plaudit-dots") {
            element.clear();
            element
                .children
                .extend(view.dots.iter().map(|d| Node::from(dot(d))));
        }
    }

    let track_id = ctx.id("track");
    let Some(track) = carousel.find_by_id_mut(&track_id) else {
        return true;
    };
    track.set_attr("style", track_style(view));
    for (index, child) in track.children.iter_mut().enumerate() {
        let Node::Element(slide) = child else {
            continue;
        };
        slide.set_attr("aria-hidden", (!view.visible.contains(&index)).to_string());
        match sync.and_then(|sync| sync.height_for(index)) {
            Some(height) => slide.set_attr("style", format!("{MIN_HEIGHT} {height}px")),
            None => {
                if slide.get_attr("style").is_some_and(|style| style.starts_with(MIN_HEIGHT)) {
                    slide.remove_attr("style");
                }
            }
        }
    }
    true
}

const MIN_HEIGHT: &str = "min-height:";

fn track_style(view: &CarouselView) -> String {
    let transition = if view.animate { TRACK_TRANSITION } else { "none" };
    format!("transform: {}; transition: {transition}", view.transform())
}

fn arrow(action: &str, label: &str, glyph: &str, enabled: bool) -> Element {
    let mut button = Element::new("button")
        .class("plaudit-arrow")
        .class(&format!("plaudit-arrow--{action}"))
        .attr("type", "button")
        .attr("data-action", action)
        .attr("aria-label", label)
        .text(glyph);
    button.toggle_attr("disabled", !enabled);
    button
}

fn dot(dot: &Dot) -> Element {
    let label = match dot.slot {
        DotSlot::Previous => "Previous reviews",
        DotSlot::Current => "Current reviews",
        DotSlot::Next => "Next reviews",
    };
    let mut button = Element::new("button")
        .class("plaudit-dot")
        .class_if(dot.active, "plaudit-dot--active")
        .attr("type", "button")
        .attr("data-dot", dot.slot.as_str())
        .attr("aria-label", label);
    button.toggle_attr("disabled", !dot.enabled && !dot.active);
    button
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use plaudit_carousel::{CarouselEvent, visible_range};
    use plaudit_config::WidgetConfig;
    use plaudit_protocol::WidgetPayload;

    fn ctx() -> RenderContext {
        RenderContext::new(WidgetConfig::new("w"), "c", &WidgetPayload::default(), Utc::now())
            .with_viewport_width(800.0)
    }

    fn reviews(n: usize) -> Vec<ReviewRecord> {
        (0..n)
            .map(|i| ReviewRecord::new(format!("R{i}"), 5.0, "Good"))
            .collect()
    }

    #[test]
    fn always_three_dots() {
        for n in [3, 10, 100] {
            let reviews = reviews(n);
            let refs: Vec<&ReviewRecord> = reviews.iter().collect();
            let ctx = ctx();
            let html = render(&refs, &ctx, &initial_view(n, &ctx));
            assert_eq!(html.find_all_by_class("plaudit-dot").len(), 3, "{n} slides");
        }
    }

    #[test]
    fn first_page_disables_prev() {
        let reviews = reviews(5);
        let refs: Vec<&ReviewRecord> = reviews.iter().collect();
        let ctx = ctx();
        let root = render(&refs, &ctx, &initial_view(5, &ctx));
        let prev = root.find_by_class("plaudit-arrow--prev").unwrap();
        assert_eq!(prev.get_attr("disabled"), Some(""));
        let next = root.find_by_class("plaudit-arrow--next").unwrap();
        assert_eq!(next.get_attr("disabled"), None);
    }

    #[test]
    fn apply_view_moves_track_and_heights() {
        let reviews = reviews(6);
        let refs: Vec<&ReviewRecord> = reviews.iter().collect();
        let ctx = ctx();
        let mut root = Element::new("div").child(render(&refs, &ctx, &initial_view(6, &ctx)));

        let state = CarouselState::new(6, 2, 300.0, true).apply(CarouselEvent::Next);
        let view = CarouselView::from(&state);
        let sync = HeightSync {
            range: visible_range(1, 2, 6),
            min_height_px: 240.0,
        };
        assert!(apply_view(&mut root, &ctx, &view, Some(&sync)));

        let track = root.find_by_id("c-track").unwrap();
        assert_eq!(
            track.get_attr("style"),
            Some("transform: translateX(-300px); transition: transform 0.3s ease")
        );
        let styled: Vec<usize> = track
            .child_elements()
            .enumerate()
            .filter(|(_, slide)| slide.get_attr("style").is_some())
            .map(|(index, _)| index)
            .collect();
        assert_eq!(styled, vec![1, 2]);
        assert!(root.find_by_class("plaudit-arrow--prev").unwrap().get_attr("disabled").is_none());
    }

    #[test]
    fn apply_view_keeps_unrelated_slide_styles() {
        let reviews = reviews(4);
        let refs: Vec<&ReviewRecord> = reviews.iter().collect();
        let ctx = ctx();
        let mut root = Element::new("div").child(render(&refs, &ctx, &initial_view(4, &ctx)));
        let state = CarouselState::new(4, 1, 300.0, true);
        let view = CarouselView::from(&state);
        let sync = HeightSync {
            range: visible_range(0, 1, 4),
            min_height_px: 180.0,
        };
        assert!(apply_view(&mut root, &ctx, &view, Some(&sync)));

        let track = root.find_by_id_mut("c-track").unwrap();
        let Node::Element(hidden) = &mut track.children[3] else {
            panic!("slide 3 is an element");
        };
        hidden.set_attr("style", "opacity: 0.5");

        let view = CarouselView::from(&state.apply(CarouselEvent::Next));
        let sync = HeightSync {
            range: visible_range(1, 1, 4),
            min_height_px: 220.0,
        };
        assert!(apply_view(&mut root, &ctx, &view, Some(&sync)));

        let styles: Vec<Option<&str>> = root
            .find_by_id("c-track")
            .unwrap()
            .child_elements()
            .map(|slide| slide.get_attr("style"))
            .collect();
        assert_eq!(
            styles,
            vec![None, Some("min-height: 220px"), None, Some("opacity: 0.5")]
        );
    }
}
