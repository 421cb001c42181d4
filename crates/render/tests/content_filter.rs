//! Reviews without text never reach the markup, whatever the layout.

use chrono::Utc;
use plaudit_config::WidgetConfig;
use plaudit_protocol::{Layout, ReviewRecord, WidgetPayload};
use plaudit_render::{Element, RenderContext, WidgetRuntimeState, render_widget};

const HIDDEN_AUTHOR: &str = "Silent Sam";

fn payload() -> WidgetPayload {
    let mut silent = ReviewRecord::new(HIDDEN_AUTHOR, 1.0, "");
    silent.text = Some("   ".to_string());
    let mut from_text = ReviewRecord::new("Tess", 4.0, "");
    from_text.text = Some("Only the text field".to_string());

    WidgetPayload {
        reviews: vec![
            ReviewRecord::new("Ana", 5.0, "Wonderful"),
            silent,
            from_text,
            ReviewRecord::new("Bo", 3.0, "Fine"),
        ],
        business_name: Some("Corner Cafe".into()),
        total_review_count: Some(4),
        ..WidgetPayload::default()
    }
}

#[test]
fn empty_reviews_are_filtered_in_every_layout() {
    let payload = payload();
    for layout in Layout::ALL {
        let mut config = WidgetConfig::new("w");
        config.layout = layout;
        let ctx = RenderContext::new(config, "box", &payload, Utc::now());
        let state = WidgetRuntimeState::new("w", layout, &payload);
        let mut container = Element::new("div").id("box");

        render_widget(&mut container, &payload, &state, &ctx);
        let html = container.to_html();

        assert!(!html.contains(HIDDEN_AUTHOR), "{layout} leaked an empty review");
        if layout != Layout::Badge {
            assert!(html.contains("Only the text field"), "{layout} dropped a text-only review");
            assert_eq!(container.find_all_by_class("plaudit-card").len(), 3, "{layout}");
        }
    }
}
