//! "Load More" against a static transport.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use plaudit_config::{RuntimeConfig, WidgetConfig};
use plaudit_fetch::{StaticTransport, WidgetDataClient};
use plaudit_protocol::{Layout, ReviewRecord, WidgetPayload};
use plaudit_render::{
    Element, LoadMoreOutcome, RenderContext, WidgetRuntimeState, load_more, render_widget,
    show_less,
};

fn server(total: usize) -> WidgetPayload {
    WidgetPayload {
        reviews: (0..total)
            .map(|i| ReviewRecord::new(format!("Reviewer {i}"), 5.0, format!("Review number {i}")))
            .collect(),
        total_review_count: Some(total),
        ..WidgetPayload::default()
    }
}

fn setup(total: usize) -> (Mutex<WidgetRuntimeState>, WidgetDataClient, RenderContext, WidgetPayload) {
    let full = server(total);
    let client = WidgetDataClient::new(
        Arc::new(StaticTransport::new(full.clone()).with_latency(Duration::from_millis(80))),
        &RuntimeConfig::default(),
    );
    let first = WidgetPayload {
        reviews: full.reviews[..5.min(total)].to_vec(),
        total_review_count: Some(total),
        ..WidgetPayload::default()
    };
    let mut config = WidgetConfig::new("w");
    config.layout = Layout::List;
    let ctx = RenderContext::new(config, "box", &first, Utc::now());
    let state = WidgetRuntimeState::new("w", Layout::List, &first);
    (Mutex::new(state), client, ctx, first)
}

#[tokio::test(start_paused = true)]
async fn loaded_count_grows_until_total() {
    let (state, client, ctx, _) = setup(12);
    let mut previous = state.lock().unwrap().loaded_reviews.len();

    while !state.lock().unwrap().is_exhausted() {
        let outcome = load_more(&state, &client, &ctx).await.unwrap();
        assert!(matches!(outcome, LoadMoreOutcome::Updated(_)));

        let guard = state.lock().unwrap();
        let loaded = guard.loaded_reviews.len();
        assert!(loaded > previous);
        assert!(loaded <= guard.total_review_count);
        assert_eq!(guard.button().disabled, loaded == guard.total_review_count);
        previous = loaded;
    }

    assert_eq!(previous, 12);
    let outcome = load_more(&state, &client, &ctx).await.unwrap();
    assert_eq!(outcome, LoadMoreOutcome::Unchanged);
}

#[tokio::test(start_paused = true)]
async fn only_the_reviews_subtree_is_replaced() {
    let (state, client, ctx, first) = setup(8);
    let mut container = Element::new("div").id("box");
    render_widget(&mut container, &first, &state.lock().unwrap(), &ctx);
    let header_before = container.find_by_class("plaudit-header").cloned();

    let LoadMoreOutcome::Updated(subtree) = load_more(&state, &client, &ctx).await.unwrap() else {
        panic!("expected an update");
    };
    assert!(container.replace_by_id("box-reviews", subtree));

    assert_eq!(container.find_all_by_class("plaudit-list-item").len(), 8);
    assert_eq!(container.find_by_class("plaudit-header").cloned(), header_before);

    let collapsed = show_less(&state, &ctx);
    assert_eq!(collapsed.scroll_to, "box");
    assert_eq!(collapsed.subtree.find_all_by_class("plaudit-list-item").len(), 5);
    assert_eq!(state.lock().unwrap().loaded_reviews.len(), 8);
}

#[tokio::test(start_paused = true)]
async fn overlapping_clicks_fetch_once() {
    let (state, client, ctx, _) = setup(20);

    let (a, b) = tokio::join!(
        load_more(&state, &client, &ctx),
        load_more(&state, &client, &ctx)
    );
    let outcomes = [a.unwrap(), b.unwrap()];

    assert_eq!(
        outcomes
            .iter()
            .filter(|outcome| matches!(outcome, LoadMoreOutcome::Updated(_)))
            .count(),
        1
    );
    assert_eq!(state.lock().unwrap().loaded_reviews.len(), 10);
}
