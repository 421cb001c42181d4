//! Interaction with mounted widgets.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeScripts, runtime_with};
use plaudit_carousel::CarouselEvent;
use plaudit_config::WidgetConfig;
use plaudit_protocol::Layout;
use plaudit_protocol::dummy::sample_payload;
use plaudit_render::ModalEvent;
use plaudit_runtime::{RuntimeError, WidgetInstance, WidgetRuntime};

fn scripts() -> Arc<FakeScripts> {
    Arc::new(FakeScripts::new(Duration::ZERO))
}

async fn mount(runtime: &WidgetRuntime, layout: Layout) -> WidgetInstance {
    let mut config = WidgetConfig::new("w_1");
    config.layout = layout;
    config.autoplay_delay_ms = 4_000;
    runtime.init(config).await.into_instance().unwrap()
}

#[tokio::test(start_paused = true)]
async fn autoplay_advances_until_destroyed() {
    let (runtime, page, _) = runtime_with(sample_payload(), scripts());
    let mut instance = mount(&runtime, Layout::Carousel).await;
    assert_eq!(instance.carousel_view().unwrap().index, 0);

    tokio::time::sleep(Duration::from_millis(4_100)).await;
    assert_eq!(instance.carousel_view().unwrap().index, 1);
    tokio::time::sleep(Duration::from_millis(4_000)).await;
    assert_eq!(instance.carousel_view().unwrap().index, 2);

    let html = page.container_html(instance.container_id()).unwrap();
    instance.destroy();
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert!(instance.is_destroyed());
    assert_eq!(instance.carousel_view().unwrap().index, 2);
    assert_eq!(page.container_html(instance.container_id()).unwrap(), html);
}

#[tokio::test(start_paused = true)]
async fn hover_pauses_autoplay() {
    let (runtime, _, _) = runtime_with(sample_payload(), scripts());
    let instance = mount(&runtime, Layout::Carousel).await;

    instance.pointer_enter();
    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(instance.carousel_view().unwrap().index, 0);

    // Resumes after the grace period plus one delay.
    instance.pointer_leave();
    tokio::time::sleep(Duration::from_millis(6_900)).await;
    assert_eq!(instance.carousel_view().unwrap().index, 0);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(instance.carousel_view().unwrap().index, 1);
}

#[tokio::test(start_paused = true)]
async fn navigation_patches_the_track() {
    let (runtime, page, _) = runtime_with(sample_payload(), scripts());
    let instance = mount(&runtime, Layout::Carousel).await;

    let view = instance.carousel_event(CarouselEvent::Next).unwrap();
    assert_eq!(view.index, 1);

    let container = page.container(instance.container_id()).unwrap();
    let track_id = format!("{}-track", instance.container_id());
    let track = container.find_by_id(&track_id).unwrap();
    assert_eq!(
        track.get_attr("style").map(|style| style.contains(&view.transform())),
        Some(true)
    );
}

#[tokio::test(start_paused = true)]
async fn non_carousel_widgets_ignore_carousel_events() {
    let (runtime, _, _) = runtime_with(sample_payload(), scripts());
    let instance = mount(&runtime, Layout::Grid).await;

    assert!(instance.carousel_view().is_none());
    assert!(instance.carousel_event(CarouselEvent::Next).is_none());
}

#[tokio::test(start_paused = true)]
async fn modal_opens_and_closes_on_escape() {
    let (runtime, page, _) = runtime_with(sample_payload(), scripts());
    let instance = mount(&runtime, Layout::Grid).await;

    assert!(instance.open_review(2));
    let overlay = page.overlay().unwrap();
    assert!(overlay.to_html().contains(instance.container_id()));

    assert!(!instance.modal_event(ModalEvent::Key("Enter")));
    assert!(page.overlay().is_some());
    assert!(instance.modal_event(ModalEvent::Key("Escape")));
    assert!(page.overlay().is_none());

    assert!(!instance.open_review(99));
    assert!(page.overlay().is_none());
}

#[tokio::test(start_paused = true)]
async fn one_modal_is_shared_by_every_widget() {
    let (runtime, page, _) = runtime_with(sample_payload(), scripts());
    let first = mount(&runtime, Layout::Grid).await;
    let second = mount(&runtime, Layout::Masonry).await;

    first.open_review(0);
    second.open_review(1);
    let overlay = page.overlay().unwrap();
    assert!(overlay.to_html().contains(second.container_id()));

    // Closing from either widget closes the one modal.
    assert!(first.modal_event(ModalEvent::CloseButton));
    assert!(page.overlay().is_none());
}

#[tokio::test(start_paused = true)]
async fn load_more_then_show_less() {
    let (runtime, page, transport) = runtime_with(sample_payload(), scripts());
    let instance = mount(&runtime, Layout::List).await;
    assert_eq!(instance.runtime_state().display_count, 5);

    assert!(instance.load_more().await.unwrap());
    let state = instance.runtime_state();
    assert!(state.display_count > 5);
    assert_eq!(transport.requests().len(), 2);
    let container = page.container(instance.container_id()).unwrap();
    assert_eq!(
        container.find_all_by_class("plaudit-card").len(),
        state.visible_reviews().len()
    );

    instance.show_less();
    assert_eq!(instance.runtime_state().display_count, 5);
    assert_eq!(page.scrolled(), vec![instance.container_id().to_string()]);
    let container = page.container(instance.container_id()).unwrap();
    assert_eq!(container.find_all_by_class("plaudit-card").len(), 5);

    // Every review is loaded, so "Load More" stays disabled and the hidden
    // reviews come back through "Show More" without another request.
    let button = instance.runtime_state().button();
    assert!(button.disabled);
    assert!(button.show_more);
    assert!(container.find_by_class("plaudit-show-more").is_some());

    assert!(instance.show_more());
    assert_eq!(instance.runtime_state().display_count, 10);
    assert_eq!(transport.requests().len(), 2);
    assert!(!instance.show_more());
}

#[tokio::test(start_paused = true)]
async fn destroyed_instance_rejects_load_more() {
    let (runtime, _, _) = runtime_with(sample_payload(), scripts());
    let mut instance = mount(&runtime, Layout::List).await;

    instance.destroy();

    assert!(matches!(
        instance.load_more().await,
        Err(RuntimeError::Destroyed)
    ));
}
