//! Widget initialization outcomes.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeScripts, ScriptBehavior, runtime_with};
use plaudit_config::{ConfigError, RuntimeConfig, WidgetConfig};
use plaudit_fetch::{StaticTransport, WidgetDataClient};
use plaudit_protocol::dummy::sample_payload;
use plaudit_protocol::{Layout, WidgetPayload};
use plaudit_runtime::{
    HostPage, InitError, InitOutcome, LoadError, ModuleRegistry, StaticPage, WidgetRuntime,
};

fn scripts() -> Arc<FakeScripts> {
    Arc::new(FakeScripts::new(Duration::from_millis(20)))
}

#[tokio::test(start_paused = true)]
async fn bare_widget_id_renders_into_a_new_container() {
    let (runtime, page, transport) = runtime_with(sample_payload(), scripts());

    let outcome = runtime.init("w_1").await;

    let InitOutcome::Rendered(instance) = outcome else {
        panic!("expected a rendered widget, got {outcome:?}");
    };
    assert_eq!(instance.layout(), Layout::Carousel);
    assert_eq!(page.container_ids(), vec![instance.container_id().to_string()]);
    let container = page.container(instance.container_id()).unwrap();
    assert_eq!(container.find_all_by_class("plaudit-card").len(), 9);
    assert_eq!(
        transport.requests(),
        vec![
            "https://api.plaudit.app/api/public/widget-data/w_1?limit=20&offset=0&layout=carousel"
                .to_string()
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn explicit_container_is_used() {
    let (runtime, page, _) = runtime_with(sample_payload(), scripts());
    page.add_container("reviews");

    let mut config = WidgetConfig::new("w_1");
    config.container_id = Some("reviews".to_string());
    config.layout = Layout::List;
    let instance = runtime.init(config).await.into_instance().unwrap();

    assert_eq!(instance.container_id(), "reviews");
    assert_eq!(page.container_ids(), vec!["reviews".to_string()]);
    assert!(page.container_html("reviews").unwrap().contains("plaudit-load-more"));
}

#[tokio::test(start_paused = true)]
async fn two_embeds_get_distinct_containers() {
    let (runtime, page, _) = runtime_with(sample_payload(), scripts());

    let (a, b) = tokio::join!(runtime.init("w_1"), runtime.init("w_1"));

    assert_ne!(a.container_id(), b.container_id());
    assert_eq!(page.container_ids().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn attributes_configure_the_widget() {
    let (runtime, page, transport) = runtime_with(sample_payload(), scripts());
    page.add_container("wall");

    let outcome = runtime
        .init_from_attributes([
            ("data-widget-id", "w_9"),
            ("data-container-id", "wall"),
            ("data-layout", "grid"),
        ])
        .await;

    assert_eq!(outcome.container_id(), Some("wall"));
    assert!(transport.requests()[0].ends_with("layout=grid"));
}

#[tokio::test(start_paused = true)]
async fn missing_widget_id_aborts() {
    let (runtime, page, _) = runtime_with(sample_payload(), scripts());

    let outcome = runtime.init_from_attributes([("data-layout", "grid")]).await;

    assert!(matches!(outcome, InitOutcome::Aborted(ConfigError::MissingWidgetId)));
    assert!(page.container_ids().is_empty());
}

#[tokio::test(start_paused = true)]
async fn unknown_container_aborts() {
    let (runtime, page, transport) = runtime_with(sample_payload(), scripts());

    let mut config = WidgetConfig::new("w_1");
    config.container_id = Some("nowhere".to_string());
    let outcome = runtime.init(config).await;

    assert!(matches!(
        outcome,
        InitOutcome::Aborted(ConfigError::ContainerNotFound(ref id)) if id == "nowhere"
    ));
    assert!(page.container_ids().is_empty());
    assert!(transport.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn no_displayable_reviews_renders_empty_state() {
    let (runtime, page, _) = runtime_with(WidgetPayload::default(), scripts());

    let outcome = runtime.init("w_1").await;

    let InitOutcome::Empty { container_id } = outcome else {
        panic!("expected the empty state, got {outcome:?}");
    };
    assert!(page.container_html(&container_id).unwrap().contains("plaudit-empty"));
}

#[tokio::test(start_paused = true)]
async fn broken_variant_falls_back_to_carousel() {
    let scripts = Arc::new(
        FakeScripts::new(Duration::ZERO).with_script("masonry.js", ScriptBehavior::Error),
    );
    let (runtime, _, transport) = runtime_with(sample_payload(), scripts);

    let mut config = WidgetConfig::new("w_1");
    config.layout = Layout::Masonry;
    let instance = runtime.init(config).await.into_instance().unwrap();

    assert_eq!(instance.layout(), Layout::Carousel);
    assert!(instance.carousel_view().is_some());
    assert!(transport.requests()[0].ends_with("layout=carousel"));
}

#[tokio::test(start_paused = true)]
async fn failure_renders_error_block_and_retry_recovers() {
    let scripts = Arc::new(
        FakeScripts::new(Duration::ZERO).with_script("carousel.js", ScriptBehavior::Error),
    );
    let (runtime, page, transport) = runtime_with(sample_payload(), scripts.clone());

    let outcome = runtime.init("w_1").await;

    let InitOutcome::Failed { config, error } = outcome else {
        panic!("expected a failure, got {outcome:?}");
    };
    assert!(matches!(error, InitError::Load(LoadError::Injection { .. })));
    let container_id = config.container_id.clone().unwrap();
    let html = page.container_html(&container_id).unwrap();
    assert!(html.contains("plaudit-retry"));
    assert!(transport.requests().is_empty());

    // The module shows up later, e.g. after a flaky CDN recovers.
    scripts.register_export("PlauditCarouselWidget");
    let instance = runtime.retry(*config).await.into_instance().unwrap();

    assert_eq!(instance.container_id(), container_id);
    assert_eq!(page.container_ids().len(), 1);
    let html = page.container_html(&container_id).unwrap();
    assert!(!html.contains("plaudit-retry"));
    assert!(html.contains("plaudit-card"));
    assert!(page.has_container(&container_id));
}

async fn grid_scripts_on(page: StaticPage) -> Vec<String> {
    let config = RuntimeConfig::default();
    let page = Arc::new(page.with_modules(ModuleRegistry::new("https://staging.plaudit.app")));
    let client = WidgetDataClient::new(Arc::new(StaticTransport::new(sample_payload())), &config);
    let runtime = WidgetRuntime::new(page.clone(), page.clone(), client, &config);

    let mut widget = WidgetConfig::new("w_1");
    widget.layout = Layout::Grid;
    let outcome = runtime.init(widget).await;

    assert!(matches!(outcome, InitOutcome::Rendered(_)), "got {outcome:?}");
    page.injected_scripts()
}

#[tokio::test(start_paused = true)]
async fn modules_load_from_the_loader_script_origin() {
    let page = StaticPage::new(1280.0)
        .with_loader_script("https://staging.plaudit.app/plaudit-widget.js?v=7");

    assert_eq!(
        grid_scripts_on(page).await,
        vec!["https://staging.plaudit.app/widgets/grid.js".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn modules_load_from_a_loader_tag_among_page_scripts() {
    let page = StaticPage::new(1280.0);
    page.add_script("https://cdn.other.com/jquery.js");
    page.add_script("https://staging.plaudit.app/plaudit-widget.js");

    assert_eq!(
        grid_scripts_on(page).await,
        vec!["https://staging.plaudit.app/widgets/grid.js".to_string()]
    );
}
