//! Integration tests across the config, fetch and runtime crates.

use std::fs;
use std::sync::Arc;

use plaudit_config::{RuntimeConfig, WidgetConfig};
use plaudit_fetch::{StaticTransport, WidgetDataClient};
use plaudit_protocol::Layout;
use plaudit_protocol::dummy::sample_payload;
use plaudit_runtime::{InitOutcome, StaticPage, WidgetRuntime, registry_for};
use tempfile::TempDir;

#[test]
fn config_load_from_json5_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("plaudit.json5");

    fs::write(
        &config_path,
        r#"
        {
            // Local API during development
            api_domain: "http://localhost:3000/",
            asset_origin: "http://localhost:5173",
            fetch: { timeout_ms: 5000, retries: 1 },
            loader: { retry_attempts: 2 },
            default_layout: "grid",
        }
        "#,
    )
    .unwrap();

    let config = RuntimeConfig::load_from(&config_path).unwrap();

    assert_eq!(config.api_domain, "http://localhost:3000");
    assert_eq!(config.asset_origin.as_deref(), Some("http://localhost:5173"));
    assert_eq!(config.fetch.timeout_ms, 5000);
    assert_eq!(config.fetch.retries, 1);
    assert_eq!(config.fetch.base_delay_ms, 1000);
    assert_eq!(config.loader.retry_attempts, 2);
    assert_eq!(config.loader.grace_ms, 100);
    assert_eq!(config.default_layout, Layout::Grid);
}

#[test]
fn config_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("nested").join("config.json");

    let mut original = RuntimeConfig::default();
    original.api_domain = "https://reviews.example.com".to_string();
    original.default_layout = Layout::List;
    original.save_to(&config_path).unwrap();

    let loaded = RuntimeConfig::load_from(&config_path).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn invalid_settings_are_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("plaudit.json5");
    fs::write(&config_path, "{ loader: { retry_attempts: 0 } }").unwrap();

    assert!(RuntimeConfig::load_from(&config_path).is_err());
}

#[tokio::test(start_paused = true)]
async fn configured_origin_serves_variant_modules() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("plaudit.json5");
    fs::write(&config_path, r#"{ asset_origin: "https://cdn.example.com" }"#).unwrap();
    let config = RuntimeConfig::load_from(&config_path).unwrap();

    let page = StaticPage::new(1280.0);
    let registry = registry_for(&config, &page);
    let page = Arc::new(page.with_modules(registry));
    let transport = Arc::new(StaticTransport::new(sample_payload()));
    let client = WidgetDataClient::new(transport.clone(), &config);
    let runtime = WidgetRuntime::new(page.clone(), page.clone(), client, &config);

    let mut widget = WidgetConfig::new("w_cafe");
    widget.layout = Layout::Grid;
    let outcome = runtime.init(widget).await;

    let InitOutcome::Rendered(instance) = outcome else {
        panic!("expected a rendered widget, got {outcome:?}");
    };
    assert_eq!(instance.layout(), Layout::Grid);
    assert_eq!(
        page.injected_scripts(),
        vec!["https://cdn.example.com/widgets/grid.js".to_string()]
    );
    assert_eq!(
        transport.requests(),
        vec![format!(
            "{}/api/public/widget-data/w_cafe?limit=20&offset=0&layout=grid",
            config.api_domain
        )]
    );
}
