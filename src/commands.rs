//! Subcommand implementations.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, bail};
use chrono::Utc;
use plaudit_config::persistence::default_user_config_path;
use plaudit_config::{RuntimeConfig, WidgetConfig};
use plaudit_fetch::{StaticTransport, WidgetDataClient};
use plaudit_protocol::Layout;
use plaudit_protocol::dummy::sample_payload;
use plaudit_runtime::{InitOutcome, StaticPage, WidgetRuntime, registry_for};
use plaudit_tui::terminal::{TerminalGuard, install_panic_hook};
use plaudit_tui::{App, PreviewState};
use tracing::{info, warn};

use crate::cli::WidgetArgs;
use crate::document::html_page;

impl WidgetArgs {
    /// The widget configuration these arguments describe.
    pub fn widget_config(&self) -> WidgetConfig {
        let mut config = WidgetConfig::new(self.widget_id.as_str());
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        config.theme_color.clone_from(&self.theme_color);
        config.autoplay = !self.no_autoplay;
        config
    }

    /// A data client over the API, or over the sample reviews.
    pub fn client(&self, runtime: &RuntimeConfig) -> anyhow::Result<WidgetDataClient> {
        if self.sample {
            return Ok(WidgetDataClient::new(
                Arc::new(StaticTransport::new(sample_payload())),
                runtime,
            ));
        }
        WidgetDataClient::http(runtime).context("failed to build HTTP client")
    }
}

/// Renders one widget into a standalone HTML page.
///
/// A failed load still produces a page holding the inline error block; only
/// an unusable configuration is an error.
pub async fn render_page(
    runtime_config: &RuntimeConfig,
    client: WidgetDataClient,
    widget: WidgetConfig,
    viewport_width: f32,
) -> anyhow::Result<String> {
    let page = StaticPage::new(viewport_width);
    let registry = registry_for(runtime_config, &page);
    let page = Arc::new(page.with_modules(registry));
    let runtime = WidgetRuntime::new(page.clone(), page.clone(), client, runtime_config);
    let title = format!("Reviews for {}", widget.widget_id);

    let outcome = runtime.init(widget).await;
    let container_id = match &outcome {
        InitOutcome::Aborted(err) => bail!("widget configuration rejected: {err}"),
        InitOutcome::Failed { error, .. } => {
            warn!(error = %error, "widget failed to load, rendering error block");
            outcome.container_id()
        }
        InitOutcome::Empty { .. } => {
            info!("widget has no displayable reviews");
            outcome.container_id()
        }
        InitOutcome::Rendered(instance) => Some(instance.container_id()),
    };
    let Some(html) = container_id.and_then(|id| page.container_html(id)) else {
        bail!("widget produced no container");
    };
    Ok(html_page(&title, &[html]))
}

pub async fn render(
    runtime_config: &RuntimeConfig,
    widget: &WidgetArgs,
    viewport_width: f32,
    output: Option<&Path>,
    open_in_browser: bool,
) -> anyhow::Result<()> {
    let client = widget.client(runtime_config)?;
    let html = render_page(runtime_config, client, widget.widget_config(), viewport_width).await?;

    match output {
        Some(path) => {
            std::fs::write(path, html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "page written");
            if open_in_browser {
                open::that(path).with_context(|| format!("failed to open {}", path.display()))?;
            }
        }
        None => print!("{html}"),
    }
    Ok(())
}

pub async fn preview(runtime_config: &RuntimeConfig, widget: &WidgetArgs) -> anyhow::Result<()> {
    let mut config = widget.widget_config();
    config.layout = Layout::Carousel;
    config.validate()?;

    let client = widget.client(runtime_config)?;
    let page_size = Layout::Carousel.page_size();
    let payload = client
        .fetch_page(&config.widget_id, Layout::Carousel, 0, page_size.initial)
        .await
        .context("failed to fetch reviews")?;
    if payload.is_empty() {
        bail!("widget {} has no reviews to preview", config.widget_id);
    }

    install_panic_hook();
    let mut terminal = TerminalGuard::new()?;
    let columns = terminal.size()?.width;
    let state = PreviewState::new(&payload, config, columns, Instant::now(), Utc::now());
    let mut app = App::new(state);

    let result = app.run(&mut terminal).await;
    terminal.restore()?;
    result
}

pub fn show_config(runtime_config: &RuntimeConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(runtime_config)?);
    Ok(())
}

pub fn init_config(force: bool) -> anyhow::Result<()> {
    let path = default_user_config_path()?;
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    RuntimeConfig::default().save_to(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_client(config: &RuntimeConfig) -> WidgetDataClient {
        WidgetDataClient::new(Arc::new(StaticTransport::new(sample_payload())), config)
    }

    #[tokio::test(start_paused = true)]
    async fn renders_sample_carousel() {
        let config = RuntimeConfig::default();
        let html = render_page(&config, sample_client(&config), WidgetConfig::new("sample"), 1280.0)
            .await
            .unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("plaudit-carousel"));
        assert!(html.contains("Corner Cafe"));
        assert!(html.contains("Maria Gonzalez"));
        assert!(!html.contains("Ghost Reviewer"));
    }

    #[tokio::test(start_paused = true)]
    async fn renders_requested_layout() {
        let config = RuntimeConfig::default();
        let mut widget = WidgetConfig::new("sample");
        widget.layout = Layout::List;
        let html = render_page(&config, sample_client(&config), widget, 800.0).await.unwrap();
        assert!(html.contains("plaudit-load-more"));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_widget_id_is_rejected() {
        let config = RuntimeConfig::default();
        let err = render_page(&config, sample_client(&config), WidgetConfig::new(""), 1280.0)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("rejected"));
    }

    #[test]
    fn widget_args_map_to_config() {
        let args = WidgetArgs {
            widget_id: "w_9".to_string(),
            layout: Some(Layout::Badge),
            theme_color: Some("#ff0066".to_string()),
            no_autoplay: true,
            sample: true,
        };
        let config = args.widget_config();
        assert_eq!(config.widget_id, "w_9");
        assert_eq!(config.layout, Layout::Badge);
        assert_eq!(config.theme_color.as_deref(), Some("#ff0066"));
        assert!(!config.autoplay);
    }
}
