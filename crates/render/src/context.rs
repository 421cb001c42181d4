//! Everything a layout variant needs besides the reviews.

use chrono::{DateTime, Utc};
use plaudit_config::WidgetConfig;
use plaudit_protocol::{SourceHints, WidgetPayload};

/// Viewport width assumed when the host does not report one.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;

/// Per-render inputs shared by all variants.
///
/// Element ids are prefixed with the container id so several widgets can
/// live on one page.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// The widget configuration.
    pub config: WidgetConfig,
    /// Id of the host container the widget renders into.
    pub container_id: String,
    /// Source-detection hints from the payload settings.
    pub hints: SourceHints,
    /// Reference time for relative dates.
    pub now: DateTime<Utc>,
    /// Host viewport width in pixels.
    pub viewport_width: f32,
}

impl RenderContext {
    /// Creates a context for `payload` rendered into `container_id`.
    #[must_use]
    pub fn new(
        config: WidgetConfig,
        container_id: impl Into<String>,
        payload: &WidgetPayload,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            config,
            container_id: container_id.into(),
            hints: payload.source_hints(),
            now,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
        }
    }

    /// Sets the viewport width.
    #[must_use]
    pub const fn with_viewport_width(mut self, viewport_width: f32) -> Self {
        self.viewport_width = viewport_width;
        self
    }

    /// Builds a widget-scoped element id.
    ///
    /// ```
    /// use chrono::Utc;
    /// use plaudit_config::WidgetConfig;
    /// use plaudit_protocol::WidgetPayload;
    /// use plaudit_render::RenderContext;
    ///
    /// let ctx = RenderContext::new(WidgetConfig::new("w"), "reviews", &WidgetPayload::default(), Utc::now());
    /// assert_eq!(ctx.id("list"), "reviews-list");
    /// ```
    #[must_use]
    pub fn id(&self, suffix: &str) -> String {
        format!("{}-{suffix}", self.container_id)
    }
}
