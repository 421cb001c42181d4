//! The widget-data payload.
//!
//! This is the JSON body of
//! `GET {API_DOMAIN}/api/public/widget-data/{widgetId}`. The endpoint is an
//! external collaborator, so decoding is lenient: every field except the
//! review list is optional, and `widgetSettings` is kept as an open object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ProtocolError, Result};
use crate::review::{ReviewRecord, Source, SourceHints};

/// Widget settings keys consulted for source detection.
const BUSINESS_SOURCE_KEY: &str = "businessSource";
const PLATFORM_KEY: &str = "platform";

/// A page of reviews plus widget-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetPayload {
    /// The reviews in this page, in server order.
    #[serde(default)]
    pub reviews: Vec<ReviewRecord>,

    /// Widget settings as stored by the dashboard.
    #[serde(default)]
    pub widget_settings: Map<String, Value>,

    /// Display name of the reviewed business.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,

    /// Link to the business listing ("see all reviews").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_url_link: Option<String>,

    /// Total number of reviews the server holds for this widget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_review_count: Option<usize>,
}

impl WidgetPayload {
    /// Decodes a payload from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MalformedPayload`] if the text is not a valid
    /// payload object.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(ProtocolError::MalformedPayload)
    }

    /// Decodes a payload from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MalformedPayload`] if the value does not have
    /// the payload shape.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(ProtocolError::MalformedPayload)
    }

    /// Returns the reviews that have text to display, in order.
    ///
    /// Reviews whose `content` and `text` are both empty never reach a layout.
    #[must_use]
    pub fn displayable_reviews(&self) -> Vec<&ReviewRecord> {
        self.reviews.iter().filter(|review| review.has_text()).collect()
    }

    /// Returns `true` if there is nothing to display.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.reviews.iter().any(ReviewRecord::has_text)
    }

    /// Returns the source-detection hints carried by the widget settings.
    #[must_use]
    pub fn source_hints(&self) -> SourceHints {
        let setting = |key: &str| {
            self.widget_settings
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        SourceHints {
            business_source: setting(BUSINESS_SOURCE_KEY)
                .and_then(|name| name.parse::<Source>().ok()),
            platform_name: setting(PLATFORM_KEY),
        }
    }

    /// Returns the source that decides how the aggregate rating is shown.
    ///
    /// Uses the widget-level hints first and falls back to the first review
    /// that names its own source.
    ///
    /// # Examples
    ///
    /// ```
    /// use plaudit_protocol::{Source, WidgetPayload};
    ///
    /// let payload = WidgetPayload::from_json(
    ///     r#"{ "reviews": [], "widgetSettings": { "businessSource": "facebook" } }"#,
    /// ).unwrap();
    /// assert_eq!(payload.primary_source(), Source::Facebook);
    /// assert_eq!(WidgetPayload::default().primary_source(), Source::Google);
    /// ```
    #[must_use]
    pub fn primary_source(&self) -> Source {
        let hints = self.source_hints();
        hints
            .business_source
            .or_else(|| {
                hints
                    .platform_name
                    .as_deref()
                    .and_then(Source::from_platform_name)
            })
            .or_else(|| self.reviews.iter().find_map(|review| review.source))
            .unwrap_or_default()
    }

    /// Returns the server-reported total, or the number of loaded reviews
    /// when the server did not report one.
    #[must_use]
    pub fn total_or_loaded(&self) -> usize {
        self.total_review_count.unwrap_or(self.reviews.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> WidgetPayload {
        WidgetPayload::from_json(json).expect("valid payload")
    }

    #[test]
    fn decodes_full_payload() {
        let p = payload(
            r#"{
                "reviews": [{ "author": "A", "rating": 4, "content": "ok" }],
                "widgetSettings": { "platform": "Google" },
                "businessName": "Corner Cafe",
                "businessUrlLink": "https://maps.example.com/cafe",
                "totalReviewCount": 42
            }"#,
        );
        assert_eq!(p.reviews.len(), 1);
        assert_eq!(p.business_name.as_deref(), Some("Corner Cafe"));
        assert_eq!(p.total_review_count, Some(42));
        assert_eq!(p.total_or_loaded(), 42);
    }

    #[test]
    fn missing_fields_default() {
        let p = payload("{}");
        assert!(p.reviews.is_empty());
        assert!(p.is_empty());
        assert_eq!(p.total_or_loaded(), 0);
    }

    #[test]
    fn malformed_payload_is_reported() {
        let err = WidgetPayload::from_json(r#"{ "reviews": 12 }"#).unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedPayload(_)));
    }

    #[test]
    fn displayable_reviews_skip_empty_bodies() {
        let p = payload(
            r#"{ "reviews": [
                { "author": "A", "content": "kept" },
                { "author": "B", "content": "", "text": "" },
                { "author": "C", "text": "also kept" },
                { "author": "D" }
            ] }"#,
        );
        let authors: Vec<_> = p
            .displayable_reviews()
            .iter()
            .map(|r| r.author.as_str())
            .collect();
        assert_eq!(authors, vec!["A", "C"]);
    }

    #[test]
    fn source_hints_read_widget_settings() {
        let p = payload(
            r#"{ "widgetSettings": { "businessSource": "facebook", "platform": "Facebook Page" } }"#,
        );
        let hints = p.source_hints();
        assert_eq!(hints.business_source, Some(Source::Facebook));
        assert_eq!(hints.platform_name.as_deref(), Some("Facebook Page"));
    }

    #[test]
    fn primary_source_falls_back_to_review_field() {
        let p = payload(r#"{ "reviews": [{ "author": "A", "text": "x", "source": "facebook" }] }"#);
        assert_eq!(p.primary_source(), Source::Facebook);
    }
}
