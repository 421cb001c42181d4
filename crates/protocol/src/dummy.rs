//! Sample data for previews and tests.
//!
//! This module provides a realistic widget payload so the renderer, the
//! terminal preview and the CLI can be exercised without a live endpoint.
//!
//! # Examples
//!
//! ```
//! use plaudit_protocol::dummy::sample_payload;
//!
//! let payload = sample_payload();
//! assert_eq!(payload.reviews.len(), 10);
//! // One sample review has no text and is never displayed.
//! assert_eq!(payload.displayable_reviews().len(), 9);
//! ```

use chrono::{TimeZone, Utc};
use serde_json::{Map, Value};

use crate::payload::WidgetPayload;
use crate::review::{PostedAt, RecommendationStatus, ReviewRecord, Source};

/// A builder for sample reviews.
///
/// Internal helper to keep the sample list readable.
struct ReviewBuilder {
    review: ReviewRecord,
}

impl ReviewBuilder {
    fn google(author: &str, rating: f32, content: &str) -> Self {
        let mut review = ReviewRecord::new(author, rating, content);
        review.source = Some(Source::Google);
        Self { review }
    }

    fn facebook(author: &str, status: RecommendationStatus, text: &str) -> Self {
        Self {
            review: ReviewRecord {
                author: author.to_string(),
                text: Some(text.to_string()),
                source: Some(Source::Facebook),
                recommendation_status: Some(status),
                ..ReviewRecord::default()
            },
        }
    }

    fn posted(mut self, year: i32, month: u32, day: u32) -> Self {
        self.review.posted_at = Utc
            .with_ymd_and_hms(year, month, day, 9, 0, 0)
            .single()
            .map(PostedAt::Timestamp);
        self
    }

    fn posted_relative(mut self, text: &str) -> Self {
        self.review.posted_at = Some(PostedAt::Relative(text.to_string()));
        self
    }

    fn avatar(mut self, url: &str) -> Self {
        self.review.profile_picture = Some(url.to_string());
        self
    }

    fn build(self) -> ReviewRecord {
        self.review
    }
}

/// Returns the reviews of the sample payload.
#[must_use]
pub fn sample_reviews() -> Vec<ReviewRecord> {
    vec![
        ReviewBuilder::google(
            "Maria Gonzalez",
            5.0,
            "Absolutely loved the brunch. The staff remembered our names from last time, \
             the coffee was perfect and the pastries came out of the oven while we waited. \
             We will be back next weekend with the whole family.",
        )
        .posted(2025, 1, 12)
        .avatar("https://images.example.com/avatars/maria.jpg")
        .build(),
        ReviewBuilder::google("Tom Becker", 4.0, "Great food, a bit noisy on Fridays.")
            .posted(2025, 1, 8)
            .build(),
        ReviewBuilder::facebook(
            "Aiko Tanaka",
            RecommendationStatus::Recommended,
            "Best matcha latte in town!",
        )
        .posted_relative("2 weeks ago")
        .build(),
        ReviewBuilder::google(
            "Liam O'Connor",
            5.0,
            "Booked the back room for a birthday dinner. Everything from the set menu to the \
             cake service was handled without us having to ask twice. Highly recommended for \
             groups.",
        )
        .posted(2024, 12, 20)
        .avatar("https://images.example.com/avatars/liam.jpg")
        .build(),
        ReviewBuilder::google("Priya Sharma", 3.0, "Good, but the wait was long.")
            .posted(2024, 12, 2)
            .build(),
        ReviewBuilder::google("Ghost Reviewer", 1.0, "")
            .posted(2024, 11, 30)
            .build(),
        ReviewBuilder::facebook(
            "Noah Smith",
            RecommendationStatus::NotRecommended,
            "Ordered delivery and it arrived cold.",
        )
        .posted_relative("a month ago")
        .build(),
        ReviewBuilder::google(
            "Émilie Laurent",
            5.0,
            "Service impeccable et croissants délicieux.",
        )
        .posted(2024, 11, 15)
        .build(),
        ReviewBuilder::google("Sam Lee", 4.5, "Cozy spot, friendly baristas.")
            .posted(2024, 10, 28)
            .build(),
        ReviewBuilder::google(
            "Olga Petrova",
            4.0,
            "Nice terrace in summer. Prices are fair for the portion sizes.",
        )
        .posted(2024, 10, 3)
        .build(),
    ]
}

/// Returns a sample payload for "Corner Cafe" with ten reviews, one of
/// which has no text.
#[must_use]
pub fn sample_payload() -> WidgetPayload {
    let mut settings = Map::new();
    settings.insert("platform".to_string(), Value::from("Google"));
    settings.insert("themeColor".to_string(), Value::from("#2563eb"));

    let reviews = sample_reviews();
    WidgetPayload {
        total_review_count: Some(reviews.len()),
        reviews,
        widget_settings: settings,
        business_name: Some("Corner Cafe".to_string()),
        business_url_link: Some("https://maps.example.com/corner-cafe".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_mixed_sources() {
        let reviews = sample_reviews();
        assert!(reviews.iter().any(|r| r.source == Some(Source::Facebook)));
        assert!(reviews.iter().any(|r| r.source == Some(Source::Google)));
    }

    #[test]
    fn sample_payload_round_trips_through_json() {
        let payload = sample_payload();
        let json = serde_json::to_string(&payload).expect("serialize");
        let parsed = WidgetPayload::from_json(&json).expect("deserialize");
        assert_eq!(parsed.reviews.len(), payload.reviews.len());
        assert_eq!(parsed.business_name, payload.business_name);
    }
}
