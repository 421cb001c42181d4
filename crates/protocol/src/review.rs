//! Review records and source detection.
//!
//! A [`ReviewRecord`] is immutable, server-supplied data. Records come from
//! two families of platforms: star-rated sources (Google) and
//! recommendation-style sources (Facebook), which is why `rating` and
//! `recommendation_status` are both optional.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ProtocolError;
use crate::text::relative_time;

/// The platform a review was collected from.
///
/// # Examples
///
/// ```
/// use plaudit_protocol::Source;
///
/// assert!(Source::Google.uses_star_rating());
/// assert!(!Source::Facebook.uses_star_rating());
/// assert_eq!("Facebook".parse::<Source>().unwrap(), Source::Facebook);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Google reviews, rated with 1-5 stars.
    #[default]
    Google,
    /// Facebook recommendations, rated as recommended / not recommended.
    Facebook,
}

impl Source {
    /// Returns `true` if reviews from this source are presented with stars.
    #[must_use]
    pub const fn uses_star_rating(self) -> bool {
        matches!(self, Self::Google)
    }

    /// Returns the lowercase wire name of the source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Facebook => "facebook",
        }
    }

    /// Guesses a source from a free-form platform name such as
    /// `"Google My Business"` or `"facebook-page"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use plaudit_protocol::Source;
    ///
    /// assert_eq!(Source::from_platform_name("Google Business"), Some(Source::Google));
    /// assert_eq!(Source::from_platform_name("FB page"), Some(Source::Facebook));
    /// assert_eq!(Source::from_platform_name("Yelp"), None);
    /// ```
    #[must_use]
    pub fn from_platform_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        if name.contains("facebook") || name == "fb" || name.starts_with("fb ") {
            Some(Self::Facebook)
        } else if name.contains("google") {
            Some(Self::Google)
        } else {
            None
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "facebook" => Ok(Self::Facebook),
            _ => Err(ProtocolError::UnknownSource(s.to_string())),
        }
    }
}

/// Recommendation status for sources without star ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    /// The reviewer recommends the business.
    #[serde(alias = "positive")]
    Recommended,
    /// The reviewer does not recommend the business.
    #[serde(alias = "negative", alias = "not-recommended")]
    NotRecommended,
}

/// When a review was posted.
///
/// The endpoint sends either an RFC 3339 timestamp, epoch milliseconds, or a
/// string the scraper already formatted ("2 weeks ago").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostedAt {
    /// An absolute timestamp.
    Timestamp(DateTime<Utc>),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// A pre-formatted relative date, displayed verbatim.
    Relative(String),
}

impl PostedAt {
    /// Returns the absolute timestamp, if one is known.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            Self::EpochMillis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            Self::Relative(_) => None,
        }
    }

    /// Formats the date for display relative to `now`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use plaudit_protocol::PostedAt;
    ///
    /// let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
    /// let posted = PostedAt::Timestamp(Utc.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).unwrap());
    /// assert_eq!(posted.display(now), "3 days ago");
    ///
    /// let relative = PostedAt::Relative("a month ago".to_string());
    /// assert_eq!(relative.display(now), "a month ago");
    /// ```
    #[must_use]
    pub fn display(&self, now: DateTime<Utc>) -> String {
        match (self, self.timestamp()) {
            (Self::Relative(text), _) => text.clone(),
            (_, Some(ts)) => relative_time(ts, now),
            (_, None) => String::new(),
        }
    }
}

/// Widget-level hints used when a review does not name its own source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceHints {
    /// The business source configured for the whole widget.
    pub business_source: Option<Source>,
    /// A free-form platform name from the widget settings.
    pub platform_name: Option<String>,
}

/// A single review as served by the widget-data endpoint.
///
/// # Examples
///
/// ```
/// use plaudit_protocol::ReviewRecord;
///
/// let review: ReviewRecord = serde_json::from_str(
///     r#"{ "author": "Ada", "rating": 5, "text": "Lovely" }"#,
/// ).unwrap();
/// assert_eq!(review.body(), "Lovely");
/// assert_eq!(review.rating, Some(5.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    /// Display name of the reviewer.
    #[serde(default)]
    pub author: String,

    /// Star rating between 0 and 5, absent for recommendation-style sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,

    /// Review body. Some sources send `content`, others `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Alternative review body field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// When the review was posted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<PostedAt>,

    /// Reviewer avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,

    /// Platform the review came from. Unknown platforms decode as `None`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_source"
    )]
    pub source: Option<Source>,

    /// Recommendation status for sources without star ratings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_status: Option<RecommendationStatus>,
}

impl ReviewRecord {
    /// Creates a star-rated review, mostly useful in tests and samples.
    #[must_use]
    pub fn new(author: impl Into<String>, rating: f32, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            rating: Some(rating),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Returns the review body: `content` when it has text, else `text`,
    /// else an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use plaudit_protocol::ReviewRecord;
    ///
    /// let mut review = ReviewRecord::new("Ada", 5.0, "   ");
    /// review.text = Some("Fallback body".to_string());
    /// assert_eq!(review.body(), "Fallback body");
    /// ```
    #[must_use]
    pub fn body(&self) -> &str {
        [self.content.as_deref(), self.text.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|body| !body.is_empty())
            .unwrap_or("")
    }

    /// Returns `true` if the review has any text to display.
    ///
    /// Reviews without text are filtered out by every layout variant.
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.body().is_empty()
    }

    /// Resolves the source of this review.
    ///
    /// Resolution order: the review's own field, the widget-level business
    /// source, the widget's platform name, and finally [`Source::Google`].
    ///
    /// # Examples
    ///
    /// ```
    /// use plaudit_protocol::{ReviewRecord, Source, SourceHints};
    ///
    /// let review = ReviewRecord::new("Ada", 5.0, "Great");
    /// assert_eq!(review.resolve_source(&SourceHints::default()), Source::Google);
    ///
    /// let hints = SourceHints {
    ///     business_source: None,
    ///     platform_name: Some("Facebook Page".to_string()),
    /// };
    /// assert_eq!(review.resolve_source(&hints), Source::Facebook);
    /// ```
    #[must_use]
    pub fn resolve_source(&self, hints: &SourceHints) -> Source {
        self.source
            .or(hints.business_source)
            .or_else(|| {
                hints
                    .platform_name
                    .as_deref()
                    .and_then(Source::from_platform_name)
            })
            .unwrap_or_default()
    }

    /// Returns the rating clamped to `0..=5`, if present.
    #[must_use]
    pub fn clamped_rating(&self) -> Option<f32> {
        self.rating
            .filter(|rating| rating.is_finite())
            .map(|rating| rating.clamp(0.0, 5.0))
    }

    /// Returns `true` if the reviewer recommends the business.
    #[must_use]
    pub fn is_recommended(&self) -> bool {
        matches!(
            self.recommendation_status,
            Some(RecommendationStatus::Recommended)
        )
    }
}

/// Decodes a source name, mapping platforms we don't know to `None` rather
/// than rejecting the whole payload.
fn lenient_source<'de, D>(deserializer: D) -> Result<Option<Source>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|name| {
        name.parse::<Source>()
            .ok()
            .or_else(|| Source::from_platform_name(&name))
    }))
}
