//! Text helpers shared by every layout variant.

use std::borrow::Cow;

use chrono::{DateTime, Utc};

/// Suffix appended to truncated review bodies.
pub const ELLIPSIS: &str = "...";

/// The result of truncating a review body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated<'a> {
    /// The text to display, with [`ELLIPSIS`] appended when shortened.
    pub text: Cow<'a, str>,
    /// Whether the text was shortened (and a "Read more" button is needed).
    pub truncated: bool,
}

/// Truncates `text` to at most `max_chars` characters.
///
/// Counts Unicode scalar values rather than bytes, so multi-byte text is never
/// split mid-character. When the text is shortened, trailing whitespace is
/// trimmed before [`ELLIPSIS`] is appended.
///
/// # Examples
///
/// ```
/// use plaudit_protocol::truncate;
///
/// let short = truncate("Great coffee", 20);
/// assert_eq!(short.text, "Great coffee");
/// assert!(!short.truncated);
///
/// let long = truncate("Great coffee and friendly staff", 12);
/// assert_eq!(long.text, "Great coffee...");
/// assert!(long.truncated);
/// ```
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> Truncated<'_> {
    match text.char_indices().nth(max_chars) {
        None => Truncated {
            text: Cow::Borrowed(text),
            truncated: false,
        },
        Some((cut, _)) => Truncated {
            text: Cow::Owned(format!("{}{ELLIPSIS}", text[..cut].trim_end())),
            truncated: true,
        },
    }
}

/// Formats `then` relative to `now` ("just now", "3 days ago", ...).
///
/// Timestamps in the future (clock skew) are reported as "just now".
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use plaudit_protocol::relative_time;
///
/// let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
/// assert_eq!(relative_time(now - Duration::minutes(5), now), "5 minutes ago");
/// assert_eq!(relative_time(now - Duration::days(1), now), "yesterday");
/// assert_eq!(relative_time(now - Duration::days(400), now), "1 year ago");
/// ```
#[must_use]
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days == 1 {
        "yesterday".to_string()
    } else if days < 7 {
        plural(days, "day")
    } else if days < 30 {
        plural(days / 7, "week")
    } else if days < 365 {
        plural(days / 30, "month")
    } else {
        plural(days / 365, "year")
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Returns up to two uppercase initials for an avatar placeholder.
///
/// # Examples
///
/// ```
/// use plaudit_protocol::initials;
///
/// assert_eq!(initials("ada lovelace"), "AL");
/// assert_eq!(initials("Prince"), "P");
/// assert_eq!(initials("  "), "?");
/// ```
#[must_use]
pub fn initials(author: &str) -> String {
    let letters: String = author
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}
