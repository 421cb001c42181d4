//! Error types for widget data fetching.
//!
//! Every variant except [`FetchError::Payload`] is a network-level failure
//! that the retry policy retries.

use std::time::Duration;

use plaudit_protocol::ProtocolError;

/// Errors that can occur while fetching widget data.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request did not complete within the timeout.
    #[error("request to {url} timed out after {}ms", .timeout.as_millis())]
    Timeout {
        /// The requested URL.
        url: String,
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// The server answered with a non-2xx status.
    #[error("request to {url} failed with HTTP {status}")]
    Status {
        /// The requested URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The request could not be sent or the response could not be read.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// The requested URL.
        url: String,
        /// The transport's description of the failure.
        message: String,
    },

    /// The response body was not JSON.
    #[error("response from {url} is not valid JSON: {source}")]
    InvalidJson {
        /// The requested URL.
        url: String,
        /// The parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The response was JSON but not a widget payload.
    #[error("invalid widget payload: {0}")]
    Payload(#[from] ProtocolError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// Returns `true` for failures worth retrying.
    ///
    /// # Examples
    ///
    /// ```
    /// use plaudit_fetch::FetchError;
    ///
    /// let err = FetchError::Status { url: "https://x".into(), status: 503 };
    /// assert!(err.is_retryable());
    /// ```
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Status { .. } | Self::Transport { .. } | Self::InvalidJson { .. }
        )
    }
}

/// A specialized Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
