//! Retry policy with exponential backoff.
//!
//! The policy is independent of what is being retried: it drives any
//! fallible async operation, sleeping on tokio's clock between attempts.
//! Tests run it under a paused clock to observe the backoff exactly.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use plaudit_config::{FetchSettings, LoaderSettings};
use tracing::{debug, warn};

/// How many times to retry, how long to wait, and how long one attempt may
/// take.
///
/// # Examples
///
/// ```
/// use plaudit_fetch::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(3, Duration::from_millis(100), Duration::from_secs(10));
/// assert_eq!(policy.backoff_delay(1), Duration::from_millis(100));
/// assert_eq!(policy.backoff_delay(2), Duration::from_millis(200));
/// assert_eq!(policy.backoff_delay(3), Duration::from_millis(400));
/// assert_eq!(policy.max_attempts(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Hard limit for a single attempt.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&FetchSettings::default())
    }
}

impl From<&FetchSettings> for RetryPolicy {
    fn from(settings: &FetchSettings) -> Self {
        Self::new(settings.retries, settings.base_delay(), settings.timeout())
    }
}

impl From<&LoaderSettings> for RetryPolicy {
    fn from(settings: &LoaderSettings) -> Self {
        Self::new(
            settings.retry_attempts.saturating_sub(1),
            settings.retry_delay(),
            settings.load_timeout(),
        )
    }
}

impl RetryPolicy {
    /// Creates a policy.
    #[must_use]
    pub const fn new(retries: u32, base_delay: Duration, timeout: Duration) -> Self {
        Self {
            retries,
            base_delay,
            timeout,
        }
    }

    /// A policy that tries exactly once.
    #[must_use]
    pub const fn no_retry(timeout: Duration) -> Self {
        Self::new(0, Duration::ZERO, timeout)
    }

    /// Total attempts including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Delay before retry number `retry` (1-based): `base * 2^(retry - 1)`.
    #[must_use]
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1_u32 << exponent)
    }

    /// Runs `operation` until it succeeds or the retries are exhausted.
    ///
    /// `operation` receives the 1-based attempt number. The error of the last
    /// attempt is returned when every attempt fails.
    ///
    /// # Errors
    ///
    /// Returns the last error produced by `operation`.
    pub async fn run<T, E, F, Fut>(&self, operation: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.run_while(operation, |_| true).await
    }

    /// Like [`run`](Self::run), but stops early when `retryable` returns
    /// `false` for an error.
    ///
    /// # Errors
    ///
    /// Returns the first non-retryable error, or the last error once the
    /// retries are exhausted.
    pub async fn run_while<T, E, F, Fut, R>(&self, mut operation: F, retryable: R) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
        R: Fn(&E) -> bool,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) if attempt <= self.retries && retryable(&err) => {
                    let delay = self.backoff_delay(attempt);
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts(),
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(attempt, error = %err, "giving up");
                    return Err(err);
                }
            }
        }
    }
}
