//! The widget-data client.
//!
//! This module provides [`WidgetDataClient`], which builds widget-data URLs,
//! runs requests through a [`RetryPolicy`] with a hard per-attempt timeout,
//! decodes payloads and caches pages.

use std::sync::Arc;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use plaudit_config::RuntimeConfig;
use plaudit_protocol::{Layout, WidgetPayload};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::cache::{PageCache, PageKey};
use crate::error::{FetchError, Result};
use crate::retry::RetryPolicy;
use crate::transport::{HttpTransport, Transport};

/// Characters left unescaped in the widget id path segment (RFC 3986
/// unreserved set).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Client for `GET {api}/api/public/widget-data/{widgetId}`.
///
/// The client never mutates widget state; callers decide what to do with
/// the pages it returns.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use plaudit_config::RuntimeConfig;
/// use plaudit_fetch::{StaticTransport, WidgetDataClient};
/// use plaudit_protocol::{Layout, dummy::sample_payload};
///
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// let transport = Arc::new(StaticTransport::new(sample_payload()));
/// let client = WidgetDataClient::new(transport.clone(), &RuntimeConfig::default());
///
/// let page = client.fetch_page("w_1", Layout::List, 0, 5).await.unwrap();
/// assert_eq!(page.reviews.len(), 5);
///
/// // The second request for the same page is served from the cache.
/// client.fetch_page("w_1", Layout::List, 0, 5).await.unwrap();
/// assert_eq!(transport.requests().len(), 1);
/// # });
/// ```
pub struct WidgetDataClient {
    transport: Arc<dyn Transport>,
    api_domain: String,
    policy: RetryPolicy,
    cache: PageCache,
}

impl std::fmt::Debug for WidgetDataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetDataClient")
            .field("api_domain", &self.api_domain)
            .field("policy", &self.policy)
            .field("cached_pages", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl WidgetDataClient {
    /// Creates a client over any transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, config: &RuntimeConfig) -> Self {
        Self {
            transport,
            api_domain: config.api_domain.trim_end_matches('/').to_string(),
            policy: RetryPolicy::from(&config.fetch),
            cache: PageCache::default(),
        }
    }

    /// Creates a client that talks HTTP through `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built.
    pub fn http(config: &RuntimeConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.fetch.timeout())?;
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the retry policy in use.
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Returns the page cache.
    #[must_use]
    pub const fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Builds the widget-data URL for a page.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use plaudit_config::RuntimeConfig;
    /// use plaudit_fetch::{StaticTransport, WidgetDataClient};
    /// use plaudit_protocol::Layout;
    /// use plaudit_protocol::dummy::sample_payload;
    ///
    /// let transport = Arc::new(StaticTransport::new(sample_payload()));
    /// let client = WidgetDataClient::new(transport, &RuntimeConfig::default());
    /// assert_eq!(
    ///     client.widget_data_url("acme/reviews 1", Layout::Grid, 20, 40),
    ///     "https://api.plaudit.app/api/public/widget-data/acme%2Freviews%201?limit=20&offset=40&layout=grid",
    /// );
    /// ```
    #[must_use]
    pub fn widget_data_url(
        &self,
        widget_id: &str,
        layout: Layout,
        limit: usize,
        offset: usize,
    ) -> String {
        let id = utf8_percent_encode(widget_id, PATH_SEGMENT);
        format!(
            "{}/api/public/widget-data/{id}?limit={limit}&offset={offset}&layout={layout}",
            self.api_domain
        )
    }

    /// GETs `url` as JSON, retrying timeouts, transport failures, non-2xx
    /// statuses and unparsable bodies.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt once the retries are exhausted.
    #[instrument(skip(self))]
    pub async fn fetch_with_retry(&self, url: &str) -> Result<Value> {
        let timeout = self.policy.timeout;
        self.policy
            .run_while(
                |attempt| async move {
                    debug!(attempt, "sending request");
                    let response = tokio::time::timeout(timeout, self.transport.get(url))
                        .await
                        .map_err(|_| FetchError::Timeout {
                            url: url.to_string(),
                            timeout,
                        })??;

                    if !response.is_success() {
                        return Err(FetchError::Status {
                            url: url.to_string(),
                            status: response.status,
                        });
                    }

                    serde_json::from_str::<Value>(&response.body).map_err(|source| {
                        FetchError::InvalidJson {
                            url: url.to_string(),
                            source,
                        }
                    })
                },
                FetchError::is_retryable,
            )
            .await
    }

    /// Fetches and decodes one page of widget data, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns a network error after the retries are exhausted, or
    /// [`FetchError::Payload`] if the response is not a widget payload.
    #[instrument(skip(self))]
    pub async fn fetch_widget_data(
        &self,
        widget_id: &str,
        layout: Layout,
        limit: usize,
        offset: usize,
    ) -> Result<WidgetPayload> {
        let url = self.widget_data_url(widget_id, layout, limit, offset);
        let value = self.fetch_with_retry(&url).await?;
        let payload = WidgetPayload::from_value(value)?;
        debug!(
            reviews = payload.reviews.len(),
            total = ?payload.total_review_count,
            "fetched widget data"
        );
        Ok(payload)
    }

    /// Fetches one page, serving repeated requests from the page cache.
    ///
    /// A cache hit performs no network call. Failed fetches are not cached.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_widget_data`](Self::fetch_widget_data).
    pub async fn fetch_page(
        &self,
        widget_id: &str,
        layout: Layout,
        offset: usize,
        limit: usize,
    ) -> Result<WidgetPayload> {
        let key = PageKey::new(widget_id, offset, limit);
        if let Some(page) = self.cache.get(&key) {
            debug!(widget_id, offset, limit, "page served from cache");
            return Ok(page);
        }

        let page = self
            .fetch_widget_data(widget_id, layout, limit, offset)
            .await?;
        self.cache.insert(key, page.clone());
        Ok(page)
    }
}
