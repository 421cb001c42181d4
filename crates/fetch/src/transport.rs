//! Transports: the seam between the fetcher and the network.
//!
//! A [`Transport`] performs one GET and reports the status and body. It
//! knows nothing about retries or timeouts; [`WidgetDataClient`] layers
//! those on top.
//!
//! [`WidgetDataClient`]: crate::WidgetDataClient

#[cfg(any(test, feature = "test-util"))]
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use plaudit_protocol::WidgetPayload;
use tracing::debug;

use crate::error::{FetchError, Result};

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// A `200 OK` response with a body.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Performs a single HTTP GET.
pub trait Transport: Send + Sync {
    /// Requests `url` and resolves with the response, whatever its status.
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse>>;
}

/// A [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a connect timeout.
    ///
    /// The per-request timeout is enforced by the retry layer, not here.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the TLS backend fails to initialize.
    pub fn new(connect_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(concat!("plaudit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse>> {
        async move {
            let transport_error = |err: reqwest::Error| FetchError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            };

            let response = self
                .client
                .get(url)
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await
                .map_err(transport_error)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(transport_error)?;
            debug!(url, status, bytes = body.len(), "received response");

            Ok(HttpResponse { status, body })
        }
        .boxed()
    }
}

/// A [`Transport`] that serves pages of a fixed payload.
///
/// Honors the `limit` and `offset` query parameters the way the widget-data
/// endpoint does, so pagination behaves as it would against the server.
/// Records every requested URL.
///
/// # Examples
///
/// ```
/// use plaudit_fetch::{StaticTransport, Transport};
/// use plaudit_protocol::dummy::sample_payload;
///
/// let transport = StaticTransport::new(sample_payload());
/// let url = "https://api.plaudit.app/api/public/widget-data/w?limit=2&offset=0";
/// let response = futures::executor::block_on(transport.get(url)).unwrap();
///
/// assert!(response.body.contains("Maria Gonzalez"));
/// assert_eq!(transport.requests(), vec![url.to_string()]);
/// ```
#[derive(Debug)]
pub struct StaticTransport {
    payload: WidgetPayload,
    latency: Duration,
    requests: Mutex<Vec<String>>,
}

impl StaticTransport {
    /// Creates a transport serving `payload`.
    #[must_use]
    pub fn new(payload: WidgetPayload) -> Self {
        Self {
            payload,
            latency: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Delays every response by `latency`, like a slow network.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Returns the URLs requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn page(&self, url: &str) -> Result<HttpResponse> {
        let offset = query_param(url, "offset").unwrap_or(0);
        let limit = query_param(url, "limit").unwrap_or(usize::MAX);

        let mut page = self.payload.clone();
        page.total_review_count = Some(self.payload.total_or_loaded());
        page.reviews = self
            .payload
            .reviews
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        let body = serde_json::to_string(&page).map_err(|err| FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        })?;
        Ok(HttpResponse::ok(body))
    }
}

impl Transport for StaticTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
        if self.latency.is_zero() {
            return futures::future::ready(self.page(url)).boxed();
        }
        let latency = self.latency;
        async move {
            tokio::time::sleep(latency).await;
            self.page(url)
        }
        .boxed()
    }
}

/// One scripted reaction of a [`ScriptedTransport`].
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// Answer with this response.
    Respond(HttpResponse),
    /// Fail at the transport level with this message.
    Fail(String),
    /// Never answer; the request can only end by timing out.
    Hang,
}

/// A [`Transport`] that replays a fixed script, one step per request.
///
/// Once the script runs out every request fails. Useful for driving the
/// retry and timeout paths in tests. Requires the `test-util` feature.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<ScriptStep>>,
    calls: Mutex<Vec<String>>,
}

#[cfg(any(test, feature = "test-util"))]
impl ScriptedTransport {
    /// Creates a transport that replays `steps` in order.
    #[must_use]
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of requests made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// URLs requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(any(test, feature = "test-util"))]
impl Transport for ScriptedTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
        let step = self
            .steps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| ScriptStep::Fail("script exhausted".to_string()));

        match step {
            ScriptStep::Respond(response) => futures::future::ready(Ok(response)).boxed(),
            ScriptStep::Fail(message) => futures::future::ready(Err(FetchError::Transport {
                url: url.to_string(),
                message,
            }))
            .boxed(),
            ScriptStep::Hang => futures::future::pending::<Result<HttpResponse>>().boxed(),
        }
    }
}

/// Reads a numeric query parameter from a URL.
fn query_param(url: &str, name: &str) -> Option<usize> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| value.parse().ok())
}
