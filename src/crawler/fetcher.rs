//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured client label
//! - GET requests for queued URLs
//! - Classifying transport failures and non-success statuses
//! - Tracking fetched responses until they are released

use crate::config::HttpConfig;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Fetches a single URL
///
/// Implementations identify themselves with a fixed client label. Any error
/// means the URL is dropped by the caller; nothing is retried.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedResponse, FetchError>;
}

/// Body of a fetched page
#[derive(Debug)]
pub enum ResponseBody {
    /// Body still unread on the connection
    Stream(Response),
    /// Body already in memory
    Text(String),
}

/// A successful response waiting to be parsed
///
/// Dropping it, or consuming it with [`FetchedResponse::into_text`], releases
/// the underlying connection. Because both take the response by value the
/// release happens exactly once.
#[derive(Debug)]
pub struct FetchedResponse {
    url: Url,
    status: u16,
    body: ResponseBody,
    guard: Option<ReleaseGuard>,
}

impl FetchedResponse {
    /// Wraps a live HTTP response whose body has not been read yet
    pub fn from_http(response: Response) -> Self {
        Self {
            url: response.url().clone(),
            status: response.status().as_u16(),
            body: ResponseBody::Stream(response),
            guard: None,
        }
    }

    /// Builds a response from an in-memory document
    pub fn from_text(url: Url, status: u16, text: impl Into<String>) -> Self {
        Self {
            url,
            status,
            body: ResponseBody::Text(text.into()),
            guard: None,
        }
    }

    /// The URL the response was served from
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Counts this response as open in `gauge` until it is released
    pub fn track(&mut self, gauge: &OpenResponses) {
        self.guard = Some(gauge.acquire());
    }

    /// Reads the whole body, releasing the response
    pub async fn into_text(self) -> Result<String, FetchError> {
        let Self { url, body, guard, .. } = self;
        let text = match body {
            ResponseBody::Stream(response) => {
                response.text().await.map_err(|source| FetchError::Body {
                    url: url.to_string(),
                    source,
                })
            }
            ResponseBody::Text(text) => Ok(text),
        };
        drop(guard);
        text
    }

    /// Releases the response without reading it
    pub fn release(self) {
        tracing::trace!("Releasing response from {}", self.url);
    }
}

/// Number of fetched responses not yet released
#[derive(Debug, Clone, Default)]
pub struct OpenResponses {
    open: Arc<AtomicUsize>,
}

impl OpenResponses {
    pub fn get(&self) -> usize {
        self.open.load(Ordering::Acquire)
    }

    fn acquire(&self) -> ReleaseGuard {
        self.open.fetch_add(1, Ordering::AcqRel);
        ReleaseGuard {
            open: Arc::clone(&self.open),
        }
    }
}

#[derive(Debug)]
struct ReleaseGuard {
    open: Arc<AtomicUsize>,
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use ripple_spider::config::HttpConfig;
/// use ripple_spider::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.client_label.clone())
        .timeout(Duration::from_secs(config.request_timeout))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Fetcher`] backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedResponse, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(FetchedResponse::from_http(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config() -> HttpConfig {
        HttpConfig {
            client_label: "TestSpider 1.0".to_string(),
            request_timeout: 5,
        }
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&create_test_config()).is_ok());
    }

    #[tokio::test]
    async fn test_text_response_round_trip() {
        let response = FetchedResponse::from_text(url("http://example.com/"), 200, "<html></html>");
        assert_eq!(response.url().as_str(), "http://example.com/");
        assert_eq!(response.status(), 200);
        assert_eq!(response.into_text().await.unwrap(), "<html></html>");
    }

    #[tokio::test]
    async fn test_tracked_response_released_on_read() {
        let gauge = OpenResponses::default();
        let mut response = FetchedResponse::from_text(url("http://example.com/"), 200, "body");
        response.track(&gauge);
        assert_eq!(gauge.get(), 1);

        response.into_text().await.unwrap();
        assert_eq!(gauge.get(), 0);
    }

    #[test]
    fn test_tracked_response_released_without_read() {
        let gauge = OpenResponses::default();
        let mut first = FetchedResponse::from_text(url("http://example.com/a"), 200, "a");
        let mut second = FetchedResponse::from_text(url("http://example.com/b"), 200, "b");
        first.track(&gauge);
        second.track(&gauge);
        assert_eq!(gauge.get(), 2);

        first.release();
        assert_eq!(gauge.get(), 1);
        drop(second);
        assert_eq!(gauge.get(), 0);
    }

    #[tokio::test]
    async fn test_fetch_success_sends_client_label() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("user-agent", "TestSpider 1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<a href=\"x\">x</a>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&create_test_config()).unwrap();
        let response = fetcher
            .fetch(&url(&format!("{}/page", server.uri())))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.into_text().await.unwrap(), "<a href=\"x\">x</a>");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&create_test_config()).unwrap();
        let result = fetcher.fetch(&url(&format!("{}/missing", server.uri()))).await;

        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        let fetcher = HttpFetcher::new(&create_test_config()).unwrap();
        // Port 9 (discard) on localhost is not expected to accept connections.
        let result = fetcher.fetch(&url("http://127.0.0.1:9/")).await;

        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
