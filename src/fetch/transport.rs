//! HTTP transport implementation
//!
//! A transport performs exactly one GET attempt. Retry policy lives in the
//! [`Fetcher`](super::Fetcher), so anything implementing [`Transport`] can be
//! swapped in (tests count attempts this way).

use crate::config::{FetchConfig, UserAgentConfig};
use crate::FeedError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL};
use reqwest::Client;

/// Accept header sent with every feed request
pub const ACCEPT_FEED: &str = "application/rss+xml, application/xml, text/xml, */*";

/// Largest response body accepted (10MB)
pub const MAX_FEED_SIZE: usize = 10 * 1024 * 1024;

/// A single-attempt source of feed documents
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Performs one GET of `url` and returns the body as text
    async fn get(&self, url: &str) -> Result<String, FeedError>;
}

/// Builds an HTTP client with the feed headers and timeouts applied
///
/// # Arguments
///
/// * `fetch` - Timeout settings
/// * `user_agent` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use feedrelay::config::{FetchConfig, UserAgentConfig};
/// use feedrelay::fetch::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    fetch: &FetchConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_FEED));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    Client::builder()
        .user_agent(user_agent.header_value())
        .default_headers(headers)
        .timeout(fetch.timeout())
        .connect_timeout(fetch.timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport from the fetch and user agent settings
    pub fn new(fetch: &FetchConfig, user_agent: &UserAgentConfig) -> Result<Self, FeedError> {
        let client =
            build_http_client(fetch, user_agent).map_err(|e| FeedError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, FeedError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Fast path: check Content-Length header
        if let Some(len) = response.content_length() {
            if len > MAX_FEED_SIZE as u64 {
                return Err(FeedError::Client(format!(
                    "Response too large: {} bytes",
                    len
                )));
            }
        }

        read_capped_body(response, url).await
    }
}

/// Reads the body chunk by chunk, giving up as soon as it exceeds [`MAX_FEED_SIZE`]
///
/// Covers chunked responses, which carry no Content-Length to check up front.
async fn read_capped_body(mut response: reqwest::Response, url: &str) -> Result<String, FeedError> {
    let mut body = Vec::new();

    while let Some(chunk) = response.chunk().await.map_err(|e| classify_error(url, e))? {
        if body.len() + chunk.len() > MAX_FEED_SIZE {
            return Err(FeedError::Client(format!(
                "Response too large: more than {} bytes",
                MAX_FEED_SIZE
            )));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Maps a `reqwest` failure onto the fetch taxonomy
fn classify_error(url: &str, e: reqwest::Error) -> FeedError {
    if e.is_timeout() {
        FeedError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() || e.is_request() || e.is_body() {
        FeedError::Unreachable {
            url: url.to_string(),
            message: e.to_string(),
        }
    } else {
        FeedError::Client(e.to_string())
    }
}
