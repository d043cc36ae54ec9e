//! Bounded-retry feed fetcher
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | Source URL not configured | Immediate → MissingSource, no request |
//! | Connection refused / DNS / TLS | Retry up to `retries` times |
//! | Timeout | Retry up to `retries` times |
//! | HTTP 408, 409, 425, 429, 5xx gateway codes | Retry up to `retries` times |
//! | Any other HTTP status | Immediate → HttpStatus |
//!
//! Attempts follow each other without delay; the last failure is surfaced.

use crate::config::Config;
use crate::fetch::Transport;
use crate::FeedError;

/// Fetches the configured feed through a [`Transport`]
#[derive(Debug)]
pub struct Fetcher<T> {
    transport: T,
    url: Option<String>,
    retries: u32,
}

impl<T: Transport> Fetcher<T> {
    /// Creates a fetcher for `url` allowing `retries` additional attempts
    pub fn new(transport: T, url: Option<String>, retries: u32) -> Self {
        Self {
            transport,
            url,
            retries,
        }
    }

    /// Creates a fetcher from the process configuration
    pub fn from_config(transport: T, config: &Config) -> Self {
        Self::new(
            transport,
            config.source.url().map(str::to_string),
            config.fetch.retries,
        )
    }

    /// The source URL, if configured
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the feed body
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The raw document text
    /// * `Err(FeedError::MissingSource)` - No URL configured; nothing was sent
    /// * `Err(FeedError)` - The failure of the last attempt
    pub async fn fetch(&self) -> Result<String, FeedError> {
        let url = self.url.as_deref().ok_or(FeedError::MissingSource)?;
        let max_attempts = self.retries.saturating_add(1);
        let mut attempt = 1;

        loop {
            match self.transport.get(url).await {
                Ok(body) => {
                    tracing::debug!(url = %url, attempt = attempt, bytes = body.len(), "Feed fetched");
                    return Ok(body);
                }
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    tracing::warn!(
                        url = %url,
                        attempt = attempt,
                        max_attempts = max_attempts,
                        error = %e,
                        "Transient fetch failure, retrying"
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
