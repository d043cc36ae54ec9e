//! The feed operation
//!
//! [`FeedService`] ties the stages together: fetch → parse → extract →
//! sanitize → order → report. It holds no per-request state, so one instance
//! can serve any number of concurrent, fully independent requests.

use crate::config::Config;
use crate::feed::{process_document, FeedItem};
use crate::fetch::{Fetcher, HttpTransport, Transport};
use crate::output::{report, FeedResult};
use crate::FeedError;

/// Runs the feed pipeline against one configured source
#[derive(Debug)]
pub struct FeedService<T = HttpTransport> {
    fetcher: Fetcher<T>,
}

impl FeedService<HttpTransport> {
    /// Builds the production service (HTTP transport) from configuration
    ///
    /// A missing source URL is not an error here; every request will report it.
    pub fn from_config(config: &Config) -> Result<Self, FeedError> {
        let transport = HttpTransport::new(&config.fetch, &config.user_agent)?;
        Ok(Self::new(Fetcher::from_config(transport, config)))
    }
}

impl<T: Transport> FeedService<T> {
    pub fn new(fetcher: Fetcher<T>) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &Fetcher<T> {
        &self.fetcher
    }

    /// Fetches and processes the feed, surfacing the first failure
    pub async fn run(&self) -> Result<Vec<FeedItem>, FeedError> {
        let body = self.fetcher.fetch().await?;
        process_document(&body)
    }

    /// Fetches and processes the feed, always producing an envelope
    pub async fn load(&self) -> FeedResult {
        match self.fetcher.url() {
            Some(url) => tracing::info!(url = %url, "Fetching feed"),
            None => tracing::error!("Feed URL is not configured"),
        }

        let outcome = self.run().await;

        match &outcome {
            Ok(items) => tracing::info!(items = items.len(), "Feed fetched successfully"),
            Err(FeedError::MissingSource) => {}
            Err(e) => tracing::error!(error = %e, "Feed request failed"),
        }

        report(outcome)
    }
}
