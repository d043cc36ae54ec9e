//! Fetch module for retrieving the raw feed document
//!
//! This module contains:
//! - The [`Transport`] seam and its `reqwest` implementation
//! - The bounded-retry [`Fetcher`]

mod fetcher;
#[cfg(test)]
pub(crate) mod mock;
mod transport;

pub use fetcher::Fetcher;
pub use transport::{build_http_client, HttpTransport, Transport, ACCEPT_FEED, MAX_FEED_SIZE};
