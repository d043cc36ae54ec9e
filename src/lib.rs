//! Feedrelay: a tolerant RSS relay
//!
//! This crate fetches a remote syndication feed, parses it into a generic
//! tree, extracts a stable item schema with per-field fallbacks, sanitizes
//! descriptions, orders items newest first and reports the outcome as a
//! well-formed envelope, even when something along the way fails.

pub mod config;
pub mod feed;
pub mod fetch;
pub mod output;
pub mod server;
pub mod service;

use thiserror::Error;

/// Main error type for Feedrelay operations
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Feed source URL is not configured")]
    MissingSource,

    #[error("fetch failed for {url}: {message}")]
    Unreachable { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("XML parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// Returns true if another attempt could plausibly succeed
    ///
    /// Connectivity failures, timeouts and the usual "try again" status codes
    /// are transient. Everything else fails on the first attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Unreachable { .. } | Self::Timeout { .. } => true,
            Self::HttpStatus { status, .. } => {
                matches!(status, 408 | 409 | 425 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Feedrelay operations
pub type Result<T> = std::result::Result<T, FeedError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use feed::{process_document, FeedItem, GenericNode};
pub use output::FeedResult;
pub use service::FeedService;
