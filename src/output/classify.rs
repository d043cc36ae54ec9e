//! Failure classification
//!
//! Maps a pipeline failure onto one of four user-facing messages.

use crate::config::ENV_SOURCE_URL;
use crate::FeedError;

/// Shown when the request timed out
pub const TIMEOUT_MESSAGE: &str = "Fetching the feed timed out, please try again later";

/// Shown when the source could not be reached
pub const UNREACHABLE_MESSAGE: &str =
    "The feed source is unreachable, check the network connection and the feed URL";

/// Message shown when no source URL is configured
pub fn missing_source_message() -> String {
    format!(
        "Feed URL is not configured, set {} in the environment or `url` under [source] in the config file",
        ENV_SOURCE_URL
    )
}

/// Picks the user-facing message for a failure
///
/// | Failure | Message |
/// |---------|---------|
/// | `MissingSource` | configure the source |
/// | `Unreachable` | source unreachable |
/// | `Timeout` | timed out, retry later |
/// | anything else | generic, with the error text |
pub fn classify(error: &FeedError) -> String {
    match error {
        FeedError::MissingSource => missing_source_message(),
        FeedError::Unreachable { .. } => UNREACHABLE_MESSAGE.to_string(),
        FeedError::Timeout { .. } => TIMEOUT_MESSAGE.to_string(),
        other => format!("Failed to fetch feed: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source() {
        let message = classify(&FeedError::MissingSource);
        assert!(message.contains("RSS_URL"));
    }

    #[test]
    fn test_unreachable() {
        let error = FeedError::Unreachable {
            url: "https://example.com/rss.xml".to_string(),
            message: "dns error".to_string(),
        };
        assert_eq!(classify(&error), UNREACHABLE_MESSAGE);
    }

    #[test]
    fn test_timeout() {
        let error = FeedError::Timeout {
            url: "https://example.com/rss.xml".to_string(),
        };
        assert_eq!(classify(&error), TIMEOUT_MESSAGE);
    }

    #[test]
    fn test_other_failures_carry_description() {
        let message = classify(&FeedError::Parse("unclosed element <rss>".to_string()));
        assert_eq!(
            message,
            "Failed to fetch feed: XML parse error: unclosed element <rss>"
        );

        let message = classify(&FeedError::HttpStatus {
            url: "https://example.com/rss.xml".to_string(),
            status: 404,
        });
        assert!(message.starts_with("Failed to fetch feed: "));
        assert!(message.contains("404"));
    }
}
