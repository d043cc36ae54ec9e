//! Response envelope served to clients

use crate::feed::FeedItem;
use serde::Serialize;

/// Top-level response: items plus in-band error signaling
///
/// `error` is set if and only if the request failed, in which case `items`
/// is empty and `total` is 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedResult {
    pub items: Vec<FeedItem>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FeedResult {
    /// Wraps successfully processed items
    pub fn success(items: Vec<FeedItem>) -> Self {
        Self {
            total: items.len(),
            items,
            error: None,
        }
    }

    /// Builds the empty, error-carrying envelope
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            error: Some(message.into()),
        }
    }

    /// Returns true if this envelope reports a failure
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
