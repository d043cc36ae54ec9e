//! Output module for reporting results
//!
//! This module handles:
//! - The response envelope ([`FeedResult`])
//! - Classifying failures into user-facing messages

mod classify;
mod envelope;

pub use classify::{classify, missing_source_message, TIMEOUT_MESSAGE, UNREACHABLE_MESSAGE};
pub use envelope::FeedResult;

use crate::feed::FeedItem;
use crate::FeedError;

/// Converts a pipeline outcome into an envelope
///
/// Failures never escape: they become the envelope's `error` field.
pub fn report(outcome: Result<Vec<FeedItem>, FeedError>) -> FeedResult {
    match outcome {
        Ok(items) => FeedResult::success(items),
        Err(e) => FeedResult::failure(classify(&e)),
    }
}
