use axum::{extract::State, Json};
use std::sync::Arc;

use crate::fetch::Transport;
use crate::output::FeedResult;
use crate::service::FeedService;

/// Serves the feed envelope
///
/// Always answers 200: failures travel in the body's `error` field.
pub async fn get_feed<T: Transport + 'static>(
    State(service): State<Arc<FeedService<T>>>,
) -> Json<FeedResult> {
    Json(service.load().await)
}

pub async fn healthz() -> &'static str {
    "ok"
}
