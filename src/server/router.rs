use axum::Router;
use std::sync::Arc;

use crate::fetch::Transport;
use crate::service::FeedService;

use super::handlers;

/// Liveness probe path
pub const HEALTH_ROUTE: &str = "/healthz";

pub fn create_router<T: Transport + 'static>(service: Arc<FeedService<T>>, route: &str) -> Router {
    use axum::routing::get;

    Router::new()
        // Feed envelope
        .route(route, get(handlers::get_feed::<T>))
        // Liveness
        .route(HEALTH_ROUTE, get(handlers::healthz))
        .with_state(service)
}
