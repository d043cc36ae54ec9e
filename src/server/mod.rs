//! HTTP surface
//!
//! Exposes the feed operation as `GET <route>` (default `/api/rss`) plus a
//! liveness probe. Each request runs the whole pipeline independently; a
//! client that disconnects simply drops its in-flight request.

mod handlers;
mod router;

pub use router::{create_router, HEALTH_ROUTE};

use crate::config::ServerConfig;
use crate::fetch::Transport;
use crate::service::FeedService;
use crate::FeedError;
use std::sync::Arc;

/// Binds the configured address and serves until Ctrl-C
pub async fn serve<T: Transport + 'static>(
    service: Arc<FeedService<T>>,
    config: &ServerConfig,
) -> Result<(), FeedError> {
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        route = %config.route,
        "Listening for feed requests"
    );

    axum::serve(listener, create_router(service, &config.route))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
