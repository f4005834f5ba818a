use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::upstream::UpstreamClient;

pub mod handlers;
pub mod models;

pub fn create_router(upstream: Arc<UpstreamClient>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/search", get(handlers::search_handler))
        .with_state(upstream)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Binds `addr` and serves the proxy until ctrl-c.
pub async fn serve(addr: &str, upstream: Arc<UpstreamClient>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!(
        "query proxy listening on {}, upstream {}",
        listener.local_addr()?,
        upstream.base_url()
    );

    axum::serve(listener, create_router(upstream))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;
    Ok(())
}
