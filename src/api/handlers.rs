use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::error::ProxyError;
use crate::upstream::UpstreamClient;

use super::models::SearchParams;

pub async fn search_handler(
    State(upstream): State<Arc<UpstreamClient>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, ProxyError> {
    let start = Instant::now();

    // Repeated keys are not a rejection: the first value is used.
    let request = SearchParams::from_pairs(pairs)
        .into_request()
        .ok_or(ProxyError::MissingQuery)?;

    let result = upstream.search(&request).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(body) => {
            tracing::info!(query = %request.query, elapsed_ms, "search proxied");
            Ok(Json(body))
        }
        Err(e) => {
            tracing::warn!(query = %request.query, elapsed_ms, error = %e, "search failed");
            Err(e)
        }
    }
}
