//! Thin HTTP layer over the pool data service.
//!
//! Handlers only extract parameters, delegate to [`PoolService`] and map
//! [`ApiError`] kinds onto HTTP statuses; all actual work happens in the
//! service layer.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::error::ApiError;
use crate::service::{
    EnrichedPoolInfo, PoolAnalytics, PoolMetrics, PoolRange, PoolSnapshot, PoolSummary, Tick,
};
use crate::PoolService;

pub type SharedService = Arc<PoolService>;

pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/v1/crypto/pool/{address}", get(pool_info))
        .route("/api/v1/crypto/pool/{address}/info", get(enhanced_pool_info))
        .route("/api/v1/crypto/pool/{address}/ticks", get(pool_ticks))
        .route("/api/v1/crypto/pool/{address}/analytics", get(pool_analytics))
        .route("/api/v1/crypto/pool/{address}/metrics", get(pool_metrics))
        .route("/api/v1/crypto/pool/{address}/range", get(pool_range))
        .route("/api/v1/crypto/search", get(search_pools))
        .route("/api/v1/crypto/pools/top", get(top_pools))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Connectivity(_) | ApiError::Transport { .. } => StatusCode::BAD_GATEWAY,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "message": "Pool data API is running" }))
}

async fn pool_info(
    State(service): State<SharedService>,
    Path(address): Path<String>,
) -> Result<Json<PoolSnapshot>, ApiError> {
    Ok(Json(service.pool_info(&address).await?))
}

async fn enhanced_pool_info(
    State(service): State<SharedService>,
    Path(address): Path<String>,
) -> Result<Json<EnrichedPoolInfo>, ApiError> {
    Ok(Json(service.enhanced_pool_info(&address).await?))
}

async fn pool_ticks(
    State(service): State<SharedService>,
    Path(address): Path<String>,
) -> Result<Json<Arc<Vec<Tick>>>, ApiError> {
    Ok(Json(service.pool_ticks(&address).await?))
}

#[derive(Debug, Deserialize)]
struct AnalyticsParams {
    days: Option<u32>,
}

async fn pool_analytics(
    State(service): State<SharedService>,
    Path(address): Path<String>,
    Query(params): Query<AnalyticsParams>,
) -> Result<Json<Option<PoolAnalytics>>, ApiError> {
    Ok(Json(service.pool_analytics(&address, params.days).await?))
}

async fn pool_metrics(
    State(service): State<SharedService>,
    Path(address): Path<String>,
) -> Result<Json<PoolMetrics>, ApiError> {
    Ok(Json(service.pool_metrics(&address).await?))
}

async fn pool_range(
    State(service): State<SharedService>,
    Path(address): Path<String>,
) -> Result<Json<PoolRange>, ApiError> {
    Ok(Json(service.pool_range(&address).await?))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
}

async fn search_pools(
    State(service): State<SharedService>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PoolSummary>>, ApiError> {
    let text = params
        .query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::Validation("search query is required".to_string()))?;

    Ok(Json(service.search_pools(&text).await?))
}

async fn top_pools(
    State(service): State<SharedService>,
) -> Result<Json<Arc<Vec<PoolSummary>>>, ApiError> {
    Ok(Json(service.top_pools().await?))
}
