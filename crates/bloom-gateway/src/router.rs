//! HTTP routes for the visualization client.
//!
//! | Route | Operation |
//! |-------|-----------|
//! | `GET  /api/bloom-filter?item=` | check an item |
//! | `POST /api/bloom-filter` | add an item |
//! | `POST /api/bloom-filter/settings` | rebuild the filter |
//! | `GET  /api/bloom-filter/memory-size` | bytes held by the filter |
//! | `GET  /api/bloom-filter/state` | filter state |
//! | `GET  /api/bloom-filter/metrics` | operation counters |
//! | `GET  /health` | liveness |
//!
//! Engine calls are short and CPU-bound, so handlers call straight into the
//! `FilterApi` without `spawn_blocking`.

use crate::domain::config::GatewayConfig;
use crate::domain::error::ApiError;
use crate::middleware::{create_cors_layer, create_trace_layer};
use axum::body::Body;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use bloom_engine::events::{
    AddItemRequest, MembershipQuery, MembershipResponse, MemorySizeResponse, MessageResponse,
    UpdateSettingsRequest,
};
use bloom_engine::{FilterApi, FilterState, MetricsSnapshot};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::map_response_body::MapResponseBodyLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn FilterApi>,
}

/// Build the gateway router around a filter API
pub fn build_router(api: Arc<dyn FilterApi>, config: &GatewayConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(create_trace_layer())
        .layer(create_cors_layer(&config.cors))
        .layer(DefaultBodyLimit::disable())
        .layer(MapResponseBodyLayer::new(Body::new))
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes));

    Router::new()
        .route("/api/bloom-filter", get(check_item).post(add_item))
        .route("/api/bloom-filter/settings", post(update_settings))
        .route("/api/bloom-filter/memory-size", get(memory_size))
        .route("/api/bloom-filter/state", get(filter_state))
        .route("/api/bloom-filter/metrics", get(filter_metrics))
        .route("/health", get(health_check))
        .layer(middleware)
        .with_state(AppState { api })
}

/// `GET /api/bloom-filter?item=`
async fn check_item(
    State(state): State<AppState>,
    query: Result<Query<MembershipQuery>, QueryRejection>,
) -> Result<Json<MembershipResponse>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.api.check_item(&query)?))
}

/// `POST /api/bloom-filter`
async fn add_item(
    State(state): State<AppState>,
    body: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = body?;
    Ok(Json(state.api.add_item(&request)?))
}

/// `POST /api/bloom-filter/settings`
async fn update_settings(
    State(state): State<AppState>,
    body: Result<Json<UpdateSettingsRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = body?;
    Ok(Json(state.api.update_settings(&request)?))
}

/// `GET /api/bloom-filter/memory-size`
async fn memory_size(State(state): State<AppState>) -> Json<MemorySizeResponse> {
    Json(state.api.memory_size())
}

/// `GET /api/bloom-filter/state`
async fn filter_state(State(state): State<AppState>) -> Json<FilterState> {
    Json(state.api.get_state())
}

/// `GET /api/bloom-filter/metrics`
///
/// Zeroed when the service was built without a recorder.
async fn filter_metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.api.metrics().unwrap_or_default())
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "bloom-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
