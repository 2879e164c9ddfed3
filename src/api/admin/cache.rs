//! Cache administration endpoints

use axum::extract::{Path, State};
use serde::Serialize;
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::Json;
use crate::domain::legal_cache::{CacheAnalytics, CacheStats};

#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub legal_area: String,
    pub removed: usize,
}

#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub removed: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub cleared: bool,
}

/// GET /admin/cache/stats
pub async fn get_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache_service.stats())
}

/// GET /admin/cache/analytics
pub async fn get_analytics(State(state): State<AppState>) -> Json<CacheAnalytics> {
    Json(state.cache_service.analytics())
}

/// POST /admin/cache/invalidate/{legal_area}
pub async fn invalidate_legal_area(
    State(state): State<AppState>,
    Path(legal_area): Path<String>,
) -> Json<InvalidateResponse> {
    info!(legal_area = %legal_area, "Invalidating legal area");
    let removed = state.cache_service.invalidate_legal_area(&legal_area);

    Json(InvalidateResponse { legal_area, removed })
}

/// POST /admin/cache/cleanup
pub async fn cleanup(State(state): State<AppState>) -> Json<CleanupResponse> {
    Json(CleanupResponse {
        removed: state.cache_service.cleanup_expired(),
    })
}

/// DELETE /admin/cache
pub async fn clear(State(state): State<AppState>) -> Json<ClearResponse> {
    info!("Clearing legal cache");

    Json(ClearResponse {
        cleared: state.cache_service.clear(),
    })
}
