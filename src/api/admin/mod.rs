//! Admin API endpoints for operating the cache

pub mod cache;

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::state::AppState;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/cache", delete(cache::clear))
        .route("/cache/stats", get(cache::get_stats))
        .route("/cache/analytics", get(cache::get_analytics))
        .route("/cache/invalidate/{legal_area}", post(cache::invalidate_legal_area))
        .route("/cache/cleanup", post(cache::cleanup))
}
