//! Client-facing v1 API endpoints

pub mod cache;

use axum::{routing::post, Router};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/cache", post(cache::store))
        .route("/cache/lookup", post(cache::lookup))
}
