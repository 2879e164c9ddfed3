//! Cache lookup and store handlers

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::legal_cache::{CacheHit, LegalResponse};

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub query: String,
    /// Precomputed query embedding, skips the provider call
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
pub struct StoreRequest {
    pub query: String,
    pub response: LegalResponse,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
    #[serde(default)]
    pub legal_area: Option<String>,
    #[serde(default)]
    pub force_cache: bool,
}

#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub admitted: bool,
}

fn require_query(query: &str) -> Result<(), ApiError> {
    if query.trim().is_empty() {
        return Err(ApiError::bad_request("Query must not be empty").with_param("query"));
    }

    Ok(())
}

/// POST /v1/cache/lookup
pub async fn lookup(
    State(state): State<AppState>,
    Json(request): Json<LookupRequest>,
) -> Result<Json<CacheHit>, ApiError> {
    require_query(&request.query)?;
    debug!(query = %request.query, "Looking up cached response");

    state
        .cache_service
        .get(&request.query, request.embedding)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No cached response for query").with_code("cache_miss"))
}

/// POST /v1/cache
pub async fn store(
    State(state): State<AppState>,
    Json(request): Json<StoreRequest>,
) -> Result<Json<StoreResponse>, ApiError> {
    require_query(&request.query)?;
    request
        .response
        .validate()
        .map_err(|e| ApiError::from(e).with_param("response"))?;

    let admitted = state
        .cache_service
        .cache(
            &request.query,
            request.response,
            request.embedding,
            request.legal_area.as_deref(),
            request.force_cache,
        )
        .await;

    Ok(Json(StoreResponse { admitted }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_request_defaults() {
        let request: StoreRequest = serde_json::from_value(serde_json::json!({
            "query": "What is bail?",
            "response": {"answer": "Release pending trial."}
        }))
        .unwrap();

        assert!(!request.force_cache);
        assert!(request.embedding.is_none());
        assert!(request.legal_area.is_none());
        assert_eq!(request.response.model_used, "unknown");
    }

    #[test]
    fn test_require_query() {
        assert!(require_query("bail").is_ok());
        assert_eq!(
            require_query("   ").unwrap_err().response.error.param.as_deref(),
            Some("query")
        );
    }
}
