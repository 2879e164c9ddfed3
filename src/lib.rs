//! Legal Response Cache
//!
//! Exact and semantic caching of generated answers to legal queries:
//! - Query normalization and hashed exact-match keys
//! - Embedding similarity lookup through an OpenAI-compatible provider
//! - Confidence-gated admission, LRU eviction and age-based expiry
//! - Legal-area invalidation, statistics and analytics over HTTP

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::{info, warn};

use api::state::AppState;
use domain::embedding::EmbeddingProvider;
use infrastructure::embedding::{OpenAiEmbeddingProvider, DEFAULT_OPENAI_BASE_URL};
use infrastructure::http_client::HttpClient;
use infrastructure::legal_cache::LegalResponseCacheService;

/// Build the embedding provider, or `None` when no API key is configured
pub fn create_embedding_provider(
    config: &AppConfig,
) -> anyhow::Result<Option<Arc<dyn EmbeddingProvider>>> {
    let Some(api_key) = config.embedding.resolved_api_key() else {
        warn!("No embedding API key configured, semantic matching disabled");
        return Ok(None);
    };

    let base_url = config
        .embedding
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
    let client = HttpClient::with_timeout(config.cache.embedding_timeout())?;

    info!("Using OpenAI-compatible embeddings at {}", base_url);

    Ok(Some(Arc::new(OpenAiEmbeddingProvider::with_base_url(
        client, api_key, base_url,
    ))))
}

/// Build and initialize the cache service
pub async fn create_cache_service(
    config: &AppConfig,
) -> anyhow::Result<Arc<LegalResponseCacheService>> {
    let provider = create_embedding_provider(config)?;
    let service = Arc::new(LegalResponseCacheService::new(config.cache.clone(), provider));

    service.initialize().await;

    Ok(service)
}

pub fn create_app_state(service: Arc<LegalResponseCacheService>) -> AppState {
    AppState::new(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmbeddingConfig;

    #[test]
    fn test_provider_from_configured_key() {
        let mut config = AppConfig::default();
        config.embedding = EmbeddingConfig {
            api_key: Some("sk-test".to_string()),
            base_url: Some("http://localhost:9999".to_string()),
        };

        let provider = create_embedding_provider(&config).unwrap().unwrap();

        assert_eq!(provider.provider_name(), "openai");
    }

    #[tokio::test]
    async fn test_cache_service_is_initialized() {
        let mut config = AppConfig::default();
        config.embedding.api_key = Some(" ".to_string());
        config.cache.preload = false;

        let service = create_cache_service(&config).await.unwrap();

        assert!(service.is_initialized());
        assert_eq!(service.get_cache_stats().cache_size, 0);
    }
}
