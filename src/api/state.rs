//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::legal_cache::LegalCacheServiceTrait;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub cache_service: Arc<dyn LegalCacheServiceTrait>,
}

impl AppState {
    pub fn new(cache_service: Arc<dyn LegalCacheServiceTrait>) -> Self {
        Self { cache_service }
    }
}
