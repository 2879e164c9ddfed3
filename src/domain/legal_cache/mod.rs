//! Legal response cache domain models
//!
//! Exact and semantic (embedding similarity) caching of generated answers to
//! legal queries, with confidence-gated admission and legal-area scoping.

mod admission;
mod classifier;
mod config;
mod entry;
mod normalizer;
mod response;
mod similarity;
mod stats;

pub use admission::{AdmissionController, AdmissionDecision, MAX_CONFIDENCE};
pub use classifier::{classify_legal_area, DEFAULT_LEGAL_AREA, LEGAL_AREA_KEYWORDS};
pub use config::LegalCacheConfig;
pub use entry::CacheEntry;
pub use normalizer::{cache_key, normalize_query};
pub use response::{
    CacheHit, LegalResponse, MatchType, CACHE_HIT_FIELDS, DEFAULT_RESPONSE_CONFIDENCE,
};
pub use similarity::{SimilarMatch, SimilarityMatcher};
pub use stats::{
    ratio, CacheAnalytics, CacheEfficiency, CacheStats, LegalAreaStats, MemoryUsage, TopQuery,
};
