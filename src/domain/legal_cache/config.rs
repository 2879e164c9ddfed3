//! Legal response cache configuration

use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Configuration for the legal response cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalCacheConfig {
    /// Entry count cap before LRU eviction engages
    #[serde(default = "default_max_cache_size")]
    pub max_cache_size: usize,

    /// Minimum cosine similarity for a semantic hit (0.0 to 1.0)
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Entries older than this are removed by expiry sweeps
    #[serde(default = "default_max_age_hours")]
    pub max_age_hours: u64,

    /// Minimum confidence for a response to be admitted without forcing
    #[serde(default = "default_admission_threshold")]
    pub admission_threshold: f32,

    /// How many queries the analytics top list reports
    #[serde(default = "default_top_queries_limit")]
    pub top_queries_limit: usize,

    /// Embedding model requested from the provider
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Upper bound on a single embedding call
    #[serde(default = "default_embedding_timeout_ms")]
    pub embedding_timeout_ms: u64,

    /// Seed well-known answers on initialization
    #[serde(default = "default_true")]
    pub preload: bool,

    /// Period of the background expiry sweep, 0 disables it
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
}

fn default_max_cache_size() -> usize {
    5000
}

fn default_similarity_threshold() -> f32 {
    0.75
}

fn default_max_age_hours() -> u64 {
    24
}

fn default_admission_threshold() -> f32 {
    0.6
}

fn default_top_queries_limit() -> usize {
    10
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_embedding_timeout_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_cleanup_interval_secs() -> u64 {
    3600
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

impl Default for LegalCacheConfig {
    fn default() -> Self {
        Self {
            max_cache_size: default_max_cache_size(),
            similarity_threshold: default_similarity_threshold(),
            max_age_hours: default_max_age_hours(),
            admission_threshold: default_admission_threshold(),
            top_queries_limit: default_top_queries_limit(),
            embedding_model: default_embedding_model(),
            embedding_timeout_ms: default_embedding_timeout_ms(),
            preload: default_true(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
        }
    }
}

impl LegalCacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum entry age, saturating for out-of-range hour counts
    pub fn max_age(&self) -> TimeDelta {
        i64::try_from(self.max_age_hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .unwrap_or(TimeDelta::MAX)
    }

    pub fn embedding_timeout(&self) -> Duration {
        Duration::from_millis(self.embedding_timeout_ms)
    }

    /// Sweep period, `None` when the sweep is disabled
    pub fn cleanup_interval(&self) -> Option<Duration> {
        (self.cleanup_interval_secs > 0).then(|| Duration::from_secs(self.cleanup_interval_secs))
    }

    /// Apply the builder bounds to values that bypassed them, e.g. loaded
    /// through serde. Non-finite thresholds fall back to their defaults.
    pub fn clamped(self) -> Self {
        let similarity = finite_or(self.similarity_threshold, default_similarity_threshold());
        let admission = finite_or(self.admission_threshold, default_admission_threshold());
        let max_cache_size = self.max_cache_size;

        self.with_max_cache_size(max_cache_size)
            .with_similarity_threshold(similarity)
            .with_admission_threshold(admission)
    }

    /// A zero size is raised to one so the cache can always hold an entry
    pub fn with_max_cache_size(mut self, max: usize) -> Self {
        self.max_cache_size = max.max(1);
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_max_age_hours(mut self, hours: u64) -> Self {
        self.max_age_hours = hours;
        self
    }

    pub fn with_admission_threshold(mut self, threshold: f32) -> Self {
        self.admission_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_top_queries_limit(mut self, limit: usize) -> Self {
        self.top_queries_limit = limit;
        self
    }

    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    pub fn with_embedding_timeout(mut self, timeout: Duration) -> Self {
        self.embedding_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_preload(mut self, preload: bool) -> Self {
        self.preload = preload;
        self
    }

    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval_secs = interval.as_secs();
        self
    }
}
