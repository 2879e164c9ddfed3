//! Response payloads stored in and returned from the cache

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// Confidence assumed when a response does not declare one
pub const DEFAULT_RESPONSE_CONFIDENCE: f32 = 0.8;

fn default_confidence() -> f32 {
    DEFAULT_RESPONSE_CONFIDENCE
}

fn default_model_used() -> String {
    "unknown".to_string()
}

/// Keys owned by the `CacheHit` envelope; a response may not carry them
pub const CACHE_HIT_FIELDS: &[&str] = &[
    "cached",
    "cached_at",
    "access_count",
    "match_type",
    "similarity",
];

/// A generated answer to a legal query.
///
/// Fields the cache reasons about are typed; anything else the generation
/// pipeline attaches is kept verbatim in `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalResponse {
    pub answer: String,

    #[serde(default)]
    pub success: bool,

    #[serde(default = "default_confidence")]
    pub confidence: f32,

    #[serde(default = "default_model_used")]
    pub model_used: String,

    #[serde(default)]
    pub sources: Vec<String>,

    #[serde(default)]
    pub processing_time_ms: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,

    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl LegalResponse {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            success: false,
            confidence: DEFAULT_RESPONSE_CONFIDENCE,
            model_used: default_model_used(),
            sources: Vec::new(),
            processing_time_ms: 0.0,
            query_type: None,
            metadata: Map::new(),
        }
    }

    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_model_used(mut self, model: impl Into<String>) -> Self {
        self.model_used = model.into();
        self
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_processing_time_ms(mut self, ms: f64) -> Self {
        self.processing_time_ms = ms;
        self
    }

    pub fn with_query_type(mut self, query_type: impl Into<String>) -> Self {
        self.query_type = Some(query_type.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Drop metadata keys that would collide with the hit envelope, e.g. from
    /// a re-posted lookup result. Returns the removed keys.
    pub fn strip_cache_hit_fields(&mut self) -> Vec<String> {
        CACHE_HIT_FIELDS
            .iter()
            .filter(|field| self.metadata.remove(**field).is_some())
            .map(|field| field.to_string())
            .collect()
    }

    /// Reject payloads the cache must never store
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.answer.trim().is_empty() {
            return Err(DomainError::validation("Response answer must not be empty"));
        }

        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(DomainError::validation(format!(
                "Response confidence must be within [0, 1], got {}",
                self.confidence
            )));
        }

        if !self.processing_time_ms.is_finite() || self.processing_time_ms < 0.0 {
            return Err(DomainError::validation(format!(
                "Processing time must be a non-negative number, got {}",
                self.processing_time_ms
            )));
        }

        Ok(())
    }
}

/// How a cache hit was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Semantic,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Semantic => "semantic",
        }
    }
}

/// A cached response annotated with cache metadata
#[derive(Debug, Clone, Serialize)]
pub struct CacheHit {
    #[serde(flatten)]
    pub response: LegalResponse,
    pub cached: bool,
    pub cached_at: DateTime<Utc>,
    pub access_count: u64,
    pub match_type: MatchType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
}
