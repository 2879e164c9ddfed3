//! Cache entry model

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::{DEFAULT_LEGAL_AREA, LegalResponse};

/// One cached (query, response) pair.
///
/// The embedding vector is held by the store next to the entry, under the
/// same key; `has_embedding` records whether one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    query: String,
    response: LegalResponse,
    timestamp: DateTime<Utc>,
    access_count: u64,
    last_accessed: DateTime<Utc>,
    confidence: f32,
    model_used: String,
    processing_time_ms: f64,
    legal_area: Option<String>,
    query_type: Option<String>,
    has_embedding: bool,
}

impl CacheEntry {
    /// Create an entry for a normalized query with its admission-time confidence
    pub fn new(query: impl Into<String>, response: LegalResponse, confidence: f32) -> Self {
        let now = Utc::now();
        let model_used = response.model_used.clone();
        let processing_time_ms = response.processing_time_ms;
        let query_type = response.query_type.clone();

        Self {
            query: query.into(),
            response,
            timestamp: now,
            access_count: 1,
            last_accessed: now,
            confidence,
            model_used,
            processing_time_ms,
            legal_area: None,
            query_type,
            has_embedding: false,
        }
    }

    pub fn with_legal_area(mut self, legal_area: impl Into<String>) -> Self {
        self.legal_area = Some(legal_area.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self.last_accessed = timestamp;
        self
    }

    pub(crate) fn set_has_embedding(&mut self, has_embedding: bool) {
        self.has_embedding = has_embedding;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn response(&self) -> &LegalResponse {
        &self.response
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    pub fn last_accessed(&self) -> DateTime<Utc> {
        self.last_accessed
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn model_used(&self) -> &str {
        &self.model_used
    }

    pub fn processing_time_ms(&self) -> f64 {
        self.processing_time_ms
    }

    /// Legal area, "general" when the entry was stored without one
    pub fn legal_area(&self) -> &str {
        self.legal_area.as_deref().unwrap_or(DEFAULT_LEGAL_AREA)
    }

    pub fn query_type(&self) -> Option<&str> {
        self.query_type.as_deref()
    }

    pub fn has_embedding(&self) -> bool {
        self.has_embedding
    }

    /// Whether the entry was created before `now - max_age`
    pub fn is_older_than(&self, max_age: TimeDelta, now: DateTime<Utc>) -> bool {
        match now.checked_sub_signed(max_age) {
            Some(cutoff) => self.timestamp < cutoff,
            None => false,
        }
    }

    /// Count a read and stamp its time
    pub fn record_access(&mut self) {
        self.access_count = self.access_count.saturating_add(1);
        self.last_accessed = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_entry() -> CacheEntry {
        let response = LegalResponse::new("Bail terms are set by the court.")
            .with_model_used("gpt-4o")
            .with_processing_time_ms(840.0)
            .with_query_type("procedural");

        CacheEntry::new("what is bail", response, 0.9)
    }

    #[test]
    fn test_new_entry() {
        let entry = create_entry();

        assert_eq!(entry.query(), "what is bail");
        assert_eq!(entry.access_count(), 1);
        assert_eq!(entry.timestamp(), entry.last_accessed());
        assert!((entry.confidence() - 0.9).abs() < 0.0001);
        assert_eq!(entry.model_used(), "gpt-4o");
        assert_eq!(entry.processing_time_ms(), 840.0);
        assert_eq!(entry.query_type(), Some("procedural"));
        assert!(!entry.has_embedding());
    }

    #[test]
    fn test_missing_legal_area_defaults_to_general() {
        let entry = create_entry();
        assert_eq!(entry.legal_area(), "general");

        let entry = entry.with_legal_area("criminal");
        assert_eq!(entry.legal_area(), "criminal");
    }

    #[test]
    fn test_record_access() {
        let mut entry = create_entry().with_timestamp(Utc::now() - TimeDelta::hours(1));

        entry.record_access();
        entry.record_access();

        assert_eq!(entry.access_count(), 3);
        assert!(entry.last_accessed() > entry.timestamp());
    }

    #[test]
    fn test_is_older_than() {
        let now = Utc::now();
        let max_age = TimeDelta::hours(24);

        let stale = create_entry().with_timestamp(now - TimeDelta::hours(25));
        let fresh = create_entry().with_timestamp(now - TimeDelta::hours(23));

        assert!(stale.is_older_than(max_age, now));
        assert!(!fresh.is_older_than(max_age, now));
        assert!(!stale.is_older_than(TimeDelta::MAX, now));
    }
}
