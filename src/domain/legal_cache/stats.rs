//! Cache statistics and analytics reports

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aggregate request counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub hit_rate: f64,
    pub cache_size: usize,
    pub avg_response_time_ms: f64,
    pub evictions: u64,
}

/// Lookup counters for one legal area
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegalAreaStats {
    pub hits: u64,
    pub total: u64,
    pub hit_rate: f64,
}

impl LegalAreaStats {
    pub fn record(&mut self, hit: bool) {
        self.total += 1;
        if hit {
            self.hits += 1;
        }
        self.hit_rate = ratio(self.hits, self.total);
    }
}

/// Approximate memory held by the cache
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub entries_bytes: usize,
    pub embeddings_bytes: usize,
    pub total_bytes: usize,
    pub total_mb: f64,
}

impl MemoryUsage {
    pub fn new(entries_bytes: usize, embeddings_bytes: usize) -> Self {
        let total_bytes = entries_bytes + embeddings_bytes;
        Self {
            entries_bytes,
            embeddings_bytes,
            total_bytes,
            total_mb: total_bytes as f64 / (1024.0 * 1024.0),
        }
    }
}

/// One row of the most-accessed list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopQuery {
    pub query: String,
    pub access_count: u64,
    pub legal_area: String,
    pub confidence: f32,
}

/// Quality of what the cache currently holds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheEfficiency {
    pub avg_confidence: f64,
    pub avg_processing_time_ms: f64,
    pub embedding_coverage: f64,
}

/// Extended diagnostics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheAnalytics {
    pub stats: CacheStats,
    pub legal_area_breakdown: BTreeMap<String, LegalAreaStats>,
    pub legal_area_versions: BTreeMap<String, u64>,
    pub memory_usage: MemoryUsage,
    pub top_queries: Vec<TopQuery>,
    pub efficiency: CacheEfficiency,
}

/// `part / whole`, 0.0 for an empty whole
pub fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }

    part as f64 / whole as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_area_stats_record() {
        let mut stats = LegalAreaStats::default();

        stats.record(true);
        stats.record(false);
        stats.record(true);
        stats.record(false);

        assert_eq!(stats.hits, 2);
        assert_eq!(stats.total, 4);
        assert!((stats.hit_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_memory_usage_totals() {
        let usage = MemoryUsage::new(1024 * 1024, 1024 * 1024);

        assert_eq!(usage.total_bytes, 2 * 1024 * 1024);
        assert!((usage.total_mb - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ratio_of_empty_whole() {
        assert_eq!(ratio(0, 0), 0.0);
        assert!((ratio(1, 4) - 0.25).abs() < f64::EPSILON);
    }
}
