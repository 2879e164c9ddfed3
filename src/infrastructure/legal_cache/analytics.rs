//! Analytics computed from the entry store

use crate::domain::legal_cache::{CacheEfficiency, MemoryUsage, TopQuery};

use super::store::CacheEntryStore;

/// Serialized size of queries and responses plus raw vector bytes
pub fn memory_usage(store: &CacheEntryStore) -> MemoryUsage {
    let entries_bytes = store
        .iter()
        .map(|(_, entry)| {
            entry.query().len()
                + serde_json::to_vec(entry.response())
                    .map(|bytes| bytes.len())
                    .unwrap_or(0)
        })
        .sum();

    MemoryUsage::new(entries_bytes, store.embedding_bytes())
}

/// Most accessed entries; ties keep recency order
pub fn top_queries(store: &CacheEntryStore, limit: usize) -> Vec<TopQuery> {
    let mut entries: Vec<_> = store.iter().map(|(_, entry)| entry).collect();
    entries.sort_by(|a, b| b.access_count().cmp(&a.access_count()));

    entries
        .into_iter()
        .take(limit)
        .map(|entry| TopQuery {
            query: entry.query().to_string(),
            access_count: entry.access_count(),
            legal_area: entry.legal_area().to_string(),
            confidence: entry.confidence(),
        })
        .collect()
}

pub fn efficiency(store: &CacheEntryStore) -> CacheEfficiency {
    if store.is_empty() {
        return CacheEfficiency::default();
    }

    let count = store.len() as f64;
    let (confidence, processing, embedded) =
        store
            .iter()
            .fold((0.0, 0.0, 0usize), |(conf, time, emb), (_, entry)| {
                (
                    conf + entry.confidence() as f64,
                    time + entry.processing_time_ms(),
                    emb + usize::from(entry.has_embedding()),
                )
            });

    CacheEfficiency {
        avg_confidence: confidence / count,
        avg_processing_time_ms: processing / count,
        embedding_coverage: embedded as f64 / count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::legal_cache::{CacheEntry, LegalResponse};

    fn create_store() -> CacheEntryStore {
        let mut store = CacheEntryStore::new(10);
        let response = |ms| LegalResponse::new("answer").with_processing_time_ms(ms);

        store.put(
            "a".into(),
            CacheEntry::new("a", response(100.0), 0.6).with_legal_area("tax"),
            Some(vec![1.0, 2.0]),
        );
        store.put("b".into(), CacheEntry::new("b", response(300.0), 0.8), None);
        store.put("c".into(), CacheEntry::new("c", response(200.0), 1.0), None);
        store
    }

    #[test]
    fn test_top_queries_by_access_count() {
        let mut store = create_store();
        store.get_mut("a").unwrap().record_access();
        store.get_mut("a").unwrap().record_access();
        store.get_mut("b").unwrap().record_access();

        let top = top_queries(&store, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].query, "a");
        assert_eq!(top[0].access_count, 3);
        assert_eq!(top[0].legal_area, "tax");
        assert_eq!(top[1].query, "b");
    }

    #[test]
    fn test_efficiency() {
        let store = create_store();

        let efficiency = efficiency(&store);

        assert!((efficiency.avg_confidence - 0.8).abs() < 0.0001);
        assert!((efficiency.avg_processing_time_ms - 200.0).abs() < 0.0001);
        assert!((efficiency.embedding_coverage - 1.0 / 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_efficiency_of_empty_store() {
        assert_eq!(efficiency(&CacheEntryStore::new(1)), CacheEfficiency::default());
    }

    #[test]
    fn test_memory_usage() {
        let store = create_store();

        let usage = memory_usage(&store);

        assert_eq!(usage.embeddings_bytes, 8);
        assert!(usage.entries_bytes > 3 * "answer".len());
        assert_eq!(usage.total_bytes, usage.entries_bytes + usage.embeddings_bytes);
    }
}
