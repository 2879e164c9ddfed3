//! Legal response cache service
//!
//! Answers repeated legal queries from memory: an exact lookup on the
//! normalized query first, then a similarity scan over cached query
//! embeddings. Generated answers are admitted only when confident enough.
//!
//! One instance is meant to be shared per process (wrap it in an `Arc`).
//! Every read-modify-write of the store and counters happens under a single
//! mutex that is never held across the embedding call.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use chrono::{TimeDelta, Utc};
use tracing::{debug, info, warn};

use super::analytics;
use super::preload::preload_entries;
use super::store::CacheEntryStore;
use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::legal_cache::{
    cache_key, classify_legal_area, normalize_query, ratio, AdmissionController, CacheAnalytics,
    CacheEntry, CacheHit, CacheStats, LegalAreaStats, LegalCacheConfig, LegalResponse, MatchType,
    SimilarityMatcher,
};
use crate::infrastructure::observability::{
    record_cache_admission, record_cache_evictions, record_cache_invalidation,
    record_cache_lookup, record_cache_size,
};

/// Request and lookup counters
#[derive(Debug, Default)]
struct CacheCounters {
    total_requests: u64,
    cache_hits: u64,
    cache_misses: u64,
    evictions: u64,
    total_lookup_ms: f64,
    legal_areas: BTreeMap<String, LegalAreaStats>,
    legal_area_versions: BTreeMap<String, u64>,
}

impl CacheCounters {
    fn record_lookup(&mut self, legal_area: &str, hit: bool, elapsed: Duration) {
        self.total_requests += 1;
        if hit {
            self.cache_hits += 1;
        } else {
            self.cache_misses += 1;
        }
        self.total_lookup_ms += elapsed.as_secs_f64() * 1000.0;

        self.legal_areas
            .entry(legal_area.to_string())
            .or_default()
            .record(hit);
    }

    fn avg_lookup_ms(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }

        self.total_lookup_ms / self.total_requests as f64
    }
}

#[derive(Debug)]
struct CacheState {
    store: CacheEntryStore,
    counters: CacheCounters,
}

impl CacheState {
    /// Apply hit-side mutations to an entry, count the hit against the
    /// entry's legal area and snapshot it for the caller
    fn hit(
        &mut self,
        key: &str,
        match_type: MatchType,
        similarity: Option<f32>,
        elapsed: Duration,
    ) -> Option<CacheHit> {
        let entry = self.store.get_mut(key)?;
        entry.record_access();

        let hit = CacheHit {
            response: entry.response().clone(),
            cached: true,
            cached_at: entry.timestamp(),
            access_count: entry.access_count(),
            match_type,
            similarity,
        };
        let legal_area = entry.legal_area().to_string();
        self.counters.record_lookup(&legal_area, true, elapsed);

        Some(hit)
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            total_requests: self.counters.total_requests,
            cache_hits: self.counters.cache_hits,
            cache_misses: self.counters.cache_misses,
            hit_rate: ratio(self.counters.cache_hits, self.counters.total_requests),
            cache_size: self.store.len(),
            avg_response_time_ms: self.counters.avg_lookup_ms(),
            evictions: self.counters.evictions,
        }
    }
}

/// In-memory exact + semantic cache for legal query responses
#[derive(Debug)]
pub struct LegalResponseCacheService {
    state: Mutex<CacheState>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    admission: AdmissionController,
    matcher: SimilarityMatcher,
    config: LegalCacheConfig,
    initialized: AtomicBool,
}

impl LegalResponseCacheService {
    /// Create a cache service; without a provider it matches exact queries only
    pub fn new(
        config: LegalCacheConfig,
        embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    ) -> Self {
        Self {
            state: Mutex::new(CacheState {
                store: CacheEntryStore::new(config.max_cache_size),
                counters: CacheCounters::default(),
            }),
            embedding_provider,
            admission: AdmissionController::new(config.admission_threshold),
            matcher: SimilarityMatcher::new(config.similarity_threshold),
            config,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &LegalCacheConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Legal cache lock was poisoned, continuing with inner state");
            poisoned.into_inner()
        })
    }

    /// Seed well-known answers. Only the first call does any work; it returns
    /// the number of entries seeded.
    pub async fn initialize(&self) -> usize {
        if self
            .initialized
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Legal cache already initialized");
            return 0;
        }

        if !self.config.preload {
            info!("Legal cache initialized without preload");
            return 0;
        }

        let seeds = preload_entries();
        let queries: Vec<String> = seeds.iter().map(|s| normalize_query(s.query)).collect();
        let mut embeddings = self.generate_embeddings(queries).await;

        let mut seeded = 0;
        for (index, seed) in seeds.into_iter().enumerate() {
            let embedding = embeddings.get_mut(index).and_then(Option::take);

            if self
                .cache_response(seed.query, seed.response, embedding, Some(seed.legal_area), true)
                .await
            {
                seeded += 1;
            }
        }

        info!("Legal cache initialized with {} preloaded entries", seeded);
        seeded
    }

    /// Best-effort embedding of a single normalized query
    async fn generate_embedding(&self, text: &str) -> Option<Vec<f32>> {
        self.generate_embeddings(vec![text.to_string()])
            .await
            .pop()
            .flatten()
    }

    /// Best-effort embeddings, one slot per input text. Provider errors and
    /// timeouts leave every slot empty.
    async fn generate_embeddings(&self, texts: Vec<String>) -> Vec<Option<Vec<f32>>> {
        let count = texts.len();
        let none = || vec![None; count];

        let Some(provider) = self.embedding_provider.as_ref() else {
            return none();
        };

        if count == 0 {
            return Vec::new();
        }

        let request = if count == 1 {
            EmbeddingRequest::single(&self.config.embedding_model, texts[0].clone())
        } else {
            EmbeddingRequest::batch(&self.config.embedding_model, texts)
        };

        match tokio::time::timeout(self.config.embedding_timeout(), provider.embed(request)).await {
            Ok(Ok(response)) => {
                let vectors = response.into_vectors();

                if vectors.len() != count {
                    warn!(
                        "Embedding provider returned {} vectors for {} inputs",
                        vectors.len(),
                        count
                    );
                    return none();
                }

                vectors
                    .into_iter()
                    .map(|v| if v.is_empty() { None } else { Some(v) })
                    .collect()
            }
            Ok(Err(e)) => {
                warn!("Failed to generate embedding for legal cache: {}", e);
                none()
            }
            Err(_) => {
                warn!(
                    "Embedding generation timed out after {}ms",
                    self.config.embedding_timeout_ms
                );
                none()
            }
        }
    }

    /// Look up a response for the query: exact match on the normalized query,
    /// then the closest cached embedding at or above the similarity threshold.
    ///
    /// Any failure along the way is reported as a miss.
    pub async fn get_cached_response(
        &self,
        query: &str,
        embedding: Option<Vec<f32>>,
    ) -> Option<CacheHit> {
        let started = Instant::now();
        let normalized = normalize_query(query);
        let legal_area = classify_legal_area(&normalized);
        let key = cache_key(&normalized);

        {
            let mut state = self.lock_state();

            if !normalized.is_empty() {
                if let Some(hit) = state.hit(&key, MatchType::Exact, None, started.elapsed()) {
                    drop(state);

                    debug!("Legal cache exact hit for '{}'", normalized);
                    record_cache_lookup(Some(MatchType::Exact), started.elapsed());
                    return Some(hit);
                }
            }

            if normalized.is_empty() || state.store.embedding_count() == 0 {
                state.counters.record_lookup(legal_area, false, started.elapsed());
                drop(state);

                record_cache_lookup(None, started.elapsed());
                return None;
            }
        }

        let embedding = match embedding.filter(|v| !v.is_empty()) {
            Some(vector) => Some(vector),
            None => self.generate_embedding(&normalized).await,
        };

        let mut state = self.lock_state();
        let hit = embedding.and_then(|vector| {
            let found = self.matcher.find_similar(&vector, state.store.embeddings())?;
            debug!(
                "Legal cache semantic hit for '{}' with similarity {:.4}",
                normalized, found.similarity
            );
            state.hit(
                &found.key,
                MatchType::Semantic,
                Some(found.similarity),
                started.elapsed(),
            )
        });
        if hit.is_none() {
            state.counters.record_lookup(legal_area, false, started.elapsed());
        }
        drop(state);

        if hit.is_none() {
            debug!("Legal cache miss for '{}'", normalized);
        }
        record_cache_lookup(hit.as_ref().map(|h| h.match_type), started.elapsed());

        hit
    }

    /// Store a generated response if it passes admission (or is forced).
    ///
    /// The legal area defaults to keyword classification of the query. Returns
    /// whether the response was stored.
    pub async fn cache_response(
        &self,
        query: &str,
        mut response: LegalResponse,
        embedding: Option<Vec<f32>>,
        legal_area: Option<&str>,
        force_cache: bool,
    ) -> bool {
        let normalized = normalize_query(query);

        if normalized.is_empty() {
            debug!("Refusing to cache a response for an empty query");
            return false;
        }

        let stripped = response.strip_cache_hit_fields();
        if !stripped.is_empty() {
            debug!(
                "Dropped cache envelope fields {:?} from response for '{}'",
                stripped, normalized
            );
        }

        if let Err(e) = response.validate() {
            warn!("Rejected response for '{}': {}", normalized, e);
            record_cache_admission(false);
            return false;
        }

        let decision = self.admission.should_admit(&response, force_cache);
        record_cache_admission(decision.admit);

        if !decision.admit {
            debug!(
                "Response for '{}' not cached, confidence {:.2} below {:.2}",
                normalized,
                decision.confidence,
                self.admission.threshold()
            );
            return false;
        }

        let legal_area = legal_area
            .map(str::trim)
            .filter(|area| !area.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| classify_legal_area(&normalized).to_string());
        let key = cache_key(&normalized);

        let embedding = match embedding.filter(|v| !v.is_empty()) {
            Some(vector) => Some(vector),
            None => {
                let has_vector = self.lock_state().store.embedding(&key).is_some();
                if has_vector {
                    None
                } else {
                    self.generate_embedding(&normalized).await
                }
            }
        };

        let entry = CacheEntry::new(normalized.clone(), response, decision.confidence)
            .with_legal_area(legal_area.clone());

        let (evicted, size) = {
            let mut state = self.lock_state();
            let evicted = state.store.put(key, entry, embedding);
            state.counters.evictions += evicted as u64;
            (evicted, state.store.len())
        };

        if evicted > 0 {
            debug!("Evicted {} least recently used legal cache entries", evicted);
            record_cache_evictions(evicted);
        }
        record_cache_size(size);

        debug!(
            "Cached response for '{}' (area: {}, confidence: {:.2})",
            normalized, legal_area, decision.confidence
        );

        true
    }

    /// Drop every entry tagged with the legal area and bump its version
    pub fn invalidate_cache_by_legal_area(&self, legal_area: &str) -> usize {
        let (removed, size) = {
            let mut state = self.lock_state();
            let removed = state
                .store
                .remove_where(|entry| entry.legal_area() == legal_area);
            *state
                .counters
                .legal_area_versions
                .entry(legal_area.to_string())
                .or_insert(0) += 1;
            (removed, state.store.len())
        };

        info!(
            "Invalidated {} legal cache entries for area '{}'",
            removed, legal_area
        );
        record_cache_invalidation("legal_area", removed);
        record_cache_size(size);

        removed
    }

    /// Remove entries older than the configured maximum age
    pub fn cleanup_expired_entries(&self) -> usize {
        self.cleanup_entries_older_than(self.config.max_age())
    }

    /// Remove entries created before `now - max_age`
    pub fn cleanup_entries_older_than(&self, max_age: TimeDelta) -> usize {
        let now = Utc::now();

        let (removed, size) = {
            let mut state = self.lock_state();
            let removed = state
                .store
                .remove_where(|entry| entry.is_older_than(max_age, now));
            (removed, state.store.len())
        };

        if removed > 0 {
            info!("Removed {} expired legal cache entries", removed);
            record_cache_invalidation("expired", removed);
        }
        record_cache_size(size);

        removed
    }

    /// Empty the cache and reset every counter
    pub fn clear_cache(&self) -> bool {
        {
            let mut state = self.lock_state();
            state.store.clear();
            state.counters = CacheCounters::default();
        }

        info!("Legal cache cleared");
        record_cache_size(0);

        true
    }

    pub fn get_cache_stats(&self) -> CacheStats {
        self.lock_state().stats()
    }

    pub fn get_cache_analytics(&self) -> CacheAnalytics {
        let state = self.lock_state();

        CacheAnalytics {
            stats: state.stats(),
            legal_area_breakdown: state.counters.legal_areas.clone(),
            legal_area_versions: state.counters.legal_area_versions.clone(),
            memory_usage: analytics::memory_usage(&state.store),
            top_queries: analytics::top_queries(&state.store, self.config.top_queries_limit),
            efficiency: analytics::efficiency(&state.store),
        }
    }

    #[cfg(test)]
    pub(crate) fn insert_entry(&self, entry: CacheEntry, embedding: Option<Vec<f32>>) {
        let key = cache_key(entry.query());
        self.lock_state().store.put(key, entry, embedding);
    }
}

/// Trait for legal cache service operations
#[async_trait::async_trait]
pub trait LegalCacheServiceTrait: Send + Sync + std::fmt::Debug {
    async fn get(&self, query: &str, embedding: Option<Vec<f32>>) -> Option<CacheHit>;

    async fn cache(
        &self,
        query: &str,
        response: LegalResponse,
        embedding: Option<Vec<f32>>,
        legal_area: Option<&str>,
        force_cache: bool,
    ) -> bool;

    fn invalidate_legal_area(&self, legal_area: &str) -> usize;

    fn cleanup_expired(&self) -> usize;

    fn clear(&self) -> bool;

    fn stats(&self) -> CacheStats;

    fn analytics(&self) -> CacheAnalytics;
}

#[async_trait::async_trait]
impl LegalCacheServiceTrait for LegalResponseCacheService {
    async fn get(&self, query: &str, embedding: Option<Vec<f32>>) -> Option<CacheHit> {
        self.get_cached_response(query, embedding).await
    }

    async fn cache(
        &self,
        query: &str,
        response: LegalResponse,
        embedding: Option<Vec<f32>>,
        legal_area: Option<&str>,
        force_cache: bool,
    ) -> bool {
        self.cache_response(query, response, embedding, legal_area, force_cache)
            .await
    }

    fn invalidate_legal_area(&self, legal_area: &str) -> usize {
        self.invalidate_cache_by_legal_area(legal_area)
    }

    fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_entries()
    }

    fn clear(&self) -> bool {
        self.clear_cache()
    }

    fn stats(&self) -> CacheStats {
        self.get_cache_stats()
    }

    fn analytics(&self) -> CacheAnalytics {
        self.get_cache_analytics()
    }
}
