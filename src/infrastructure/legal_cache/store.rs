//! LRU-ordered entry store with a parallel embedding store

use std::collections::HashMap;

use lru::LruCache;

use crate::domain::legal_cache::CacheEntry;

/// Entries keyed by exact-match key, kept in recency order, plus the query
/// embeddings under the same keys.
///
/// Every stored vector belongs to a live entry: removing or evicting an entry
/// drops its vector too. Size never exceeds `max_size` after a `put`.
#[derive(Debug)]
pub struct CacheEntryStore {
    entries: LruCache<String, CacheEntry>,
    embeddings: HashMap<String, Vec<f32>>,
    max_size: usize,
}

impl CacheEntryStore {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: LruCache::unbounded(),
            embeddings: HashMap::new(),
            max_size: max_size.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn embedding_count(&self) -> usize {
        self.embeddings.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    /// Look at an entry without touching recency
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.peek(key)
    }

    /// Read an entry for update, moving it to the most-recently-used position
    pub fn get_mut(&mut self, key: &str) -> Option<&mut CacheEntry> {
        self.entries.get_mut(key)
    }

    pub fn embedding(&self, key: &str) -> Option<&[f32]> {
        self.embeddings.get(key).map(Vec::as_slice)
    }

    /// Insert or overwrite an entry as most recently used, then evict from
    /// the least-recently-used end until the size bound holds.
    ///
    /// Without a new embedding an overwrite keeps the vector already stored
    /// for the key, which was computed from the same normalized query.
    /// Returns the number of evicted entries.
    pub fn put(&mut self, key: String, mut entry: CacheEntry, embedding: Option<Vec<f32>>) -> usize {
        if let Some(vector) = embedding {
            self.embeddings.insert(key.clone(), vector);
        } else if !self.entries.contains(&key) {
            self.embeddings.remove(&key);
        }

        entry.set_has_embedding(self.embeddings.contains_key(&key));
        self.entries.put(key, entry);

        self.evict_overflow()
    }

    fn evict_overflow(&mut self) -> usize {
        let mut evicted = 0;

        while self.entries.len() > self.max_size {
            match self.entries.pop_lru() {
                Some((key, _)) => {
                    self.embeddings.remove(&key);
                    evicted += 1;
                }
                None => break,
            }
        }

        evicted
    }

    /// Remove an entry and its vector; unknown keys are a no-op
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        self.embeddings.remove(key);
        self.entries.pop(key)
    }

    /// Remove every entry matching the predicate, returning how many went
    pub fn remove_where<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&CacheEntry) -> bool,
    {
        let keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| predicate(entry))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &keys {
            self.remove(key);
        }

        keys.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.embeddings.clear();
    }

    /// Entries from most to least recently used
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CacheEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Stored vectors, in the same recency order as `iter`
    pub fn embeddings(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.entries.iter().filter_map(|(key, _)| {
            self.embeddings
                .get(key)
                .map(|vector| (key.as_str(), vector.as_slice()))
        })
    }

    /// Bytes held by stored vectors
    pub fn embedding_bytes(&self) -> usize {
        self.embeddings
            .values()
            .map(|vector| vector.len() * std::mem::size_of::<f32>())
            .sum()
    }
}
