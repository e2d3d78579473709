//! In-memory suggestion cache.
//!
//! TTL: 5 minutes by default. Keys are normalized queries (trimmed, lowercase).
//! Timestamps are Unix milliseconds from `chrono::Utc`.

use std::collections::HashMap;

use super::types::{normalize_query, Candidate};

pub const DEFAULT_CACHE_TTL_MS: i64 = 5 * 60 * 1000;

#[derive(Debug, Clone)]
struct CacheEntry {
    cities: Vec<Candidate>,
    timestamp: i64,
}

/// Last successful result set per query.
#[derive(Debug)]
pub struct SuggestionCache {
    ttl_ms: i64,
    entries: HashMap<String, CacheEntry>,
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL_MS)
    }
}

impl SuggestionCache {
    pub fn new(ttl_ms: i64) -> Self {
        Self {
            ttl_ms,
            entries: HashMap::new(),
        }
    }

    /// Look up a query. Returns None if missing or expired.
    pub fn get(&self, query: &str) -> Option<Vec<Candidate>> {
        self.get_at(query, now_ms())
    }

    fn get_at(&self, query: &str, now: i64) -> Option<Vec<Candidate>> {
        let entry = self.entries.get(&normalize_query(query))?;
        if now - entry.timestamp > self.ttl_ms {
            return None; // expired
        }
        Some(entry.cities.clone())
    }

    /// Store the result set for a query, replacing any previous entry.
    pub fn put(&mut self, query: &str, cities: Vec<Candidate>) {
        self.put_at(query, cities, now_ms());
    }

    fn put_at(&mut self, query: &str, cities: Vec<Candidate>, timestamp: i64) {
        self.entries
            .insert(normalize_query(query), CacheEntry { cities, timestamp });
    }

    /// Drop every stale entry. Returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        self.purge_expired_at(now_ms())
    }

    fn purge_expired_at(&mut self, now: i64) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl_ms;
        self.entries.retain(|_, e| now - e.timestamp <= ttl);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
