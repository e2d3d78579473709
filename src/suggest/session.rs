//! Ranking session: orchestrates one suggestion pass.
//!
//! Flow:  normalize → length guard → cache → built-in index + external source
//!        (with query variations) → rank → cache store
//!
//! Every pass is tagged with a generation. A caller that fires a new pass
//! before an older one returns should drop results whose generation is no
//! longer current.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tracing::debug;

use super::cache::SuggestionCache;
use super::index::StaticCityIndex;
use super::providers::{fetch_with_variations, CitySource, OfflineSource};
use super::ranker::CandidateRanker;
use super::scorer::{RelevanceScorer, ScoringPolicy};
use super::types::{normalize_query, ScoredCandidate, Suggestions};

/// Shortest query (in characters) that triggers a suggestion pass.
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Request-scoped suggestion state: cache, generation counter, sources.
pub struct RankingSession {
    index: StaticCityIndex,
    ranker: CandidateRanker,
    source: Box<dyn CitySource>,
    cache: Mutex<SuggestionCache>,
    generation: AtomicU64,
    min_query_len: usize,
}

impl RankingSession {
    pub fn new(policy: ScoringPolicy, source: Box<dyn CitySource>, cache: SuggestionCache) -> Self {
        let scorer = RelevanceScorer::new(policy);
        Self {
            index: StaticCityIndex::new(scorer.clone()),
            ranker: CandidateRanker::new(scorer),
            source,
            cache: Mutex::new(cache),
            generation: AtomicU64::new(0),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }

    /// Session with default policy and no external source.
    pub fn offline() -> Self {
        Self::new(ScoringPolicy::default(), Box::new(OfflineSource), SuggestionCache::default())
    }

    pub fn with_min_query_len(mut self, min_query_len: usize) -> Self {
        self.min_query_len = min_query_len;
        self
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    pub fn index(&self) -> &StaticCityIndex {
        &self.index
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Start a new pass, superseding every earlier one.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Run a fresh pass for `query`.
    pub fn suggest(&self, query: &str) -> Suggestions {
        let generation = self.begin();
        self.suggest_for(generation, query)
    }

    /// Run a pass under an already-issued generation.
    pub fn suggest_for(&self, generation: u64, query: &str) -> Suggestions {
        let q = normalize_query(query);
        if q.chars().count() < self.min_query_len {
            return Suggestions::empty(generation);
        }

        if let Some(cities) = self.lock_cache().get(&q) {
            debug!(query = %q, count = cities.len(), "cache hit");
            return Suggestions {
                generation,
                cities,
                from_cache: true,
            };
        }

        let fallback = self.index.search(&q);
        // raw (trimmed) text so variations can still split on the original punctuation
        let external = fetch_with_variations(self.source.as_ref(), query.trim());
        let cities = self.ranker.rank(&external, &fallback, &q);

        debug!(
            query = %q,
            generation,
            fallback = fallback.len(),
            external = external.len(),
            ranked = cities.len(),
            "ranked suggestions"
        );

        if !cities.is_empty() {
            self.lock_cache().put(&q, cities.clone());
        }

        Suggestions {
            generation,
            cities,
            from_cache: false,
        }
    }

    /// Same pipeline as [`suggest`](Self::suggest) but uncached, with scores
    /// and provenance kept.
    pub fn explain(&self, query: &str) -> Vec<ScoredCandidate> {
        let q = normalize_query(query);
        if q.chars().count() < self.min_query_len {
            return Vec::new();
        }
        let fallback = self.index.search(&q);
        let external = fetch_with_variations(self.source.as_ref(), query.trim());
        self.ranker.rank_scored(&external, &fallback, &q)
    }

    /// Scorer shared by the index and the ranker.
    pub fn scorer(&self) -> &RelevanceScorer {
        self.ranker.scorer()
    }

    pub fn purge_cache(&self) -> usize {
        self.lock_cache().purge_expired()
    }

    pub fn cached_queries(&self) -> usize {
        self.lock_cache().len()
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, SuggestionCache> {
        // a poisoned cache only ever holds complete entries
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::types::{Candidate, CandidateSource, Result, SuggestError};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        cities: Vec<Candidate>,
        fail: bool,
    }

    impl CitySource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        fn search(&self, _query: &str) -> Result<Vec<Candidate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SuggestError::Network("connection refused".into()));
            }
            Ok(self.cities.clone())
        }
    }

    fn session_with(cities: Vec<Candidate>, fail: bool) -> (RankingSession, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            calls: calls.clone(),
            cities,
            fail,
        };
        let session = RankingSession::new(ScoringPolicy::default(), Box::new(source), SuggestionCache::default());
        (session, calls)
    }

    #[test]
    fn test_lon_ranks_london_first() {
        let session = RankingSession::offline();
        let result = session.suggest("lon");
        assert_eq!(result.cities[0].name, "London");
        assert!(!result.from_cache);

        let scored = session.explain("lon");
        assert_eq!(scored[0].candidate.name, "London");
        assert_eq!(scored[0].relevance_score, 900.0);
        assert_eq!(scored[0].source, CandidateSource::Fallback);
    }

    #[test]
    fn test_short_query_skips_everything() {
        let (session, calls) = session_with(vec![], false);
        let result = session.suggest(" l ");
        assert!(result.cities.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.cached_queries(), 0);
    }

    #[test]
    fn test_min_query_len_configurable() {
        let (session, calls) = session_with(vec![], false);
        let session = session.with_min_query_len(4);
        assert!(session.suggest("lon").cities.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_second_query_served_from_cache() {
        let (session, calls) = session_with(vec![Candidate::new("Londrina", "BR", "Londrina, Brazil")], false);

        let first = session.suggest("Lond");
        assert!(!first.from_cache);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let second = session.suggest("  LOND");
        assert!(second.from_cache);
        assert_eq!(second.cities, first.cities);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_external_merged_after_fallback() {
        let (session, _) = session_with(
            vec![
                Candidate::new("London", "GB", "London (external)"),
                Candidate::new("Londrina", "BR", "Londrina, Brazil"),
            ],
            false,
        );
        let scored = session.explain("lond");
        assert_eq!(scored[0].candidate.display, "London, United Kingdom");
        assert_eq!(scored[0].source, CandidateSource::Fallback);
        assert_eq!(scored[1].candidate.name, "Londrina");
        assert_eq!(scored[1].source, CandidateSource::External);
        let external = scored.iter().filter(|s| s.source == CandidateSource::External).count();
        assert_eq!(external, 1);
    }

    #[test]
    fn test_external_failure_degrades_to_fallback() {
        let (session, calls) = session_with(vec![], true);
        let result = session.suggest("paris");
        assert_eq!(result.cities[0].name, "Paris");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_results_not_cached() {
        let (session, calls) = session_with(vec![], false);
        assert!(session.suggest("qqqqzz").cities.is_empty());
        assert!(session.suggest("qqqqzz").cities.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(session.cached_queries(), 0);
    }

    #[test]
    fn test_generation_supersedes() {
        let session = RankingSession::offline();
        let stale = session.begin();
        let fresh = session.begin();
        assert!(fresh > stale);

        let late = session.suggest_for(stale, "paris");
        assert!(!session.is_current(late.generation));

        let current = session.suggest_for(fresh, "paris");
        assert!(session.is_current(current.generation));
    }

    #[test]
    fn test_suggest_bumps_generation() {
        let session = RankingSession::offline();
        let a = session.suggest("ber");
        let b = session.suggest("berl");
        assert_eq!(b.generation, a.generation + 1);
        assert!(!session.is_current(a.generation));
    }

    #[test]
    fn test_never_more_than_max_results() {
        let many: Vec<Candidate> = (0..30)
            .map(|i| Candidate::new(format!("Santa {}", i), "US", format!("Santa {}", i)))
            .collect();
        let (session, _) = session_with(many, false);
        assert_eq!(session.suggest("san").cities.len(), 8);
    }

    #[test]
    fn test_session_shared_across_threads() {
        let session = Arc::new(RankingSession::offline());
        let handles: Vec<_> = ["par", "ber", "tok", "lon"]
            .into_iter()
            .map(|q| {
                let s = session.clone();
                std::thread::spawn(move || s.suggest(q).cities.len())
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap() > 0);
        }
        assert_eq!(session.cached_queries(), 4);
    }
}
