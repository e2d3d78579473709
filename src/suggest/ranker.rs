//! Merges built-in and external candidates into one bounded, ranked list.

use std::collections::HashSet;

use super::scorer::RelevanceScorer;
use super::types::{Candidate, CandidateSource, ScoredCandidate};

/// Dedups, scores, sorts and truncates candidates from both sources.
#[derive(Debug, Clone, Default)]
pub struct CandidateRanker {
    scorer: RelevanceScorer,
}

impl CandidateRanker {
    pub fn new(scorer: RelevanceScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &RelevanceScorer {
        &self.scorer
    }

    /// Ranked output in display shape.
    pub fn rank(&self, external: &[Candidate], fallback: &[Candidate], query: &str) -> Vec<Candidate> {
        self.rank_scored(external, fallback, query)
            .into_iter()
            .map(|s| s.candidate)
            .collect()
    }

    /// Ranked output with scores and provenance.
    ///
    /// Built-in candidates go in first and are kept unconditionally (they were
    /// already filtered by the index). External candidates must be new and
    /// score above the acceptance threshold: the local scorer has the final say.
    pub fn rank_scored(
        &self,
        external: &[Candidate],
        fallback: &[Candidate],
        query: &str,
    ) -> Vec<ScoredCandidate> {
        let policy = self.scorer.policy();
        let mut seen: HashSet<String> = HashSet::new();
        let mut ranked: Vec<ScoredCandidate> = Vec::with_capacity(fallback.len() + external.len());

        for city in fallback {
            if seen.insert(city.dedup_key()) {
                ranked.push(ScoredCandidate {
                    relevance_score: self.scorer.score(&city.name, query),
                    candidate: city.clone(),
                    source: CandidateSource::Fallback,
                });
            }
        }

        for city in external {
            let key = city.dedup_key();
            if seen.contains(&key) {
                continue;
            }
            let score = self.scorer.score(&city.name, query);
            if score > policy.accept_threshold {
                seen.insert(key);
                ranked.push(ScoredCandidate {
                    candidate: city.clone(),
                    relevance_score: score,
                    source: CandidateSource::External,
                });
            } else {
                tracing::trace!(name = %city.name, score, "dropped external candidate");
            }
        }

        ranked.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(policy.max_results);
        ranked
    }
}
