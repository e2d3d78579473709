//! Tiered relevance scoring of a city name against a query.
//!
//! Tiers are evaluated cheapest-first and the first one that fires wins:
//! exact, prefix, substring, then (for queries of 3+ characters) edit
//! distance, Jaro-Winkler similarity and bigram overlap. The order is the
//! contract; the numbers live in [`ScoringPolicy`] and can be tuned.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::metrics::{edit_distance, ngram_overlap, prefix_weighted_similarity, DEFAULT_NGRAM_SIZE};

/// Numeric constants behind every scoring tier and the ranking cut-offs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub exact_score: f64,
    pub prefix_score: f64,
    pub contains_score: f64,
    /// Queries shorter than this never reach the fuzzy tiers.
    pub fuzzy_min_query_len: usize,
    /// Allowed edits as a fraction of the query length (at least one).
    pub max_distance_ratio: f64,
    pub edit_base: f64,
    pub edit_step: f64,
    /// Edit-distance scores must be strictly above this to count.
    pub edit_floor: f64,
    pub similarity_threshold: f64,
    pub similarity_weight: f64,
    pub ngram_threshold: f64,
    pub ngram_weight: f64,
    pub ngram_size: usize,
    /// Built-in and external candidates need a score strictly above this.
    pub accept_threshold: f64,
    pub max_results: usize,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            exact_score: 1000.0,
            prefix_score: 900.0,
            contains_score: 800.0,
            fuzzy_min_query_len: 3,
            max_distance_ratio: 0.4,
            edit_base: 700.0,
            edit_step: 100.0,
            edit_floor: 500.0,
            similarity_threshold: 0.7,
            similarity_weight: 600.0,
            ngram_threshold: 0.5,
            ngram_weight: 500.0,
            ngram_size: DEFAULT_NGRAM_SIZE,
            accept_threshold: 450.0,
            max_results: 8,
        }
    }
}

/// Which tier produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Prefix,
    Contains,
    EditDistance,
    Similarity,
    Ngram,
    NoMatch,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Prefix => write!(f, "prefix"),
            Self::Contains => write!(f, "contains"),
            Self::EditDistance => write!(f, "edit-distance"),
            Self::Similarity => write!(f, "similarity"),
            Self::Ngram => write!(f, "n-gram"),
            Self::NoMatch => write!(f, "none"),
        }
    }
}

/// Scores candidate names against a query under a [`ScoringPolicy`].
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    policy: ScoringPolicy,
}

impl RelevanceScorer {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Relevance of `candidate_name` for `query`; 0 means no match.
    pub fn score(&self, candidate_name: &str, query: &str) -> f64 {
        self.score_tiered(candidate_name, query).0
    }

    /// Like [`score`](Self::score), also reporting the tier that fired.
    pub fn score_tiered(&self, candidate_name: &str, query: &str) -> (f64, MatchTier) {
        let p = &self.policy;
        let name = candidate_name.to_lowercase();
        let query = query.trim().to_lowercase();

        if name == query {
            return (p.exact_score, MatchTier::Exact);
        }
        if name.starts_with(&query) {
            return (p.prefix_score, MatchTier::Prefix);
        }
        if name.contains(&query) {
            return (p.contains_score, MatchTier::Contains);
        }

        let query_len = query.chars().count();
        if query_len < p.fuzzy_min_query_len {
            return (0.0, MatchTier::NoMatch);
        }

        let distance = edit_distance(&name, &query);
        let max_distance = ((query_len as f64 * p.max_distance_ratio).floor() as usize).max(1);
        if distance <= max_distance {
            let s = p.edit_base - p.edit_step * distance as f64;
            if s > p.edit_floor {
                return (s, MatchTier::EditDistance);
            }
        }

        let similarity = prefix_weighted_similarity(&name, &query);
        if similarity > p.similarity_threshold {
            return (similarity * p.similarity_weight, MatchTier::Similarity);
        }

        let overlap = ngram_overlap(&name, &query, p.ngram_size);
        if overlap > p.ngram_threshold {
            return (overlap * p.ngram_weight, MatchTier::Ngram);
        }

        (0.0, MatchTier::NoMatch)
    }
}
