//! City suggestion subsystem.
//!
//! Provides string similarity metrics, tiered relevance scoring, a built-in
//! fallback city index, an external city-search client, a TTL cache and the
//! ranking session that ties them together.

pub mod cache;
pub mod index;
pub mod metrics;
pub mod providers;
pub mod ranker;
pub mod scorer;
pub mod session;
pub mod types;

pub use cache::SuggestionCache;
pub use index::StaticCityIndex;
pub use providers::{fetch_with_variations, query_variations, CitySource, HttpCitySource, OfflineSource};
pub use ranker::CandidateRanker;
pub use scorer::{MatchTier, RelevanceScorer, ScoringPolicy};
pub use session::RankingSession;
pub use types::{Candidate, CandidateSource, ScoredCandidate, SuggestError, Suggestions};
