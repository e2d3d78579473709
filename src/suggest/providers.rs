//! Candidate sources: the external city-search endpoint and an offline stub.

use std::time::Duration;

use tracing::{debug, warn};

use super::types::{Candidate, Result, SuggestError};

/// Most phrasings tried against an external source for one query.
pub const MAX_QUERY_VARIATIONS: usize = 3;

pub const DEFAULT_USER_AGENT: &str = concat!("city-suggest/", env!("CARGO_PKG_VERSION"));

/// Anything that can turn free text into city candidates.
pub trait CitySource: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    fn search(&self, query: &str) -> Result<Vec<Candidate>>;
}

// ─── HTTP provider ──────────────────────────────────────────────

/// `GET {endpoint}?q={query}` returning a JSON array of candidates.
pub struct HttpCitySource {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpCitySource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, user_agent: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(user_agent)
            .build();
        Self {
            endpoint: endpoint.into(),
            agent,
        }
    }
}

impl CitySource for HttpCitySource {
    fn name(&self) -> &str {
        "http"
    }

    fn search(&self, query: &str) -> Result<Vec<Candidate>> {
        let response = self
            .agent
            .get(&self.endpoint)
            .query("q", query)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => SuggestError::Network(format!("HTTP {}", code)),
                other => SuggestError::Network(other.to_string()),
            })?;

        response
            .into_json::<Vec<Candidate>>()
            .map_err(|e| SuggestError::InvalidResponse(e.to_string()))
    }
}

// ─── Offline provider ───────────────────────────────────────────

/// Source that never has anything; used with `--offline` or no endpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineSource;

impl CitySource for OfflineSource {
    fn name(&self) -> &str {
        "offline"
    }

    fn search(&self, _query: &str) -> Result<Vec<Candidate>> {
        Ok(Vec::new())
    }
}

// ─── Query variations ───────────────────────────────────────────

/// Alternate phrasings of a query, most specific first, deduplicated.
///
/// "Portland, Oregon, US" → ["Portland, Oregon, US", "Portland", "Portland, US"]
/// "san jose costa rica"  → ["san jose costa rica", "san", "san rica"]
pub fn query_variations(query: &str) -> Vec<String> {
    let raw = query.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    let mut variations = vec![raw.to_string()];

    let (parts, joiner): (Vec<&str>, &str) = if raw.contains(',') {
        (raw.split(',').map(str::trim).filter(|p| !p.is_empty()).collect(), ", ")
    } else if raw.contains(char::is_whitespace) {
        (raw.split_whitespace().collect(), " ")
    } else {
        (Vec::new(), "")
    };

    if let Some(first) = parts.first() {
        variations.push(first.to_string());
        if parts.len() > 1 {
            if let Some(last) = parts.last() {
                variations.push(format!("{}{}{}", first, joiner, last));
            }
        }
    }

    let mut unique: Vec<String> = Vec::with_capacity(MAX_QUERY_VARIATIONS);
    for v in variations {
        if !unique.contains(&v) {
            unique.push(v);
        }
    }
    unique.truncate(MAX_QUERY_VARIATIONS);
    unique
}

/// Try each phrasing in order until one yields results.
///
/// Failures count as "no results" for that phrasing; this never errors.
pub fn fetch_with_variations(source: &dyn CitySource, query: &str) -> Vec<Candidate> {
    for variation in query_variations(query) {
        match source.search(&variation) {
            Ok(cities) if !cities.is_empty() => {
                debug!(source = source.name(), query = %variation, count = cities.len(), "external hit");
                return cities;
            }
            Ok(_) => debug!(source = source.name(), query = %variation, "external empty"),
            Err(e) => warn!(source = source.name(), query = %variation, error = %e, "external search failed"),
        }
    }
    Vec::new()
}
