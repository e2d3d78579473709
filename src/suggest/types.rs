//! Core types for the suggestion subsystem.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A city suggestion as produced by a source and consumed by the dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub name: String,
    /// ISO 3166-1 alpha-2 country code (e.g. "GB", "US")
    pub country: String,
    /// Label shown to the user (e.g. "London, United Kingdom")
    pub display: String,
    /// Value written back into the search field when picked
    pub search_value: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>, country: impl Into<String>, display: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            search_value: name.clone(),
            name,
            country: country.into(),
            display: display.into(),
        }
    }

    /// Identity used to collapse the same city coming from different sources.
    pub fn dedup_key(&self) -> String {
        format!("{}-{}", self.name.to_lowercase(), self.country.to_lowercase())
    }
}

/// Wire shape accepted from external sources; `display` and `searchValue` are optional.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCandidate {
    name: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    display: Option<String>,
    #[serde(default)]
    search_value: Option<String>,
}

impl<'de> Deserialize<'de> for Candidate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawCandidate::deserialize(deserializer)?;
        let display = raw
            .display
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| {
                if raw.country.is_empty() {
                    raw.name.clone()
                } else {
                    format!("{}, {}", raw.name, raw.country)
                }
            });
        let search_value = raw
            .search_value
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| raw.name.clone());
        Ok(Self {
            name: raw.name,
            country: raw.country,
            display,
            search_value,
        })
    }
}

/// Where a candidate came from during a ranking pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    Fallback,
    External,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fallback => write!(f, "built-in"),
            Self::External => write!(f, "external"),
        }
    }
}

/// A candidate with its relevance score, alive only for one ranking pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub relevance_score: f64,
    pub source: CandidateSource,
}

/// Result of one suggestion pass, tagged with the generation that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestions {
    pub generation: u64,
    pub cities: Vec<Candidate>,
    pub from_cache: bool,
}

impl Suggestions {
    pub fn empty(generation: u64) -> Self {
        Self {
            generation,
            cities: Vec::new(),
            from_cache: false,
        }
    }
}

/// Trim and case-fold a raw query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Errors surfaced by the suggestion subsystem.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid city search response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, SuggestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_key_is_case_insensitive() {
        let a = Candidate::new("London", "GB", "London, United Kingdom");
        let b = Candidate::new("LONDON", "gb", "London");
        assert_eq!(a.dedup_key(), "london-gb");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_deserialize_defaults_search_value() {
        let json = r#"{"name": "Porto", "country": "PT", "display": "Porto, Portugal"}"#;
        let c: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(c.search_value, "Porto");
        assert_eq!(c.display, "Porto, Portugal");
    }

    #[test]
    fn test_deserialize_rejects_missing_name() {
        let err = serde_json::from_str::<Candidate>(r#"{"country": "PT"}"#).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_deserialize_missing_display() {
        let json = r#"{"name": "Porto", "country": "PT", "searchValue": "Porto, PT"}"#;
        let c: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(c.display, "Porto, PT");
        assert_eq!(c.search_value, "Porto, PT");
    }

    #[test]
    fn test_serialize_camel_case() {
        let c = Candidate::new("Oslo", "NO", "Oslo, Norway");
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["searchValue"], "Oslo");
        assert!(v.get("search_value").is_none());
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  San FRAN "), "san fran");
    }

    #[test]
    fn test_source_display() {
        assert_eq!(CandidateSource::Fallback.to_string(), "built-in");
        assert_eq!(CandidateSource::External.to_string(), "external");
    }
}
