//! Configuration file at ~/.city-suggest/config.json.
//!
//! Every field is optional; a missing file means all defaults.
//! CLI flags are applied on top by the binary.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::suggest::cache::{SuggestionCache, DEFAULT_CACHE_TTL_MS};
use crate::suggest::providers::{CitySource, HttpCitySource, OfflineSource, DEFAULT_USER_AGENT};
use crate::suggest::scorer::ScoringPolicy;
use crate::suggest::session::{RankingSession, DEFAULT_MIN_QUERY_LEN};
use crate::suggest::types::{Result, SuggestError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// External city-search endpoint, e.g. "http://localhost:5000/api/cities".
    pub endpoint: Option<String>,
    /// Never call the external endpoint.
    pub offline: bool,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub cache_ttl_ms: i64,
    pub min_query_len: usize,
    pub policy: ScoringPolicy,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            offline: false,
            timeout_secs: 3,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            policy: ScoringPolicy::default(),
        }
    }
}

impl SuggestConfig {
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".city-suggest")
            .join("config.json")
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from a specific path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .map_err(|e| SuggestError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| SuggestError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.policy.max_results == 0 {
            return Err(SuggestError::Config("policy.max_results must be at least 1".into()));
        }
        if self.policy.ngram_size == 0 {
            return Err(SuggestError::Config("policy.ngram_size must be at least 1".into()));
        }
        if self.timeout_secs == 0 {
            return Err(SuggestError::Config("timeout_secs must be at least 1".into()));
        }
        if self.cache_ttl_ms < 0 {
            return Err(SuggestError::Config("cache_ttl_ms must not be negative".into()));
        }
        Ok(())
    }

    /// The external source this config asks for.
    pub fn source(&self) -> Box<dyn CitySource> {
        match (&self.endpoint, self.offline) {
            (Some(endpoint), false) => Box::new(HttpCitySource::new(
                endpoint.clone(),
                Duration::from_secs(self.timeout_secs),
                &self.user_agent,
            )),
            _ => Box::new(OfflineSource),
        }
    }

    pub fn build_session(&self) -> RankingSession {
        RankingSession::new(
            self.policy.clone(),
            self.source(),
            SuggestionCache::new(self.cache_ttl_ms),
        )
        .with_min_query_len(self.min_query_len)
    }
}
