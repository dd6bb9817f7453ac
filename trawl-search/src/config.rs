//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which providers are queried, per-provider
//! timeouts and result limits, and request headers.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::orchestrator::rank::MAX_RANKED_RESULTS;
use crate::types::Provider;

/// Configuration for a search aggregation.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Which providers to query. Queried concurrently; results are merged in
    /// this order before ranking.
    pub providers: Vec<Provider>,
    /// Maximum number of results kept after deduplication and ranking.
    /// Never more than [`MAX_RANKED_RESULTS`].
    pub max_results: usize,
    /// How many results each API-backed provider asks its backend for.
    pub per_provider_limit: usize,
    /// Per-provider timeout in seconds. A provider that does not answer in
    /// time contributes no results.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            providers: Provider::all().to_vec(),
            max_results: MAX_RANKED_RESULTS,
            per_provider_limit: 2,
            timeout_seconds: 8,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be in `1..=20`
    /// - `per_provider_limit` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    ///
    /// An empty provider list is valid: every query then ranks to nothing.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.max_results > MAX_RANKED_RESULTS {
            return Err(SearchError::Config(format!(
                "max_results must be at most {MAX_RANKED_RESULTS}"
            )));
        }
        if self.per_provider_limit == 0 {
            return Err(SearchError::Config(
                "per_provider_limit must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
