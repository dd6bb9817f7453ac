//! # trawl-search
//!
//! Concurrent multi-provider search aggregation for trawl.
//!
//! A query is fanned out to every registered provider at once. Results are
//! merged, deduplicated by case-insensitive URL, sorted by provider score and
//! truncated to at most 20 entries. No API keys are needed: API-backed
//! providers use public keyless endpoints and the general web engines
//! contribute a link to their own results page.
//!
//! ## Design
//!
//! - Providers implement [`ProviderAdapter`]; the set is a runtime list
//! - Each provider call is bounded by a timeout and isolated from panics
//! - Provider failures are logged and contribute nothing; they never fail
//!   the aggregate
//! - Ranking is pure and deterministic
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - No network listeners: this is a library, not a server
//! - Search queries are logged only at trace level

pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod provider;
pub mod providers;
pub mod types;

use std::sync::Arc;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use orchestrator::{dispatch, rank, MAX_RANKED_RESULTS};
pub use provider::ProviderAdapter;
pub use providers::{adapter_for, adapters_for};
pub use types::{Provider, SearchResult};

/// Search `adapters` concurrently and return the ranked, deduplicated list.
///
/// Returns up to `config.max_results` results. A blank query returns an
/// empty list without contacting any provider.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid. Individual
/// provider failures are logged and never surface here; if every provider
/// fails the result is simply empty.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> trawl_search::Result<()> {
/// let config = trawl_search::SearchConfig::default();
/// let adapters = trawl_search::adapters_for(&config.providers);
/// let results = trawl_search::search("rust programming", &adapters, &config).await?;
/// for result in &results {
///     println!("{}: {}", result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(
    query: &str,
    adapters: &[Arc<dyn ProviderAdapter>],
    config: &SearchConfig,
) -> Result<Vec<SearchResult>> {
    config.validate()?;
    tracing::trace!(query, "aggregating search");

    let candidates = orchestrator::dispatch(query, adapters, config).await;
    let candidate_count = candidates.len();
    let ranked = orchestrator::rank_with_limit(candidates, config.max_results);

    tracing::info!(
        providers = adapters.len(),
        candidates = candidate_count,
        ranked = ranked.len(),
        "search aggregation complete"
    );
    Ok(ranked)
}

/// Search every bundled provider with the default configuration.
///
/// # Errors
///
/// Same as [`search`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> trawl_search::Result<()> {
/// let results = trawl_search::search_default("weather today").await?;
/// for result in &results {
///     println!("{}: {}", result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_default(query: &str) -> Result<Vec<SearchResult>> {
    let config = SearchConfig::default();
    let adapters = adapters_for(&config.providers);
    search(query, &adapters, &config).await
}
