//! Concurrent multi-provider fan-out with settle-all semantics.
//!
//! Every adapter call is started before any is awaited. Each call is
//! isolated behind a timeout and a panic guard, so one misbehaving provider
//! contributes nothing and never delays or aborts the others.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::provider::ProviderAdapter;
use crate::types::SearchResult;

/// Fan `query` out to every adapter and concatenate the successful results.
///
/// # Pipeline
///
/// 1. Blank query: return an empty list without invoking any adapter
/// 2. Start every adapter call, each bounded by `config.timeout_seconds`
/// 3. Join all calls with [`futures::future::join_all`]
/// 4. Log each failure once at warn level; drop its contribution
/// 5. Concatenate successes in adapter registration order
///
/// Ordering by score is the ranker's job, not the dispatcher's.
pub async fn dispatch(
    query: &str,
    adapters: &[Arc<dyn ProviderAdapter>],
    config: &SearchConfig,
) -> Vec<SearchResult> {
    let query = query.trim();
    if query.is_empty() {
        tracing::debug!("blank query, skipping dispatch");
        return Vec::new();
    }

    let timeout = Duration::from_secs(config.timeout_seconds);
    let calls: Vec<_> = adapters
        .iter()
        .map(|adapter| settle(adapter.as_ref(), query, config, timeout))
        .collect();

    let outcomes = futures::future::join_all(calls).await;

    let mut candidates = Vec::new();
    for (adapter, outcome) in adapters.iter().zip(outcomes) {
        match outcome {
            Ok(results) => {
                tracing::debug!(
                    provider = adapter.name(),
                    count = results.len(),
                    "provider returned results"
                );
                candidates.extend(results);
            }
            Err(err) => {
                tracing::warn!(provider = adapter.name(), error = %err, "provider query failed");
            }
        }
    }

    candidates
}

/// Run one adapter call to completion, mapping timeouts and panics to errors.
async fn settle(
    adapter: &dyn ProviderAdapter,
    query: &str,
    config: &SearchConfig,
    timeout: Duration,
) -> Result<Vec<SearchResult>, SearchError> {
    let call = AssertUnwindSafe(adapter.search(query, config)).catch_unwind();
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(result)) => result,
        Ok(Err(_panic)) => Err(SearchError::Provider(format!(
            "{} panicked during search",
            adapter.name()
        ))),
        Err(_elapsed) => Err(SearchError::Timeout(format!(
            "{} exceeded {}s",
            adapter.name(),
            timeout.as_secs()
        ))),
    }
}
