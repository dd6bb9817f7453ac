//! Trait definition for pluggable search providers.
//!
//! Each source (a search engine's results page, Wikipedia, GitHub, ...)
//! implements [`ProviderAdapter`] to turn a query into candidate results.

use async_trait::async_trait;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::SearchResult;

/// A pluggable search provider.
///
/// Implementors handle their own:
///
/// - URL construction with query encoding
/// - HTTP request with appropriate headers
/// - Response parsing into [`SearchResult`] values with the provider's score band
///
/// Failures are returned as [`SearchError`] and are isolated by the
/// dispatcher: a failing provider contributes no results and never affects
/// the others. Implementations must be `Send + Sync` so they can be queried
/// concurrently behind an `Arc<dyn ProviderAdapter>`.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Perform a search and return this provider's candidate results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails or the response cannot be
    /// parsed.
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}
