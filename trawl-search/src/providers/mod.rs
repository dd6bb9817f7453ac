//! Provider implementations.
//!
//! Each module provides a struct implementing [`crate::provider::ProviderAdapter`].
//! API-backed providers accept a custom endpoint for testing; the search-page
//! providers are offline.

pub mod duckduckgo;
pub mod github;
pub mod hackernews;
pub mod reddit;
pub mod search_page;
pub mod stackoverflow;
pub mod wikipedia;

use std::sync::Arc;

pub use duckduckgo::DuckDuckGoProvider;
pub use github::GitHubProvider;
pub use hackernews::HackerNewsProvider;
pub use reddit::RedditProvider;
pub use search_page::SearchPageProvider;
pub use stackoverflow::StackOverflowProvider;
pub use wikipedia::WikipediaProvider;

use crate::provider::ProviderAdapter;
use crate::types::Provider;

/// Build the default adapter for `provider`.
pub fn adapter_for(provider: Provider) -> Arc<dyn ProviderAdapter> {
    match provider {
        Provider::DuckDuckGo => Arc::new(DuckDuckGoProvider::new()),
        Provider::Wikipedia => Arc::new(WikipediaProvider::new()),
        Provider::GitHub => Arc::new(GitHubProvider::new()),
        Provider::Reddit => Arc::new(RedditProvider::new()),
        Provider::StackOverflow => Arc::new(StackOverflowProvider::new()),
        Provider::HackerNews => Arc::new(HackerNewsProvider::new()),
        Provider::Bing | Provider::Google | Provider::Brave | Provider::Yahoo => {
            Arc::new(SearchPageProvider { provider })
        }
    }
}

/// Build adapters for `providers`, preserving order (registration order
/// determines merge order before ranking).
pub fn adapters_for(providers: &[Provider]) -> Vec<Arc<dyn ProviderAdapter>> {
    providers.iter().copied().map(adapter_for).collect()
}
