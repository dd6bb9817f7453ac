//! Reddit provider backed by the public `search.json` listing.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::ProviderAdapter;
use crate::types::{Provider, SearchResult};

/// Reddit search provider, sorted by relevance.
#[derive(Debug, Clone)]
pub struct RedditProvider {
    endpoint: String,
}

impl RedditProvider {
    /// Public search listing endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://www.reddit.com/search.json";

    /// Create a provider against the public listing.
    pub fn new() -> Self {
        Self::with_endpoint(Self::DEFAULT_ENDPOINT)
    }

    /// Create a provider against a custom endpoint (used by tests).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for RedditProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
    permalink: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    subreddit: String,
}

#[async_trait]
impl ProviderAdapter for RedditProvider {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "Reddit search");

        let client = http::build_client(config)?;
        let limit = config.per_provider_limit.to_string();
        let request = client.get(&self.endpoint).query(&[
            ("q", query),
            ("limit", limit.as_str()),
            ("sort", "relevance"),
        ]);
        let body = http::fetch_text(request, Provider::Reddit.name()).await?;

        parse_listing(&body, config.per_provider_limit)
    }

    fn name(&self) -> &str {
        Provider::Reddit.name()
    }
}

fn parse_listing(body: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
    let listing: Listing = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("Reddit response: {e}")))?;

    let provider = Provider::Reddit;
    let results: Vec<SearchResult> = listing
        .data
        .children
        .into_iter()
        .take(limit)
        .map(|child| {
            let post = child.data;
            let description = if post.selftext.is_empty() {
                format!("Reddit discussion in r/{}", post.subreddit)
            } else {
                post.selftext
            };
            provider.result(
                post.title,
                format!("https://reddit.com{}", post.permalink),
                description,
                provider.base_score(),
            )
        })
        .collect();

    tracing::debug!(count = results.len(), "Reddit results parsed");
    Ok(results)
}
