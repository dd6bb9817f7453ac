//! Hacker News provider backed by the Algolia search API.
//!
//! Ask HN and similar text posts have no external URL; those hits are
//! skipped.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::ProviderAdapter;
use crate::types::{Provider, SearchResult};

/// Hacker News story search provider.
#[derive(Debug, Clone)]
pub struct HackerNewsProvider {
    endpoint: String,
}

impl HackerNewsProvider {
    /// Algolia HN search endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://hn.algolia.com/api/v1/search";

    /// Create a provider against the public API.
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

impl Default for HackerNewsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct StorySearch {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    title: Option<String>,
    url: Option<String>,
    points: Option<u64>,
}

#[async_trait]
impl ProviderAdapter for HackerNewsProvider {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "Hacker News search");

        let client = http::build_client(config)?;
        let hits_per_page = config.per_provider_limit.to_string();
        let request = client.get(&self.endpoint).query(&[
            ("query", query),
            ("tags", "story"),
            ("hitsPerPage", hits_per_page.as_str()),
        ]);
        let body = http::fetch_text(request, Provider::HackerNews.name()).await?;

        parse_hits(&body, config.per_provider_limit)
    }

    fn name(&self) -> &str {
        Provider::HackerNews.name()
    }
}

fn parse_hits(body: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
    let search: StorySearch = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("Hacker News response: {e}")))?;

    let provider = Provider::HackerNews;
    let results: Vec<SearchResult> = search
        .hits
        .into_iter()
        .take(limit)
        .filter_map(|hit| {
            let title = hit.title.filter(|t| !t.is_empty())?;
            let url = hit.url.filter(|u| !u.is_empty())?;
            Some(provider.result(
                title,
                url,
                format!("Hacker News - {} points", hit.points.unwrap_or(0)),
                provider.base_score(),
            ))
        })
        .collect();

    tracing::debug!(count = results.len(), "Hacker News results parsed");
    Ok(results)
}
