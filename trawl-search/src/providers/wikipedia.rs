//! Wikipedia provider backed by the MediaWiki opensearch API.
//!
//! Opensearch answers with a positional array:
//! `[query, [titles], [descriptions], [urls]]`.

use async_trait::async_trait;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::ProviderAdapter;
use crate::types::{Provider, SearchResult};

/// Wikipedia opensearch provider.
#[derive(Debug, Clone)]
pub struct WikipediaProvider {
    endpoint: String,
}

impl WikipediaProvider {
    /// English Wikipedia API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://en.wikipedia.org/w/api.php";

    /// Create a provider against English Wikipedia.
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

impl Default for WikipediaProvider {
    fn default() -> Self {
        Self::new()
    }
}

type OpenSearchResponse = (String, Vec<String>, Vec<String>, Vec<String>);

#[async_trait]
impl ProviderAdapter for WikipediaProvider {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "Wikipedia search");

        let client = http::build_client(config)?;
        let limit = config.per_provider_limit.to_string();
        let request = client.get(&self.endpoint).query(&[
            ("action", "opensearch"),
            ("search", query),
            ("limit", limit.as_str()),
            ("format", "json"),
            ("origin", "*"),
        ]);
        let body = http::fetch_text(request, Provider::Wikipedia.name()).await?;

        parse_opensearch(&body, config.per_provider_limit)
    }

    fn name(&self) -> &str {
        Provider::Wikipedia.name()
    }
}

fn parse_opensearch(body: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
    let (_query, titles, descriptions, urls): OpenSearchResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("Wikipedia response: {e}")))?;

    let provider = Provider::Wikipedia;
    let results: Vec<SearchResult> = titles
        .into_iter()
        .zip(urls)
        .enumerate()
        .take(limit)
        .map(|(i, (title, url))| {
            let description = descriptions
                .get(i)
                .filter(|d| !d.is_empty())
                .cloned()
                .unwrap_or_else(|| format!("Wikipedia article about {title}"));
            provider.result(title, url, description, provider.base_score())
        })
        .collect();

    tracing::debug!(count = results.len(), "Wikipedia results parsed");
    Ok(results)
}
