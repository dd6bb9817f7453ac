//! GitHub provider backed by the repository search API.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::ProviderAdapter;
use crate::types::{Provider, SearchResult};

/// GitHub repository search provider, sorted by stars.
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    endpoint: String,
}

impl GitHubProvider {
    /// Public repository search endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.github.com/search/repositories";

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

impl Default for GitHubProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct RepositorySearch {
    #[serde(default)]
    items: Vec<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    name: String,
    full_name: String,
    html_url: String,
    description: Option<String>,
    owner: Owner,
}

#[derive(Debug, Deserialize)]
struct Owner {
    login: String,
}

#[async_trait]
impl ProviderAdapter for GitHubProvider {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "GitHub search");

        let client = http::build_client(config)?;
        let per_page = config.per_provider_limit.to_string();
        let request = client.get(&self.endpoint).query(&[
            ("q", query),
            ("sort", "stars"),
            ("per_page", per_page.as_str()),
        ]);
        let body = http::fetch_text(request, Provider::GitHub.name()).await?;

        parse_repositories(&body, config.per_provider_limit)
    }

    fn name(&self) -> &str {
        Provider::GitHub.name()
    }
}

fn parse_repositories(body: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
    let search: RepositorySearch = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("GitHub response: {e}")))?;

    let provider = Provider::GitHub;
    let results: Vec<SearchResult> = search
        .items
        .into_iter()
        .take(limit)
        .map(|repo| {
            let description = repo
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| format!("GitHub repository: {}", repo.full_name));
            provider.result(
                format!("{} - {}", repo.name, repo.owner.login),
                repo.html_url,
                description,
                provider.base_score(),
            )
        })
        .collect();

    tracing::debug!(count = results.len(), "GitHub results parsed");
    Ok(results)
}
