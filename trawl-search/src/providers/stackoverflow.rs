//! Stack Overflow provider backed by the Stack Exchange search API.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::ProviderAdapter;
use crate::types::{Provider, SearchResult};

/// Stack Overflow question search provider (title match, by relevance).
#[derive(Debug, Clone)]
pub struct StackOverflowProvider {
    endpoint: String,
}

impl StackOverflowProvider {
    /// Stack Exchange search endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.stackexchange.com/2.3/search";

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

impl Default for StackOverflowProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct QuestionSearch {
    #[serde(default)]
    items: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct Question {
    title: String,
    link: String,
    #[serde(default)]
    answer_count: u64,
}

#[async_trait]
impl ProviderAdapter for StackOverflowProvider {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "Stack Overflow search");

        let client = http::build_client(config)?;
        let page_size = config.per_provider_limit.to_string();
        let request = client.get(&self.endpoint).query(&[
            ("order", "desc"),
            ("sort", "relevance"),
            ("intitle", query),
            ("site", "stackoverflow"),
            ("pagesize", page_size.as_str()),
        ]);
        let body = http::fetch_text(request, Provider::StackOverflow.name()).await?;

        parse_questions(&body, config.per_provider_limit)
    }

    fn name(&self) -> &str {
        Provider::StackOverflow.name()
    }
}

fn parse_questions(body: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
    let search: QuestionSearch = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("Stack Overflow response: {e}")))?;

    let provider = Provider::StackOverflow;
    let results: Vec<SearchResult> = search
        .items
        .into_iter()
        .take(limit)
        .map(|question| {
            provider.result(
                question.title,
                question.link,
                format!("Stack Overflow Q&A - {} answers", question.answer_count),
                provider.base_score(),
            )
        })
        .collect();

    tracing::debug!(count = results.len(), "Stack Overflow results parsed");
    Ok(results)
}
