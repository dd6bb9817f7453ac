//! DuckDuckGo provider — instant-answer API plus a results-page link.
//!
//! The instant-answer endpoint returns at most one direct answer and one
//! encyclopedia abstract. Whatever it returns, a link to the full results
//! page is always appended.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::ProviderAdapter;
use crate::types::{Provider, SearchResult};

use super::search_page::results_page_url;

/// Score for a direct answer.
const ANSWER_SCORE: u32 = 10;

/// Score for an encyclopedia abstract.
const ABSTRACT_SCORE: u32 = 9;

/// DuckDuckGo instant-answer provider.
#[derive(Debug, Clone)]
pub struct DuckDuckGoProvider {
    endpoint: String,
}

impl DuckDuckGoProvider {
    /// Public instant-answer endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.duckduckgo.com/";

    /// Create a provider against the public endpoint.
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

impl Default for DuckDuckGoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InstantAnswer {
    #[serde(rename = "Answer")]
    answer: serde_json::Value,
    #[serde(rename = "AnswerURL")]
    answer_url: String,
    #[serde(rename = "Abstract")]
    abstract_text: String,
    #[serde(rename = "AbstractURL")]
    abstract_url: String,
    #[serde(rename = "AbstractSource")]
    abstract_source: String,
}

#[async_trait]
impl ProviderAdapter for DuckDuckGoProvider {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "DuckDuckGo search");

        let client = http::build_client(config)?;
        let request = client.get(&self.endpoint).query(&[
            ("q", query),
            ("format", "json"),
            ("no_html", "1"),
            ("skip_disambig", "1"),
        ]);
        let body = http::fetch_text(request, Provider::DuckDuckGo.name()).await?;

        parse_instant_answer(&body, query)
    }

    fn name(&self) -> &str {
        Provider::DuckDuckGo.name()
    }
}

/// Parse an instant-answer body into results.
///
/// Extracted as a separate function for testability with canned JSON.
fn parse_instant_answer(body: &str, query: &str) -> Result<Vec<SearchResult>, SearchError> {
    let answer: InstantAnswer = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("DuckDuckGo response: {e}")))?;

    let provider = Provider::DuckDuckGo;
    let search_page = results_page_url("https://duckduckgo.com/", "q", query)?;
    let mut results = Vec::new();

    // The API sometimes returns an object (e.g. calculators) instead of text.
    if let Some(text) = answer.answer.as_str().filter(|t| !t.is_empty()) {
        let url = if answer.answer_url.is_empty() {
            search_page.clone()
        } else {
            answer.answer_url.clone()
        };
        results.push(provider.result(
            format!("{query} - Direct Answer"),
            url,
            text,
            ANSWER_SCORE,
        ));
    }

    if !answer.abstract_text.is_empty() {
        let source = if answer.abstract_source.is_empty() {
            None
        } else {
            Some(answer.abstract_source.as_str())
        };
        let mut result = provider.result(
            format!("{query} - {}", source.unwrap_or("Encyclopedia")),
            answer.abstract_url,
            answer.abstract_text,
            ABSTRACT_SCORE,
        );
        if let Some(source) = source {
            result.source = source.to_string();
        }
        results.push(result);
    }

    results.push(provider.result(
        format!("{query} - DuckDuckGo Search Results"),
        search_page,
        format!("Complete search results for \"{query}\" on DuckDuckGo"),
        provider.base_score(),
    ));

    tracing::debug!(count = results.len(), "DuckDuckGo results parsed");
    Ok(results)
}
