//! Results-page link providers for engines without a free JSON API.
//!
//! Google, Bing, Brave and Yahoo do not expose a keyless API, so these
//! providers contribute a single result pointing at the engine's own
//! results page for the query. They never touch the network.

use async_trait::async_trait;
use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::provider::ProviderAdapter;
use crate::types::{Provider, SearchResult};

/// A provider that links to an engine's results page for the query.
#[derive(Debug, Clone, Copy)]
pub struct SearchPageProvider {
    pub(super) provider: Provider,
}

impl SearchPageProvider {
    /// Create a link provider for `provider`.
    ///
    /// Returns `None` for providers that have a real API adapter.
    pub fn new(provider: Provider) -> Option<Self> {
        match provider {
            Provider::Bing | Provider::Google | Provider::Brave | Provider::Yahoo => {
                Some(Self { provider })
            }
            _ => None,
        }
    }

    /// Base URL and query parameter name of the engine's results page.
    fn endpoint(&self) -> (&'static str, &'static str) {
        match self.provider {
            Provider::Bing => ("https://www.bing.com/search", "q"),
            Provider::Brave => ("https://search.brave.com/search", "q"),
            Provider::Yahoo => ("https://search.yahoo.com/search", "p"),
            _ => ("https://www.google.com/search", "q"),
        }
    }

    fn title(&self, query: &str) -> String {
        match self.provider {
            Provider::Bing => format!("{query} - Bing Search Results"),
            Provider::Brave => format!("{query} - Brave Search"),
            Provider::Yahoo => format!("{query} - Yahoo Search"),
            _ => format!("{query} - Google Search"),
        }
    }

    fn description(&self, query: &str) -> String {
        match self.provider {
            Provider::Bing => {
                format!("Comprehensive search results for \"{query}\" on Microsoft Bing")
            }
            Provider::Brave => format!("Private, independent search results for \"{query}\""),
            Provider::Yahoo => format!("Search results for \"{query}\" on Yahoo"),
            _ => format!("The world's most popular search results for \"{query}\""),
        }
    }
}

/// Build `base?param=query` with the query form-encoded.
pub(crate) fn results_page_url(
    base: &str,
    param: &str,
    query: &str,
) -> Result<String, SearchError> {
    Url::parse_with_params(base, &[(param, query)])
        .map(String::from)
        .map_err(|e| SearchError::Parse(format!("invalid results page URL {base}: {e}")))
}

#[async_trait]
impl ProviderAdapter for SearchPageProvider {
    async fn search(
        &self,
        query: &str,
        _config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let (base, param) = self.endpoint();
        let url = results_page_url(base, param, query)?;
        Ok(vec![self.provider.result(
            self.title(query),
            url,
            self.description(query),
            self.provider.base_score(),
        )])
    }

    fn name(&self) -> &str {
        self.provider.name()
    }
}
