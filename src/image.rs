//! Crawl targets and the image records extracted from them.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

use trawl_search::SearchResult;

/// A ranked result selected for image extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget(SearchResult);

impl CrawlTarget {
    /// Wrap a ranked result as a crawl target.
    pub fn new(result: SearchResult) -> Self {
        Self(result)
    }

    /// The underlying search result.
    pub fn result(&self) -> &SearchResult {
        &self.0
    }
}

impl Deref for CrawlTarget {
    type Target = SearchResult;

    fn deref(&self) -> &SearchResult {
        &self.0
    }
}

impl From<SearchResult> for CrawlTarget {
    fn from(result: SearchResult) -> Self {
        Self(result)
    }
}

/// An image discovered while crawling a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Direct URL of the image.
    pub url: String,
    /// Display title.
    pub title: String,
    /// Source label of the page the image came from.
    pub source: String,
    /// URL of the search result the image was extracted from. Used for
    /// click-through navigation back to the page.
    pub source_url: String,
    /// Short display tag for the host UI.
    pub icon_tag: String,
}
