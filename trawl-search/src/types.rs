//! Core types for aggregated search results and provider identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single candidate result returned by a search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result page.
    pub title: String,
    /// The URL of the result. Lowercased, this is the dedup key.
    pub url: String,
    /// A short text describing the page.
    pub description: String,
    /// Human-readable name of the site or service the result came from.
    pub source: String,
    /// Which provider produced this result.
    pub engine: String,
    /// Short display tag (an emoji in the default providers) for the host UI.
    pub icon_tag: String,
    /// Provider-asserted relevance. Each provider uses its own score band;
    /// no normalisation across providers is performed.
    pub score: u32,
}

impl SearchResult {
    /// The case-insensitive key used to collapse duplicates across providers.
    pub fn dedup_key(&self) -> String {
        self.url.to_lowercase()
    }

    /// Whether the result carries the fields required to be ranked.
    ///
    /// Only empty fields disqualify; whitespace is kept as-is.
    pub fn is_rankable(&self) -> bool {
        !self.url.is_empty() && !self.title.is_empty()
    }
}

/// Search providers bundled with trawl-search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    /// DuckDuckGo instant-answer API plus a results-page link.
    DuckDuckGo,
    /// Microsoft Bing results-page link.
    Bing,
    /// Google results-page link.
    Google,
    /// Brave Search results-page link.
    Brave,
    /// Yahoo results-page link.
    Yahoo,
    /// Wikipedia opensearch API.
    Wikipedia,
    /// GitHub repository search API.
    GitHub,
    /// Reddit search API.
    Reddit,
    /// Stack Exchange search API, scoped to Stack Overflow.
    StackOverflow,
    /// Hacker News search via Algolia.
    HackerNews,
}

impl Provider {
    /// Returns the short name of this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Bing => "Bing",
            Self::Google => "Google",
            Self::Brave => "Brave",
            Self::Yahoo => "Yahoo",
            Self::Wikipedia => "Wikipedia",
            Self::GitHub => "GitHub",
            Self::Reddit => "Reddit",
            Self::StackOverflow => "StackOverflow",
            Self::HackerNews => "HackerNews",
        }
    }

    /// The `source` label stamped on results from this provider.
    pub fn source_label(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Bing => "Microsoft Bing",
            Self::Google => "Google",
            Self::Brave => "Brave Search",
            Self::Yahoo => "Yahoo",
            Self::Wikipedia => "Wikipedia",
            Self::GitHub => "GitHub",
            Self::Reddit => "Reddit",
            Self::StackOverflow => "Stack Overflow",
            Self::HackerNews => "Hacker News",
        }
    }

    /// The `engine` label stamped on results from this provider.
    pub fn engine_label(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Bing => "Bing",
            Self::Google => "Google",
            Self::Brave => "Brave",
            Self::Yahoo => "Yahoo",
            Self::Wikipedia => "Wikipedia API",
            Self::GitHub => "GitHub API",
            Self::Reddit => "Reddit API",
            Self::StackOverflow => "Stack Overflow API",
            Self::HackerNews => "HackerNews API",
        }
    }

    /// Display tag for results from this provider.
    pub fn icon_tag(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "🦆",
            Self::Bing => "🔎",
            Self::Google => "🔍",
            Self::Brave => "🦁",
            Self::Yahoo => "💜",
            Self::Wikipedia => "📚",
            Self::GitHub => "💻",
            Self::Reddit => "💬",
            Self::StackOverflow => "❓",
            Self::HackerNews => "📰",
        }
    }

    /// The score this provider assigns to its regular results.
    ///
    /// DuckDuckGo additionally scores direct answers at 10 and abstracts at 9.
    pub fn base_score(&self) -> u32 {
        match self {
            Self::Google => 10,
            Self::Brave | Self::Wikipedia => 9,
            Self::DuckDuckGo | Self::Bing | Self::GitHub | Self::StackOverflow => 8,
            Self::Yahoo | Self::Reddit | Self::HackerNews => 7,
        }
    }

    /// Returns all providers in default registration order.
    pub fn all() -> &'static [Provider] {
        &[
            Self::DuckDuckGo,
            Self::Bing,
            Self::Google,
            Self::Brave,
            Self::Yahoo,
            Self::Wikipedia,
            Self::GitHub,
            Self::Reddit,
            Self::StackOverflow,
            Self::HackerNews,
        ]
    }

    /// Build a result attributed to this provider.
    pub fn result(
        &self,
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
        score: u32,
    ) -> SearchResult {
        SearchResult {
            title: title.into(),
            url: url.into(),
            description: description.into(),
            source: self.source_label().to_string(),
            engine: self.engine_label().to_string(),
            icon_tag: self.icon_tag().to_string(),
            score,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
