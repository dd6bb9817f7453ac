//! Error types for the trawl pipeline.

use trawl_search::SearchError;

/// Top-level error type for search aggregation and image crawling.
#[derive(Debug, thiserror::Error)]
pub enum TrawlError {
    /// Search configuration or aggregation error.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// Image extraction error for a single crawl target.
    #[error("extraction error: {0}")]
    Extraction(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Illegal session transition or an operation invoked in the wrong state.
    #[error("session error: {0}")]
    Session(String),

    /// The session was replaced by a newer query before the work finished.
    #[error("session superseded by a newer query")]
    Superseded,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, TrawlError>;
