//! Error types for the trawl-search crate.
//!
//! Provider errors are isolated by the dispatcher and never reach callers of
//! [`crate::search`]; only configuration errors do.

/// Errors that can occur during search aggregation.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A provider did not answer within the configured timeout.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// An HTTP request to a provider failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a provider response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A provider failed in a way not covered above (including panics).
    #[error("provider error: {0}")]
    Provider(String),
}

/// Convenience type alias for trawl-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
