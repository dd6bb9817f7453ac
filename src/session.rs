//! Per-query aggregation session.
//!
//! A session is created for every submitted query and owned by the caller
//! driving the pipeline. Its status only moves forward:
//!
//! ```text
//! Idle -> Searching -> Ranked -> Crawling -> Done
//!             |
//!             +-> Errored
//! ```
//!
//! Each session carries the generation number it was created under and a
//! [`CancellationToken`] that is cancelled when a newer query replaces it.

use std::fmt;

use tokio_util::sync::CancellationToken;
use trawl_search::SearchResult;

use crate::error::{Result, TrawlError};
use crate::image::ImageDescriptor;

/// Lifecycle status of an [`AggregationSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// Created, nothing dispatched yet.
    Idle,
    /// Providers are being queried.
    Searching,
    /// Results are merged and ranked; the crawl has not started.
    Ranked,
    /// The image crawl is in progress.
    Crawling,
    /// The crawl finished. Images (if any) are final.
    Done,
    /// The search stage failed as a whole.
    Errored,
}

impl SessionStatus {
    /// Whether `self -> next` is a legal transition.
    pub fn can_advance_to(self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, next),
            (Idle, Searching)
                | (Searching, Ranked)
                | (Searching, Errored)
                | (Ranked, Crawling)
                | (Crawling, Done)
        )
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Done | SessionStatus::Errored)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Searching => "searching",
            SessionStatus::Ranked => "ranked",
            SessionStatus::Crawling => "crawling",
            SessionStatus::Done => "done",
            SessionStatus::Errored => "errored",
        };
        f.write_str(label)
    }
}

/// State for one submitted query.
#[derive(Debug)]
pub struct AggregationSession {
    query: String,
    generation: u64,
    status: SessionStatus,
    ranked_results: Vec<SearchResult>,
    crawled_images: Vec<ImageDescriptor>,
    cancel: CancellationToken,
}

impl AggregationSession {
    /// Create an idle session for `query`.
    pub fn new(query: impl Into<String>, generation: u64, cancel: CancellationToken) -> Self {
        Self {
            query: query.into(),
            generation,
            status: SessionStatus::Idle,
            ranked_results: Vec::new(),
            crawled_images: Vec::new(),
            cancel,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Ranked results, best first.
    pub fn ranked_results(&self) -> &[SearchResult] {
        &self.ranked_results
    }

    /// Images in discovery order.
    pub fn crawled_images(&self) -> &[ImageDescriptor] {
        &self.crawled_images
    }

    /// Token cancelled when this session is superseded.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Whether a newer query has replaced this session.
    pub fn is_superseded(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Move to `next`, rejecting any backward or skipping transition.
    ///
    /// # Errors
    ///
    /// Returns [`TrawlError::Session`] for an illegal transition; the status
    /// is left unchanged.
    pub fn advance(&mut self, next: SessionStatus) -> Result<()> {
        if !self.status.can_advance_to(next) {
            return Err(TrawlError::Session(format!(
                "illegal transition {} -> {next}",
                self.status
            )));
        }
        tracing::debug!(
            generation = self.generation,
            from = %self.status,
            to = %next,
            "session transition"
        );
        self.status = next;
        Ok(())
    }

    /// URL to open when the ranked result at `index` is activated.
    pub fn result_url(&self, index: usize) -> Option<&str> {
        self.ranked_results.get(index).map(|r| r.url.as_str())
    }

    /// Page URL to open when the image at `index` is activated.
    pub fn image_source_url(&self, index: usize) -> Option<&str> {
        self.crawled_images.get(index).map(|i| i.source_url.as_str())
    }

    pub(crate) fn set_ranked(&mut self, results: Vec<SearchResult>) -> Result<()> {
        self.advance(SessionStatus::Ranked)?;
        self.ranked_results = results;
        Ok(())
    }

    pub(crate) fn append_images(&mut self, images: Vec<ImageDescriptor>) {
        self.crawled_images.extend(images);
    }
}
