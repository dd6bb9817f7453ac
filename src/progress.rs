//! Progress event types for the image crawl.
//!
//! Provides callback-based progress reporting that decouples the crawl loop
//! from presentation (CLI indicatif bar vs a host UI fed through a channel).

use std::collections::HashSet;
use std::fmt;

use tokio::sync::mpsc;
use trawl_search::SearchResult;

use crate::image::ImageDescriptor;

/// Emitted before each crawl step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlProgress {
    /// Targets fully processed so far.
    pub done: usize,
    /// Targets in the crawl plan.
    pub total: usize,
    /// Source label of the target about to be processed.
    pub current_label: String,
}

impl CrawlProgress {
    /// Completed fraction in `0.0..=1.0`. An empty plan counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

impl fmt::Display for CrawlProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Crawling: {}/{} sites • Current: {}",
            self.done, self.total, self.current_label
        )
    }
}

/// Terminal outcome of a crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlSummary {
    /// At least one image was found.
    ImagesFound {
        /// Number of images.
        images: usize,
        /// Number of distinct pages the images came from.
        sites: usize,
    },
    /// The crawl produced no images.
    NoImages,
}

impl CrawlSummary {
    /// Summarise a finished crawl.
    pub fn from_images(images: &[ImageDescriptor]) -> Self {
        if images.is_empty() {
            return CrawlSummary::NoImages;
        }
        let sites: HashSet<&str> = images.iter().map(|i| i.source_url.as_str()).collect();
        CrawlSummary::ImagesFound {
            images: images.len(),
            sites: sites.len(),
        }
    }

    /// User-visible status line.
    pub fn label(&self) -> String {
        match self {
            CrawlSummary::ImagesFound { images, sites } => {
                format!("Found {images} images from {sites} websites")
            }
            CrawlSummary::NoImages => "No images found in the search results".to_owned(),
        }
    }
}

/// Events a host UI renders incrementally.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// The search stage finished for the session with `generation`.
    Ranked {
        generation: u64,
        results: Vec<SearchResult>,
    },
    /// A crawl step is about to run for the session with `generation`.
    Progress {
        generation: u64,
        progress: CrawlProgress,
    },
    /// The crawl finished for the session with `generation`.
    Finished {
        generation: u64,
        summary: CrawlSummary,
    },
    /// The search stage failed for the session with `generation`.
    Failed { generation: u64, message: String },
}

/// Callback type for receiving crawl progress.
pub type ProgressCallback = Box<dyn Fn(CrawlProgress) + Send + Sync>;

/// Callback type for receiving the terminal crawl summary.
pub type FinishCallback = Box<dyn Fn(CrawlSummary) + Send + Sync>;

/// Delivers crawl progress and the terminal summary to the caller.
///
/// Events are forwarded immediately; nothing is buffered.
#[derive(Default)]
pub struct ProgressReporter {
    on_progress: Option<ProgressCallback>,
    on_finish: Option<FinishCallback>,
}

impl ProgressReporter {
    pub fn new(on_progress: ProgressCallback, on_finish: FinishCallback) -> Self {
        Self {
            on_progress: Some(on_progress),
            on_finish: Some(on_finish),
        }
    }

    /// A reporter that drops every event.
    pub fn silent() -> Self {
        Self::default()
    }

    /// A reporter forwarding events into `tx` as [`HostEvent`]s stamped
    /// with `generation`.
    ///
    /// Send failures (receiver dropped) are ignored.
    pub fn channel(tx: mpsc::UnboundedSender<HostEvent>, generation: u64) -> Self {
        let finish_tx = tx.clone();
        Self::new(
            Box::new(move |progress| {
                let _ = tx.send(HostEvent::Progress {
                    generation,
                    progress,
                });
            }),
            Box::new(move |summary| {
                let _ = finish_tx.send(HostEvent::Finished {
                    generation,
                    summary,
                });
            }),
        )
    }

    pub fn progress(&self, progress: CrawlProgress) {
        if let Some(cb) = &self.on_progress {
            cb(progress);
        }
    }

    pub fn finish(&self, summary: CrawlSummary) {
        if let Some(cb) = &self.on_finish {
            cb(summary);
        }
    }
}

impl fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("on_progress", &self.on_progress.is_some())
            .field("on_finish", &self.on_finish.is_some())
            .finish()
    }
}
