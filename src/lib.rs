//! trawl: multi-provider search aggregation with a throttled image crawl.
//!
//! A submitted query is fanned out to every registered search provider at
//! once, merged, deduplicated and ranked by
//! [`trawl_search`]. The ranked list then feeds a sequential, rate-limited
//! crawl that extracts images from a bounded set of allow-listed result URLs
//! and reports progress after each step.
//!
//! # Architecture
//!
//! - **Aggregator**: owns providers and the crawl scheduler, hands out one
//!   session per query and supersedes the previous one
//! - **Session**: query, ranked results, crawled images and a forward-only
//!   status
//! - **Crawl scheduler**: allow-list filter, plan of at most 10 targets,
//!   one extraction in flight, fixed delay after every step
//! - **Image extractor**: pluggable per-target extraction
//! - **Progress reporter**: per-step progress and a terminal summary

pub mod aggregator;
pub mod config;
pub mod crawl;
pub mod error;
pub mod extractor;
pub mod image;
pub mod progress;
pub mod session;

pub use aggregator::Aggregator;
pub use config::{CrawlConfig, TrawlConfig};
pub use crawl::{CrawlFilter, CrawlPlan, CrawlScheduler, CrawlStepper};
pub use error::{Result, TrawlError};
pub use extractor::{ImageExtractor, PlaceholderExtractor};
pub use image::{CrawlTarget, ImageDescriptor};
pub use progress::{CrawlProgress, CrawlSummary, HostEvent, ProgressReporter};
pub use session::{AggregationSession, SessionStatus};
pub use trawl_search::{Provider, SearchConfig, SearchResult};
