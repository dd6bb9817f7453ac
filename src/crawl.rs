//! Throttled sequential image crawl over ranked results.
//!
//! # Pipeline
//!
//! 1. Filter ranked results through the URL allow-list, keep the first
//!    `max_targets` in ranked order ([`CrawlPlan`])
//! 2. Walk the plan with a [`CrawlStepper`]; for each target:
//!    report progress, extract (bounded and panic-isolated), append the
//!    images to the session, then pause for the step delay
//! 3. Mark the session done and report the [`CrawlSummary`]
//!
//! Exactly one extraction is in flight at a time. A failed extraction
//! contributes no images and the loop moves on.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use regex::RegexSet;
use trawl_search::SearchResult;

use crate::config::{CrawlConfig, MAX_CRAWL_TARGETS};
use crate::error::{Result, TrawlError};
use crate::extractor::ImageExtractor;
use crate::image::{CrawlTarget, ImageDescriptor};
use crate::progress::{CrawlProgress, CrawlSummary, ProgressReporter};
use crate::session::{AggregationSession, SessionStatus};

/// URL allow-list deciding which results are worth crawling.
#[derive(Debug, Clone)]
pub struct CrawlFilter {
    patterns: RegexSet,
}

impl CrawlFilter {
    /// Compile `patterns`. An empty list matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TrawlError::Config`] if a pattern is not a valid regex.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = RegexSet::new(patterns)
            .map_err(|e| TrawlError::Config(format!("invalid crawl pattern: {e}")))?;
        Ok(Self { patterns })
    }

    pub fn is_crawlable(&self, url: &str) -> bool {
        self.patterns.is_match(url)
    }
}

/// The ordered targets selected for one crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlPlan {
    targets: Vec<CrawlTarget>,
}

impl CrawlPlan {
    /// Select crawlable results in ranked order, at most `max_targets`
    /// (never more than 10).
    pub fn build(ranked: &[SearchResult], filter: &CrawlFilter, max_targets: usize) -> Self {
        let targets = ranked
            .iter()
            .filter(|r| filter.is_crawlable(&r.url))
            .take(max_targets.min(MAX_CRAWL_TARGETS))
            .cloned()
            .map(CrawlTarget::new)
            .collect();
        Self { targets }
    }

    pub fn targets(&self) -> &[CrawlTarget] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Walks a [`CrawlPlan`] one target at a time.
#[derive(Debug)]
pub struct CrawlStepper {
    plan: CrawlPlan,
    done: usize,
}

impl CrawlStepper {
    pub fn new(plan: CrawlPlan) -> Self {
        Self { plan, done: 0 }
    }

    pub fn total(&self) -> usize {
        self.plan.len()
    }

    pub fn done(&self) -> usize {
        self.done
    }

    pub fn is_finished(&self) -> bool {
        self.done >= self.plan.len()
    }

    /// Progress for the next target plus the target itself, or `None` once
    /// the plan is exhausted. `done` in the progress counts targets processed
    /// before this one.
    pub fn next_step(&mut self) -> Option<(CrawlProgress, CrawlTarget)> {
        let target = self.plan.targets.get(self.done)?.clone();
        let progress = CrawlProgress {
            done: self.done,
            total: self.plan.len(),
            current_label: target.source.clone(),
        };
        self.done += 1;
        Some((progress, target))
    }
}

/// Runs the image crawl for ranked sessions.
pub struct CrawlScheduler {
    extractor: Arc<dyn ImageExtractor>,
    filter: CrawlFilter,
    max_targets: usize,
    step_delay: Duration,
    extract_timeout: Duration,
}

impl CrawlScheduler {
    /// Create a scheduler from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TrawlError::Config`] if `config` is invalid.
    pub fn new(extractor: Arc<dyn ImageExtractor>, config: &CrawlConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            extractor,
            filter: CrawlFilter::new(&config.patterns)?,
            max_targets: config.max_targets,
            step_delay: Duration::from_millis(config.step_delay_ms),
            extract_timeout: Duration::from_secs(config.extract_timeout_seconds),
        })
    }

    /// The plan this scheduler would crawl for `ranked`.
    pub fn plan(&self, ranked: &[SearchResult]) -> CrawlPlan {
        CrawlPlan::build(ranked, &self.filter, self.max_targets)
    }

    /// Crawl `session` and return its images.
    ///
    /// Memoised: a session that already has images, or is already done,
    /// returns what it has without extracting again. Otherwise the session
    /// must be [`SessionStatus::Ranked`].
    ///
    /// # Errors
    ///
    /// - [`TrawlError::Superseded`] if the session is replaced before or
    ///   during the crawl; images appended so far stay on the session
    /// - [`TrawlError::Session`] if the session is not ranked
    pub async fn crawl<'s>(
        &self,
        session: &'s mut AggregationSession,
        reporter: &ProgressReporter,
    ) -> Result<&'s [ImageDescriptor]> {
        if !session.crawled_images().is_empty() || session.status() == SessionStatus::Done {
            tracing::debug!(
                generation = session.generation(),
                "crawl memoised, returning stored images"
            );
            return Ok(session.crawled_images());
        }
        if session.is_superseded() {
            return Err(TrawlError::Superseded);
        }
        if session.status() != SessionStatus::Ranked {
            return Err(TrawlError::Session(format!(
                "cannot crawl a session that is {}",
                session.status()
            )));
        }

        let cancel = session.cancel_token().clone();
        let plan = self.plan(session.ranked_results());
        session.advance(SessionStatus::Crawling)?;
        tracing::info!(
            generation = session.generation(),
            targets = plan.len(),
            "image crawl started"
        );

        let mut stepper = CrawlStepper::new(plan);
        while let Some((progress, target)) = stepper.next_step() {
            reporter.progress(progress);

            let images = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(TrawlError::Superseded),
                images = self.extract_isolated(&target) => images,
            };
            session.append_images(images);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(TrawlError::Superseded),
                _ = tokio::time::sleep(self.step_delay) => {}
            }
        }

        session.advance(SessionStatus::Done)?;
        let summary = CrawlSummary::from_images(session.crawled_images());
        tracing::info!(
            generation = session.generation(),
            status = %summary.label(),
            "image crawl finished"
        );
        reporter.finish(summary);
        Ok(session.crawled_images())
    }

    /// Extract one target; every failure mode yields no images.
    async fn extract_isolated(&self, target: &CrawlTarget) -> Vec<ImageDescriptor> {
        let call = AssertUnwindSafe(self.extractor.extract(target)).catch_unwind();
        match tokio::time::timeout(self.extract_timeout, call).await {
            Ok(Ok(Ok(images))) => {
                tracing::debug!(
                    source = %target.source,
                    count = images.len(),
                    "target extracted"
                );
                images
            }
            Ok(Ok(Err(err))) => {
                tracing::warn!(url = %target.url, error = %err, "image extraction failed");
                Vec::new()
            }
            Ok(Err(_panic)) => {
                tracing::warn!(url = %target.url, "image extractor panicked");
                Vec::new()
            }
            Err(_elapsed) => {
                tracing::warn!(
                    url = %target.url,
                    timeout_secs = self.extract_timeout.as_secs(),
                    "image extraction timed out"
                );
                Vec::new()
            }
        }
    }
}
