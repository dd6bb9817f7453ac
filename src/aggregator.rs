//! Pipeline driver: query submission, search, ranking and the image crawl.
//!
//! The [`Aggregator`] owns the provider adapters and the crawl scheduler and
//! hands out one [`AggregationSession`] per submitted query. Starting a new
//! session bumps the generation number and cancels the previous session's
//! token, so in-flight work for an old query stops at its next suspension
//! point with [`TrawlError::Superseded`] instead of landing in the new one.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use trawl_search::{ProviderAdapter, SearchResult};

use crate::config::TrawlConfig;
use crate::crawl::CrawlScheduler;
use crate::error::{Result, TrawlError};
use crate::extractor::{ImageExtractor, PlaceholderExtractor};
use crate::image::ImageDescriptor;
use crate::progress::{HostEvent, ProgressReporter};
use crate::session::{AggregationSession, SessionStatus};

/// Generation and token of the most recently started session.
#[derive(Debug)]
struct ActiveSession {
    generation: u64,
    cancel: CancellationToken,
}

/// Drives search aggregation and image crawling for submitted queries.
pub struct Aggregator {
    config: TrawlConfig,
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    scheduler: CrawlScheduler,
    active: Mutex<ActiveSession>,
    events: Option<mpsc::UnboundedSender<HostEvent>>,
}

impl Aggregator {
    /// Create an aggregator over `adapters` with a custom image extractor.
    ///
    /// The search section of `config` is validated per query, so a bad
    /// search config surfaces as an errored session rather than here.
    ///
    /// # Errors
    ///
    /// Returns [`TrawlError::Config`] if the crawl configuration is invalid.
    pub fn new(
        config: TrawlConfig,
        adapters: Vec<Arc<dyn ProviderAdapter>>,
        extractor: Arc<dyn ImageExtractor>,
    ) -> Result<Self> {
        let scheduler = CrawlScheduler::new(extractor, &config.crawl)?;
        Ok(Self {
            config,
            adapters,
            scheduler,
            active: Mutex::new(ActiveSession {
                generation: 0,
                cancel: CancellationToken::new(),
            }),
            events: None,
        })
    }

    /// Create an aggregator with the bundled adapters for
    /// `config.search.providers` and the placeholder extractor.
    ///
    /// # Errors
    ///
    /// Same as [`Aggregator::new`].
    pub fn from_config(config: TrawlConfig) -> Result<Self> {
        let adapters = trawl_search::adapters_for(&config.search.providers);
        Self::new(config, adapters, Arc::new(PlaceholderExtractor::new()))
    }

    /// Forward search outcomes to `tx` as [`HostEvent`]s.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<HostEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn config(&self) -> &TrawlConfig {
        &self.config
    }

    /// Names of the registered adapters, in registration order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    /// Generation number of the most recently started session.
    pub fn generation(&self) -> u64 {
        self.active().generation
    }

    /// Whether `session` is still the active one.
    pub fn is_current(&self, session: &AggregationSession) -> bool {
        !session.is_superseded() && session.generation() == self.generation()
    }

    /// A reporter forwarding crawl events for `session` to the host channel,
    /// stamped with its generation, or a silent one when no channel is
    /// attached.
    pub fn event_reporter(&self, session: &AggregationSession) -> ProgressReporter {
        match &self.events {
            Some(tx) => ProgressReporter::channel(tx.clone(), session.generation()),
            None => ProgressReporter::silent(),
        }
    }

    /// Start a new idle session for `query`, superseding the previous one.
    pub fn begin(&self, query: &str) -> AggregationSession {
        let mut active = self.active();
        active.cancel.cancel();
        active.generation += 1;
        active.cancel = CancellationToken::new();
        tracing::info!(generation = active.generation, "session started");
        AggregationSession::new(query.trim(), active.generation, active.cancel.clone())
    }

    /// Submit a query: start a session and run the search stage.
    ///
    /// Blank input is a no-op returning `Ok(None)`; the active session is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Same as [`Aggregator::run_search`].
    pub async fn submit(&self, query: &str) -> Result<Option<AggregationSession>> {
        if query.trim().is_empty() {
            tracing::debug!("blank query ignored");
            return Ok(None);
        }
        let mut session = self.begin(query);
        self.run_search(&mut session).await?;
        Ok(Some(session))
    }

    /// Query every provider for the session's query and store the ranked list.
    ///
    /// # Errors
    ///
    /// - [`TrawlError::Superseded`] if a newer session starts first; the
    ///   session keeps no results
    /// - [`TrawlError::Search`] if the search stage fails as a whole (for
    ///   example an invalid search config); the session becomes
    ///   [`SessionStatus::Errored`]
    /// - [`TrawlError::Session`] if the session is not idle
    pub async fn run_search<'s>(
        &self,
        session: &'s mut AggregationSession,
    ) -> Result<&'s [SearchResult]> {
        if session.is_superseded() {
            return Err(TrawlError::Superseded);
        }
        session.advance(SessionStatus::Searching)?;
        tracing::trace!(query = session.query(), "searching");

        let cancel = session.cancel_token().clone();
        let query = session.query().to_owned();
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(generation = session.generation(), "search superseded");
                return Err(TrawlError::Superseded);
            }
            outcome = trawl_search::search(&query, &self.adapters, &self.config.search) => outcome,
        };

        match outcome {
            Ok(results) => {
                tracing::info!(
                    generation = session.generation(),
                    results = results.len(),
                    "search ranked"
                );
                session.set_ranked(results)?;
                self.emit(HostEvent::Ranked {
                    generation: session.generation(),
                    results: session.ranked_results().to_vec(),
                });
                Ok(session.ranked_results())
            }
            Err(err) => {
                tracing::warn!(generation = session.generation(), error = %err, "search failed");
                session.advance(SessionStatus::Errored)?;
                self.emit(HostEvent::Failed {
                    generation: session.generation(),
                    message: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    /// Crawl the session's ranked results for images.
    ///
    /// Memoised per session; see [`CrawlScheduler::crawl`].
    ///
    /// # Errors
    ///
    /// Same as [`CrawlScheduler::crawl`].
    pub async fn crawl_images<'s>(
        &self,
        session: &'s mut AggregationSession,
        reporter: &ProgressReporter,
    ) -> Result<&'s [ImageDescriptor]> {
        self.scheduler.crawl(session, reporter).await
    }

    fn active(&self) -> std::sync::MutexGuard<'_, ActiveSession> {
        self.active.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn emit(&self, event: HostEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }
}
