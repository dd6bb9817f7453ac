//! Shared helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use trawl::{
    Aggregator, CrawlProgress, CrawlSummary, CrawlTarget, HostEvent, ImageDescriptor,
    ImageExtractor, PlaceholderExtractor, ProgressReporter, TrawlConfig, TrawlError,
};
use trawl_search::{Provider, ProviderAdapter, SearchConfig, SearchError, SearchResult};

/// An adapter that always replies with the same results.
pub(crate) struct StaticProvider {
    pub(crate) name: &'static str,
    pub(crate) results: Vec<SearchResult>,
}

#[async_trait]
impl ProviderAdapter for StaticProvider {
    async fn search(
        &self,
        _query: &str,
        _config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        Ok(self.results.clone())
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// An adapter that always fails.
pub(crate) struct FailingProvider;

#[async_trait]
impl ProviderAdapter for FailingProvider {
    async fn search(
        &self,
        _query: &str,
        _config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        Err(SearchError::Http("connection reset".into()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Two placeholder images per target, except targets whose URL contains
/// `fail_on`, which error.
pub(crate) struct SelectiveExtractor {
    pub(crate) fail_on: &'static str,
}

#[async_trait]
impl ImageExtractor for SelectiveExtractor {
    async fn extract(&self, target: &CrawlTarget) -> trawl::Result<Vec<ImageDescriptor>> {
        if target.url.contains(self.fail_on) {
            return Err(TrawlError::Extraction(format!("{} unreachable", target.url)));
        }
        Ok(PlaceholderExtractor::with_image_count(2).placeholders(target))
    }
}

pub(crate) fn provider(
    name: &'static str,
    results: Vec<SearchResult>,
) -> Arc<dyn ProviderAdapter> {
    Arc::new(StaticProvider { name, results })
}

/// A result attributed to `provider` with a derived title.
pub(crate) fn result(provider: Provider, url: &str, score: u32) -> SearchResult {
    provider.result(format!("Page at {url}"), url, "", score)
}

/// `n` distinct Wikipedia results, all crawlable.
pub(crate) fn wiki_results(n: usize) -> Vec<SearchResult> {
    (0..n)
        .map(|i| result(Provider::Wikipedia, &format!("https://en.wikipedia.org/wiki/{i}"), 9))
        .collect()
}

/// Config with no step delay and no bundled providers.
pub(crate) fn fast_config() -> TrawlConfig {
    let mut config = TrawlConfig::default();
    config.search.providers = vec![];
    config.crawl.step_delay_ms = 0;
    config
}

pub(crate) fn aggregator(
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    extractor: Arc<dyn ImageExtractor>,
) -> Aggregator {
    Aggregator::new(fast_config(), adapters, extractor).expect("valid config")
}

/// Everything a reporter received, in order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Recorded {
    Progress(CrawlProgress),
    Finish(CrawlSummary),
}

/// A reporter that records every event.
pub(crate) fn recording_reporter() -> (ProgressReporter, Arc<Mutex<Vec<Recorded>>>) {
    let events: Arc<Mutex<Vec<Recorded>>> = Arc::new(Mutex::new(Vec::new()));
    let progress_events = Arc::clone(&events);
    let finish_events = Arc::clone(&events);
    let reporter = ProgressReporter::new(
        Box::new(move |p| {
            if let Ok(mut guard) = progress_events.lock() {
                guard.push(Recorded::Progress(p));
            }
        }),
        Box::new(move |s| {
            if let Ok(mut guard) = finish_events.lock() {
                guard.push(Recorded::Finish(s));
            }
        }),
    );
    (reporter, events)
}

/// Drain all pending host events into a Vec.
pub(crate) fn drain_events(rx: &mut mpsc::UnboundedReceiver<HostEvent>) -> Vec<HostEvent> {
    let mut events = Vec::new();
    while let Ok(evt) = rx.try_recv() {
        events.push(evt);
    }
    events
}
