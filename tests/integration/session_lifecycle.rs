//! Session status transitions and supersession across the full pipeline.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use trawl::{
    Aggregator, CrawlTarget, ImageDescriptor, ImageExtractor, PlaceholderExtractor,
    ProgressReporter, SessionStatus, TrawlError,
};

use crate::helpers::{aggregator, fast_config, provider, wiki_results};

/// Sleeps before producing one placeholder image.
struct SlowExtractor {
    delay: Duration,
}

#[async_trait]
impl ImageExtractor for SlowExtractor {
    async fn extract(&self, target: &CrawlTarget) -> trawl::Result<Vec<ImageDescriptor>> {
        tokio::time::sleep(self.delay).await;
        Ok(PlaceholderExtractor::with_image_count(1).placeholders(target))
    }
}

#[tokio::test]
async fn full_lifecycle_moves_forward_only() {
    let agg = aggregator(
        vec![provider("wiki", wiki_results(1))],
        Arc::new(PlaceholderExtractor::new()),
    );
    let mut session = agg.begin("cats");
    assert_eq!(session.status(), SessionStatus::Idle);

    agg.run_search(&mut session).await.expect("search succeeds");
    assert_eq!(session.status(), SessionStatus::Ranked);

    agg.crawl_images(&mut session, &ProgressReporter::silent())
        .await
        .expect("crawl succeeds");
    assert_eq!(session.status(), SessionStatus::Done);

    let err = agg
        .run_search(&mut session)
        .await
        .expect_err("a finished session cannot search again");
    assert!(matches!(err, TrawlError::Session(_)));
    assert_eq!(session.status(), SessionStatus::Done);
}

#[tokio::test]
async fn crawl_before_search_is_rejected() {
    let agg = aggregator(vec![], Arc::new(PlaceholderExtractor::new()));
    let mut session = agg.begin("cats");

    let err = agg
        .crawl_images(&mut session, &ProgressReporter::silent())
        .await
        .expect_err("idle session cannot crawl");

    assert!(matches!(err, TrawlError::Session(_)));
    assert_eq!(session.status(), SessionStatus::Idle);
}

#[tokio::test]
async fn errored_session_cannot_crawl() {
    let mut config = fast_config();
    config.search.timeout_seconds = 0;
    let agg = Aggregator::new(config, vec![], Arc::new(PlaceholderExtractor::new()))
        .expect("crawl config valid");

    let err = agg.submit("cats").await.expect_err("invalid search config");
    assert!(matches!(err, TrawlError::Search(_)));

    let mut session = agg.begin("cats");
    let _ = agg.run_search(&mut session).await;
    assert_eq!(session.status(), SessionStatus::Errored);
    assert!(matches!(
        agg.crawl_images(&mut session, &ProgressReporter::silent()).await,
        Err(TrawlError::Session(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn new_query_stops_old_crawl() {
    let agg = Arc::new(
        Aggregator::new(
            fast_config(),
            vec![provider("wiki", wiki_results(5))],
            Arc::new(SlowExtractor {
                delay: Duration::from_secs(1),
            }),
        )
        .expect("valid config"),
    );
    let mut old = agg.submit("cats").await.expect("ok").expect("non-blank");

    let worker = Arc::clone(&agg);
    let handle = tokio::spawn(async move {
        let outcome = worker
            .crawl_images(&mut old, &ProgressReporter::silent())
            .await
            .map(|images| images.len());
        (outcome, old)
    });

    // Let two extractions finish, then supersede mid-way through the third.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    let new = agg.submit("dogs").await.expect("ok").expect("non-blank");

    let (outcome, old) = handle.await.expect("task completes");
    assert!(matches!(outcome, Err(TrawlError::Superseded)));
    assert_eq!(old.crawled_images().len(), 2);
    assert_eq!(old.status(), SessionStatus::Crawling);
    assert!(new.crawled_images().is_empty());
    assert!(agg.is_current(&new));
    assert!(!agg.is_current(&old));
}

#[tokio::test]
async fn blank_submit_keeps_active_session() {
    let agg = aggregator(
        vec![provider("wiki", wiki_results(1))],
        Arc::new(PlaceholderExtractor::new()),
    );
    let active = agg.submit("cats").await.expect("ok").expect("non-blank");

    assert!(agg.submit("").await.expect("no error").is_none());
    assert!(agg.submit(" \n\t").await.expect("no error").is_none());

    assert!(agg.is_current(&active));
    assert_eq!(agg.generation(), active.generation());
}
