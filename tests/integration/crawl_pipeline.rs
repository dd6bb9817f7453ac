//! End-to-end crawl stage over ranked sessions.

use std::sync::Arc;
use std::time::Duration;

use trawl::{
    Aggregator, CrawlSummary, HostEvent, PlaceholderExtractor, ProgressReporter, SessionStatus,
};
use trawl_search::Provider;

use crate::helpers::{
    Recorded, SelectiveExtractor, aggregator, drain_events, fast_config, provider,
    recording_reporter, result, wiki_results,
};

#[tokio::test]
async fn twelve_crawlable_results_crawl_first_ten() {
    let agg = aggregator(
        vec![provider("wiki", wiki_results(12))],
        Arc::new(PlaceholderExtractor::with_image_count(1)),
    );
    let mut session = agg.submit("cats").await.expect("ok").expect("non-blank");
    let (reporter, events) = recording_reporter();

    let images = agg
        .crawl_images(&mut session, &reporter)
        .await
        .expect("crawl succeeds");

    let sources: Vec<&str> = images.iter().map(|i| i.source_url.as_str()).collect();
    let expected: Vec<String> = (0..10)
        .map(|i| format!("https://en.wikipedia.org/wiki/{i}"))
        .collect();
    assert_eq!(sources, expected);

    let guard = events.lock().unwrap_or_else(|e| e.into_inner());
    let progress: Vec<(usize, usize)> = guard
        .iter()
        .filter_map(|e| match e {
            Recorded::Progress(p) => Some((p.done, p.total)),
            Recorded::Finish(_) => None,
        })
        .collect();
    assert_eq!(progress, (0..10).map(|i| (i, 10)).collect::<Vec<_>>());
    assert_eq!(
        guard.last(),
        Some(&Recorded::Finish(CrawlSummary::ImagesFound {
            images: 10,
            sites: 10
        }))
    );
}

#[tokio::test]
async fn no_crawlable_results_finish_immediately() {
    let agg = aggregator(
        vec![provider(
            "google",
            vec![result(Provider::Google, "https://www.google.com/search?q=cats", 10)],
        )],
        Arc::new(PlaceholderExtractor::new()),
    );
    let mut session = agg.submit("cats").await.expect("ok").expect("non-blank");
    let (reporter, events) = recording_reporter();

    let images = agg
        .crawl_images(&mut session, &reporter)
        .await
        .expect("crawl succeeds");

    assert!(images.is_empty());
    assert_eq!(session.status(), SessionStatus::Done);
    let guard = events.lock().unwrap_or_else(|e| e.into_inner());
    assert_eq!(*guard, vec![Recorded::Finish(CrawlSummary::NoImages)]);
}

#[tokio::test]
async fn failed_extraction_only_drops_that_target() {
    let agg = aggregator(
        vec![provider("wiki", wiki_results(3))],
        Arc::new(SelectiveExtractor {
            fail_on: "/wiki/1",
        }),
    );
    let mut session = agg.submit("cats").await.expect("ok").expect("non-blank");

    let images = agg
        .crawl_images(&mut session, &ProgressReporter::silent())
        .await
        .expect("crawl succeeds");

    let sources: Vec<&str> = images.iter().map(|i| i.source_url.as_str()).collect();
    assert_eq!(
        sources,
        vec![
            "https://en.wikipedia.org/wiki/0",
            "https://en.wikipedia.org/wiki/0",
            "https://en.wikipedia.org/wiki/2",
            "https://en.wikipedia.org/wiki/2",
        ]
    );
    assert_eq!(session.image_source_url(2), Some("https://en.wikipedia.org/wiki/2"));
}

#[tokio::test]
async fn reentering_image_view_does_not_recrawl() {
    let agg = aggregator(
        vec![provider("wiki", wiki_results(2))],
        Arc::new(PlaceholderExtractor::new()),
    );
    let mut session = agg.submit("cats").await.expect("ok").expect("non-blank");

    let first = agg
        .crawl_images(&mut session, &ProgressReporter::silent())
        .await
        .expect("first crawl")
        .to_vec();
    let (reporter, events) = recording_reporter();
    let second = agg
        .crawl_images(&mut session, &reporter)
        .await
        .expect("memoised crawl")
        .to_vec();

    assert_eq!(first, second);
    assert!(events.lock().unwrap_or_else(|e| e.into_inner()).is_empty());
}

#[tokio::test(start_paused = true)]
async fn crawl_waits_between_steps() {
    let mut config = fast_config();
    config.crawl.step_delay_ms = 500;
    let agg = Aggregator::new(
        config,
        vec![provider("wiki", wiki_results(4))],
        Arc::new(PlaceholderExtractor::with_image_count(1)),
    )
    .expect("valid config");
    let mut session = agg.submit("cats").await.expect("ok").expect("non-blank");
    let started = tokio::time::Instant::now();

    agg.crawl_images(&mut session, &ProgressReporter::silent())
        .await
        .expect("crawl succeeds");

    assert!(started.elapsed() >= Duration::from_millis(2000));
}

#[tokio::test]
async fn host_channel_receives_ranked_progress_and_finish() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let agg = aggregator(
        vec![provider("wiki", wiki_results(2))],
        Arc::new(PlaceholderExtractor::with_image_count(3)),
    )
    .with_events(tx);
    let mut session = agg.submit("cats").await.expect("ok").expect("non-blank");
    let reporter = agg.event_reporter(&session);

    agg.crawl_images(&mut session, &reporter)
        .await
        .expect("crawl succeeds");

    let events = drain_events(&mut rx);
    assert_eq!(events.len(), 4);
    assert!(matches!(&events[0], HostEvent::Ranked { results, .. } if results.len() == 2));
    assert!(matches!(
        &events[1],
        HostEvent::Progress { generation: 1, progress }
            if progress.done == 0 && progress.current_label == "Wikipedia"
    ));
    assert!(matches!(
        &events[2],
        HostEvent::Progress { generation: 1, progress } if progress.done == 1
    ));
    assert_eq!(
        events[3],
        HostEvent::Finished {
            generation: 1,
            summary: CrawlSummary::ImagesFound { images: 6, sites: 2 },
        }
    );
    assert_eq!(
        CrawlSummary::ImagesFound { images: 6, sites: 2 }.label(),
        "Found 6 images from 2 websites"
    );
}
