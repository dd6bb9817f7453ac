//! End-to-end search stage: submit → dispatch → rank → session.

use std::sync::Arc;

use trawl::{PlaceholderExtractor, SessionStatus};
use trawl_search::Provider;

use crate::helpers::{FailingProvider, aggregator, provider, result};

#[tokio::test]
async fn cats_scenario_ranks_across_providers() {
    let agg = aggregator(
        vec![
            provider("p1", vec![result(Provider::Google, "a.com", 9)]),
            provider("p2", vec![result(Provider::Bing, "b.com", 7)]),
            provider("p3", vec![result(Provider::Reddit, "a.com", 5)]),
        ],
        Arc::new(PlaceholderExtractor::new()),
    );

    let session = agg
        .submit("cats")
        .await
        .expect("search succeeds")
        .expect("non-blank query");

    let ranked: Vec<(&str, u32)> = session
        .ranked_results()
        .iter()
        .map(|r| (r.url.as_str(), r.score))
        .collect();
    assert_eq!(ranked, vec![("a.com", 9), ("b.com", 7)]);
    assert_eq!(session.status(), SessionStatus::Ranked);
}

#[tokio::test]
async fn one_failing_provider_does_not_fail_search() {
    let agg = aggregator(
        vec![
            provider("ok-1", vec![result(Provider::GitHub, "https://github.com/a", 8)]),
            Arc::new(FailingProvider),
            provider("ok-2", vec![result(Provider::HackerNews, "https://hn.example/b", 7)]),
        ],
        Arc::new(PlaceholderExtractor::new()),
    );

    let session = agg
        .submit("cats")
        .await
        .expect("isolated failure")
        .expect("non-blank query");

    let urls: Vec<&str> = session.ranked_results().iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec!["https://github.com/a", "https://hn.example/b"]);
}

#[tokio::test]
async fn every_provider_failing_ranks_to_nothing() {
    let agg = aggregator(
        vec![Arc::new(FailingProvider), Arc::new(FailingProvider)],
        Arc::new(PlaceholderExtractor::new()),
    );

    let session = agg
        .submit("cats")
        .await
        .expect("no results is not an error")
        .expect("non-blank query");

    assert!(session.ranked_results().is_empty());
    assert_eq!(session.status(), SessionStatus::Ranked);
}

#[tokio::test]
async fn ranked_list_capped_and_distinct() {
    let many: Vec<_> = (0..30)
        .map(|i| result(Provider::Google, &format!("https://Site{i}.example"), (i % 7) as u32))
        .collect();
    let lowercase_dupes: Vec<_> = (0..30)
        .map(|i| result(Provider::Bing, &format!("https://site{i}.example"), 3))
        .collect();
    let agg = aggregator(
        vec![provider("upper", many), provider("lower", lowercase_dupes)],
        Arc::new(PlaceholderExtractor::new()),
    );

    let session = agg
        .submit("cats")
        .await
        .expect("search succeeds")
        .expect("non-blank query");
    let ranked = session.ranked_results();

    assert_eq!(ranked.len(), 20);
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    let keys: std::collections::HashSet<String> = ranked.iter().map(|r| r.dedup_key()).collect();
    assert_eq!(keys.len(), ranked.len());
}

#[tokio::test]
async fn result_url_navigates_to_ranked_entry() {
    let agg = aggregator(
        vec![provider(
            "p",
            vec![
                result(Provider::Google, "https://low.example", 2),
                result(Provider::Google, "https://high.example", 10),
            ],
        )],
        Arc::new(PlaceholderExtractor::new()),
    );

    let session = agg.submit("cats").await.expect("ok").expect("non-blank");

    assert_eq!(session.result_url(0), Some("https://high.example"));
    assert_eq!(session.result_url(1), Some("https://low.example"));
    assert_eq!(session.result_url(2), None);
}
