//! TOML configuration persistence.

use trawl::{Aggregator, TrawlConfig, TrawlError};
use trawl_search::Provider;

#[test]
fn default_config_roundtrips_through_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("nested").join("config.toml");

    let config = TrawlConfig::default();
    config.save_to_file(&path).expect("save config");
    let loaded = TrawlConfig::from_file(&path).expect("load config");

    assert_eq!(loaded, config);
}

#[test]
fn customised_config_roundtrips() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");

    let mut config = TrawlConfig::default();
    config.search.providers = vec![Provider::Wikipedia, Provider::HackerNews];
    config.search.max_results = 5;
    config.search.user_agent = Some("trawl-test/1.0".into());
    config.crawl.max_targets = 3;
    config.crawl.step_delay_ms = 250;
    config.crawl.patterns = vec![r"example\.org".into()];
    config.save_to_file(&path).expect("save config");

    let loaded = TrawlConfig::from_file(&path).expect("load config");
    assert_eq!(loaded, config);
    assert!(loaded.validate().is_ok());
}

#[test]
fn hand_written_partial_config_loads() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[search]
providers = ["Google", "Wikipedia"]
timeout_seconds = 3

[crawl]
step_delay_ms = 0
"#,
    )
    .expect("write config");

    let config = TrawlConfig::load(Some(path.as_path())).expect("load config");

    assert_eq!(config.search.providers, vec![Provider::Google, Provider::Wikipedia]);
    assert_eq!(config.search.timeout_seconds, 3);
    assert_eq!(config.search.max_results, 20);
    assert_eq!(config.crawl.step_delay_ms, 0);
    assert_eq!(config.crawl.max_targets, 10);

    let agg = Aggregator::from_config(config).expect("valid config");
    assert_eq!(agg.provider_names(), vec!["Google", "Wikipedia"]);
}

#[test]
fn invalid_toml_is_config_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").expect("write config");

    let err = TrawlConfig::from_file(&path).expect_err("bad toml");
    assert!(matches!(err, TrawlError::Config(_)));
}

#[test]
fn bad_crawl_pattern_rejected_by_aggregator() {
    let mut config = TrawlConfig::default();
    config.crawl.patterns = vec!["[unterminated".into()];

    assert!(config.validate().is_err());
    assert!(matches!(
        Aggregator::from_config(config),
        Err(TrawlError::Config(_))
    ));
}
