use super::*;

#[test]
fn parses_analyze_with_defaults() {
    let cli =
        Cli::try_parse_from(["tickerwire", "analyze", "AAPL"]).expect("expected valid cli args");

    assert!(cli.feeds.is_none());
    assert!(matches!(
        cli.command,
        Commands::Analyze {
            ref symbol,
            count: 10,
            name: None,
            json: false,
            skip_verify: false,
        } if symbol == "AAPL"
    ));
}

#[test]
fn parses_analyze_with_all_options() {
    let cli = Cli::try_parse_from([
        "tickerwire",
        "analyze",
        "acme",
        "--count",
        "3",
        "--name",
        "Acme Corp",
        "--json",
        "--skip-verify",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Analyze {
            count: 3,
            name: Some(ref n),
            json: true,
            skip_verify: true,
            ..
        } if n == "Acme Corp"
    ));
}

#[test]
fn short_count_flag() {
    let cli = Cli::try_parse_from(["tickerwire", "analyze", "AAPL", "-n", "25"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Analyze { count: 25, .. }));
}

#[test]
fn zero_count_is_rejected() {
    let result = Cli::try_parse_from(["tickerwire", "analyze", "AAPL", "--count", "0"]);
    assert!(result.is_err(), "count of zero must be rejected");
}

#[test]
fn non_numeric_count_is_rejected() {
    let result = Cli::try_parse_from(["tickerwire", "analyze", "AAPL", "--count", "ten"]);
    assert!(result.is_err());
}

#[test]
fn analyze_requires_a_symbol() {
    assert!(Cli::try_parse_from(["tickerwire", "analyze"]).is_err());
}

#[test]
fn parses_verify_with_global_feeds_path() {
    let cli = Cli::try_parse_from(["tickerwire", "verify", "--feeds", "/tmp/feeds.yaml"])
        .expect("expected valid cli args");

    assert!(matches!(cli.command, Commands::Verify));
    assert_eq!(cli.feeds, Some(PathBuf::from("/tmp/feeds.yaml")));
}

#[test]
fn parses_feeds_command() {
    let cli = Cli::try_parse_from(["tickerwire", "feeds"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Feeds));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["tickerwire"]).is_err());
}

#[test]
fn build_pipeline_uses_every_configured_feed() {
    let feeds = tickerwire_core::parse_feeds(
        "feeds:\n  - name: A\n    url: https://a.example/rss\n  - name: B\n    url: https://b.example/rss\n",
    )
    .expect("valid feeds");
    let config = AppConfig {
        env: tickerwire_core::Environment::Test,
        log_level: "info".to_string(),
        feeds_path: PathBuf::from("feeds.yaml"),
        fetch_timeout_secs: 5,
        user_agent: "tickerwire-test/0.1".to_string(),
        max_concurrent_fetches: 4,
        max_concurrent_scores: 4,
        sentiment_cache_ttl_secs: 3600,
        result_cache_ttl_secs: None,
        verify_feeds_on_startup: false,
        resolver_base_url: "http://localhost".to_string(),
    };

    let pipeline = build_pipeline(&config, &feeds).expect("pipeline");

    let urls: Vec<&str> = pipeline.sources().iter().map(FeedSource::as_str).collect();
    assert_eq!(urls, vec!["https://a.example/rss", "https://b.example/rss"]);
}
