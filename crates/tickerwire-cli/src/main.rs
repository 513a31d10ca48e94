mod analyze;
mod verify;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tickerwire_core::{AppConfig, FeedsFile};
use tickerwire_sentiment::{FeedSource, Pipeline, PipelineSettings};

#[derive(Debug, Parser)]
#[command(name = "tickerwire")]
#[command(about = "News sentiment for ticker symbols")]
struct Cli {
    /// Feed list file (overrides TICKERWIRE_FEEDS_PATH)
    #[arg(long, global = true)]
    feeds: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find and score recent news articles about a ticker symbol
    Analyze {
        /// Ticker symbol, e.g. AAPL
        symbol: String,

        /// Number of relevant articles to collect
        #[arg(
            long,
            short = 'n',
            default_value_t = 10,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        count: usize,

        /// Company name to match on, skipping the name lookup
        #[arg(long)]
        name: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Skip the startup feed verification
        #[arg(long)]
        skip_verify: bool,
    },
    /// Check that every configured feed is reachable and parses
    Verify,
    /// List the configured feeds
    Feeds,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = tickerwire_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let feeds_path = cli.feeds.unwrap_or_else(|| config.feeds_path.clone());
    let feeds = tickerwire_core::load_feeds(&feeds_path)
        .with_context(|| format!("loading feeds from {}", feeds_path.display()))?;
    tracing::debug!(env = %config.env, feeds = feeds.feeds.len(), "configuration loaded");

    match cli.command {
        Commands::Analyze {
            symbol,
            count,
            name,
            json,
            skip_verify,
        } => {
            let pipeline = build_pipeline(&config, &feeds)?;
            let verify_feeds = config.verify_feeds_on_startup && !skip_verify;
            if !verify_feeds {
                tracing::info!("feed verification is disabled");
            }

            let resolver = tickerwire_sentiment::YahooSearchResolver::new(
                &config.resolver_base_url,
                Duration::from_secs(config.fetch_timeout_secs),
                &config.user_agent,
            )?;
            let analyzer = tickerwire_sentiment::Analyzer::new(pipeline, Arc::new(resolver));
            let (verification, report) = analyze::run_analysis(
                &analyzer,
                &symbol,
                name.as_deref(),
                count,
                verify_feeds,
            )
            .await;

            if let Some(verification) = verification {
                if json {
                    for failure in verification.failures() {
                        tracing::warn!(
                            source = %failure.source,
                            status = %failure.status,
                            "feed failed verification"
                        );
                    }
                } else {
                    println!("{}", verify::render_verification(&verification));
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", analyze::render_report(&report));
            }
        }
        Commands::Verify => {
            let pipeline = build_pipeline(&config, &feeds)?;
            let report = pipeline.verify_sources().await;
            println!("{}", verify::render_verification(&report));
        }
        Commands::Feeds => {
            for feed in &feeds.feeds {
                println!("{:<40} {}", feed.name, feed.url);
            }
        }
    }

    Ok(())
}

fn build_pipeline(config: &AppConfig, feeds: &FeedsFile) -> anyhow::Result<Pipeline> {
    let sources: Vec<FeedSource> = feeds.urls().into_iter().map(FeedSource::from).collect();
    let pipeline = Pipeline::new(sources, &PipelineSettings::from(config))?;
    Ok(pipeline)
}

#[cfg(test)]
mod tests;
