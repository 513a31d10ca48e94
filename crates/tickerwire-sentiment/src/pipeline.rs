//! Fetch, filter, and memoize: one request/response cycle per subject.

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;
use uuid::Uuid;

use tickerwire_core::AppConfig;

use crate::cache::ResultCache;
use crate::error::SentimentError;
use crate::relevance::filter_relevant;
use crate::sentiment::{SentimentScorer, DEFAULT_SENTIMENT_TTL};
use crate::sources::{FeedFetcher, VerificationReport};
use crate::types::{FeedSource, ResultKey, ResultSetRecord, RunSummary};

/// Tunables for one [`Pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub fetch_timeout: Duration,
    pub user_agent: String,
    pub max_concurrent_fetches: usize,
    pub max_concurrent_scores: usize,
    pub sentiment_cache_ttl: Duration,
    /// `None` keeps result sets for the life of the process.
    pub result_cache_ttl: Option<Duration>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            user_agent: "tickerwire/0.1 (news-sentiment)".to_string(),
            max_concurrent_fetches: 32,
            max_concurrent_scores: 16,
            sentiment_cache_ttl: DEFAULT_SENTIMENT_TTL,
            result_cache_ttl: None,
        }
    }
}

impl From<&AppConfig> for PipelineSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
            user_agent: config.user_agent.clone(),
            max_concurrent_fetches: config.max_concurrent_fetches,
            max_concurrent_scores: config.max_concurrent_scores,
            sentiment_cache_ttl: Duration::from_secs(config.sentiment_cache_ttl_secs),
            result_cache_ttl: config.result_cache_ttl_secs.map(Duration::from_secs),
        }
    }
}

/// The relevant articles of one run plus its accounting.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Shared with the result cache; identical requests get the same record.
    pub record: Arc<ResultSetRecord>,
    pub summary: RunSummary,
}

/// Expired entries removed by [`Pipeline::sweep_caches`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub sentiment: usize,
    pub results: usize,
}

/// Owns the source list, the fetcher, and both caches.
#[derive(Debug)]
pub struct Pipeline {
    sources: Vec<FeedSource>,
    fetcher: FeedFetcher,
    scorer: SentimentScorer,
    results: ResultCache,
}

impl Pipeline {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(
        sources: Vec<FeedSource>,
        settings: &PipelineSettings,
    ) -> Result<Self, SentimentError> {
        let fetcher = FeedFetcher::new(
            settings.fetch_timeout,
            &settings.user_agent,
            settings.max_concurrent_fetches,
        )?;
        Ok(Self {
            sources,
            fetcher,
            scorer: SentimentScorer::new(
                settings.sentiment_cache_ttl,
                settings.max_concurrent_scores,
            ),
            results: ResultCache::new(settings.result_cache_ttl),
        })
    }

    /// Replace the sentiment scorer, e.g. to share one cache between pipelines.
    #[must_use]
    pub fn with_sentiment_scorer(mut self, scorer: SentimentScorer) -> Self {
        self.scorer = scorer;
        self
    }

    #[must_use]
    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    #[must_use]
    pub fn fetcher(&self) -> &FeedFetcher {
        &self.fetcher
    }

    #[must_use]
    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }

    #[must_use]
    pub fn result_cache(&self) -> &ResultCache {
        &self.results
    }

    /// Probe the configured sources. Does not affect later runs.
    pub async fn verify_sources(&self) -> VerificationReport {
        self.fetcher.verify_sources(&self.sources).await
    }

    /// Find up to `target_count` articles relevant to `subject` / `company_name`.
    ///
    /// A repeated request is answered from the result cache without any
    /// network traffic. Dropping the future before it completes leaves the
    /// cache untouched.
    pub async fn run(
        &self,
        subject: &str,
        company_name: &str,
        target_count: usize,
    ) -> PipelineOutput {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "pipeline_run",
            %run_id,
            subject,
            target = target_count
        );
        self.run_inner(subject, company_name, target_count)
            .instrument(span)
            .await
    }

    async fn run_inner(
        &self,
        subject: &str,
        company_name: &str,
        target_count: usize,
    ) -> PipelineOutput {
        let mut summary = RunSummary {
            target: target_count,
            sources: self.sources.len(),
            ..RunSummary::default()
        };

        if target_count == 0 {
            tracing::info!("target count is zero; nothing to fetch");
            return PipelineOutput {
                record: Arc::new(ResultSetRecord::default()),
                summary,
            };
        }

        let key = ResultKey::new(subject, company_name, target_count);
        if let Some(record) = self.results.get(&key) {
            tracing::debug!("returning cached result set");
            summary.relevant = record.items.len();
            summary.cache_hit = true;
            summary.log();
            return PipelineOutput { record, summary };
        }

        let outcome = self.fetcher.fetch_all(&self.sources).await;
        let entries = outcome.entries();
        let filtered = filter_relevant(
            &entries,
            subject,
            company_name,
            target_count,
            &self.scorer,
        );

        let record = Arc::new(ResultSetRecord {
            items: filtered.articles,
        });
        self.results.insert(key, Arc::clone(&record));

        summary.fetched = entries.len();
        summary.invalid = outcome.invalid_total();
        summary.failed_sources = outcome.failed_sources();
        summary.scanned = filtered.scanned;
        summary.relevant = record.items.len();
        summary.log();

        PipelineOutput { record, summary }
    }

    /// Reclaim expired entries from both caches.
    pub fn sweep_caches(&self) -> SweepStats {
        let results = self.results.sweep();
        if results > 0 {
            tracing::info!(removed = results, "cleaned up expired result cache entries");
        }
        SweepStats {
            sentiment: self.scorer.sweep(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RelevantArticle;

    fn offline_pipeline() -> Pipeline {
        Pipeline::new(Vec::new(), &PipelineSettings::default()).expect("pipeline")
    }

    #[test]
    fn settings_follow_app_config() {
        let config = AppConfig {
            env: tickerwire_core::Environment::Test,
            log_level: "debug".to_string(),
            feeds_path: "feeds.yaml".into(),
            fetch_timeout_secs: 3,
            user_agent: "tickerwire-test/0.1".to_string(),
            max_concurrent_fetches: 7,
            max_concurrent_scores: 2,
            sentiment_cache_ttl_secs: 3600,
            result_cache_ttl_secs: Some(60),
            verify_feeds_on_startup: false,
            resolver_base_url: "http://localhost".to_string(),
        };
        let settings = PipelineSettings::from(&config);
        assert_eq!(settings.fetch_timeout, Duration::from_secs(3));
        assert_eq!(settings.max_concurrent_fetches, 7);
        assert_eq!(settings.user_agent, "tickerwire-test/0.1");
        assert_eq!(settings.result_cache_ttl, Some(Duration::from_secs(60)));
        assert_eq!(settings.sentiment_cache_ttl, DEFAULT_SENTIMENT_TTL);
    }

    #[tokio::test]
    async fn zero_target_returns_empty_without_caching() {
        let pipeline = offline_pipeline();
        let output = pipeline.run("ACME", "Acme Corp", 0).await;
        assert!(output.record.items.is_empty());
        assert_eq!(output.summary.shortfall(), 0);
        assert!(pipeline.result_cache().is_empty());
    }

    #[tokio::test]
    async fn cached_record_is_returned_as_is() {
        let pipeline = offline_pipeline();
        let record = Arc::new(ResultSetRecord {
            items: vec![RelevantArticle {
                title: "Acme rallies".to_string(),
                link: "https://example.com/acme".to_string(),
                relevance_score: 1.0,
            }],
        });
        pipeline
            .result_cache()
            .insert(ResultKey::new("ACME", "Acme Corp", 3), Arc::clone(&record));

        let output = pipeline.run("ACME", "Acme Corp", 3).await;
        assert!(Arc::ptr_eq(&output.record, &record));
        assert!(output.summary.cache_hit);
        assert_eq!(output.summary.relevant, 1);
        assert_eq!(output.summary.shortfall(), 2);
    }

    #[tokio::test]
    async fn miss_with_no_sources_caches_an_empty_set() {
        let pipeline = offline_pipeline();
        let output = pipeline.run("ACME", "", 2).await;
        assert!(output.record.items.is_empty());
        assert!(!output.summary.cache_hit);
        assert_eq!(output.summary.shortfall(), 2);
        assert_eq!(pipeline.result_cache().len(), 1);
    }

    #[test]
    fn sweep_without_ttl_keeps_results() {
        let pipeline = offline_pipeline();
        pipeline.result_cache().insert(
            ResultKey::new("ACME", "", 1),
            Arc::new(ResultSetRecord::default()),
        );
        let stats = pipeline.sweep_caches();
        assert_eq!(stats.results, 0);
        assert_eq!(pipeline.result_cache().len(), 1);
    }
}
