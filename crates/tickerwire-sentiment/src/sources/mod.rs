//! Concurrent feed retrieval with per-source failure isolation.

mod parse;
mod verify;

pub use parse::{parse_feed, ParsedFeed};
pub use verify::{SourceVerification, VerificationReport, VerificationStatus};

use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::StatusCode;

use crate::error::SentimentError;
use crate::types::{FeedEntry, FeedSource};

/// Result of fetching one source. A failed source has no entries and an error.
#[derive(Debug, Clone)]
pub struct SourceFetch {
    pub source: FeedSource,
    pub entries: Vec<FeedEntry>,
    pub invalid: usize,
    pub error: Option<String>,
}

/// Per-source results of one fetch round, in completion order.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub sources: Vec<SourceFetch>,
}

impl FetchOutcome {
    /// Every source's entries concatenated. Source order is unspecified.
    #[must_use]
    pub fn entries(&self) -> Vec<FeedEntry> {
        self.sources
            .iter()
            .flat_map(|s| s.entries.iter().cloned())
            .collect()
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.sources.iter().map(|s| s.entries.len()).sum()
    }

    #[must_use]
    pub fn failed_sources(&self) -> usize {
        self.sources.iter().filter(|s| s.error.is_some()).count()
    }

    #[must_use]
    pub fn invalid_total(&self) -> usize {
        self.sources.iter().map(|s| s.invalid).sum()
    }
}

/// Status line and body of one GET, body only read for 2xx responses.
pub(crate) struct RawResponse {
    pub(crate) status: StatusCode,
    pub(crate) body: String,
}

/// HTTP client for feed sources, shared by the fetcher and the verifier.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: reqwest::Client,
    timeout: Duration,
    max_concurrent: usize,
}

impl FeedFetcher {
    /// Build a fetcher whose requests each give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the underlying HTTP client cannot be built.
    pub fn new(
        timeout: Duration,
        user_agent: &str,
        max_concurrent: usize,
    ) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            timeout,
            max_concurrent: max_concurrent.max(1),
        })
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch every source concurrently, at most `max_concurrent` in flight.
    ///
    /// Never fails: a source that times out, errors, answers non-2xx, or
    /// serves an unparseable body contributes no entries and is logged.
    pub async fn fetch_all(&self, sources: &[FeedSource]) -> FetchOutcome {
        let fetched: Vec<SourceFetch> = stream::iter(sources.iter().cloned())
            .map(|source| async move {
                match self.fetch_source(&source).await {
                    Ok(parsed) => {
                        tracing::debug!(
                            source = %source,
                            count = parsed.entries.len(),
                            "fetched feed"
                        );
                        SourceFetch {
                            source,
                            entries: parsed.entries,
                            invalid: parsed.invalid,
                            error: None,
                        }
                    }
                    Err(e) => {
                        tracing::warn!(source = %source, error = %e, "feed fetch failed");
                        SourceFetch {
                            source,
                            entries: Vec::new(),
                            invalid: 0,
                            error: Some(e.to_string()),
                        }
                    }
                }
            })
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        FetchOutcome { sources: fetched }
    }

    /// Fetch and parse a single source.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Timeout`] or [`SentimentError::Http`] on
    /// transport failure, [`SentimentError::UnexpectedStatus`] for non-2xx
    /// responses, and a parse error for bodies that are not a feed.
    pub async fn fetch_source(&self, source: &FeedSource) -> Result<ParsedFeed, SentimentError> {
        let response = self.get(source).await?;
        if !response.status.is_success() {
            return Err(SentimentError::UnexpectedStatus {
                status: response.status.as_u16(),
                url: source.to_string(),
            });
        }
        parse_feed(&response.body, source.as_str())
    }

    /// Issue one GET bounded by the fetcher timeout, covering connect,
    /// headers, and body.
    pub(crate) async fn get(&self, source: &FeedSource) -> Result<RawResponse, SentimentError> {
        let request = async {
            let response = self.client.get(source.as_str()).send().await?;
            let status = response.status();
            let body = if status.is_success() {
                response.text().await?
            } else {
                String::new()
            };
            Ok::<_, SentimentError>(RawResponse { status, body })
        };

        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| SentimentError::Timeout {
                url: source.to_string(),
                timeout_ms: self.timeout.as_millis(),
            })?
    }

    pub(crate) fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }
}
