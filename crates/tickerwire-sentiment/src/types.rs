use chrono::{DateTime, Utc};
use serde::Serialize;

/// An opaque feed URI. The fetcher never looks inside it beyond issuing a GET.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FeedSource(String);

impl FeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FeedSource {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl From<&str> for FeedSource {
    fn from(url: &str) -> Self {
        Self(url.to_string())
    }
}

/// One parsed syndication item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub summary: Option<String>,
}

impl FeedEntry {
    /// Title and summary joined by a single space; the text relevance is scored on.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.summary {
            Some(summary) => format!("{} {summary}", self.title),
            None => self.title.clone(),
        }
    }
}

/// An entry that passed the relevance test, in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelevantArticle {
    pub title: String,
    pub link: String,
    /// Always strictly positive for articles placed in a result set.
    pub relevance_score: f64,
}

/// Cached polarity for one exact text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentRecord {
    /// Compound polarity in `[-1.0, 1.0]`.
    pub score: f64,
    /// Version of the model that computed `score`.
    pub model_version: &'static str,
    pub computed_at: DateTime<Utc>,
}

/// Key of the result cache: one entry per distinct request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultKey {
    pub subject: String,
    pub company_name: String,
    pub target_count: usize,
}

impl ResultKey {
    pub fn new(subject: &str, company_name: &str, target_count: usize) -> Self {
        Self {
            subject: subject.to_string(),
            company_name: company_name.to_string(),
            target_count,
        }
    }
}

/// The relevant articles found for one request. Immutable once cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSetRecord {
    pub items: Vec<RelevantArticle>,
}

/// A relevant article together with the polarity of its title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredArticle {
    pub title: String,
    pub link: String,
    pub relevance_score: f64,
    pub sentiment: f64,
}

/// Counts describing one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Valid entries parsed across all sources.
    pub fetched: usize,
    /// Entries dropped for missing a title or link.
    pub invalid: usize,
    /// Entries examined by the relevance filter before the quota filled.
    pub scanned: usize,
    pub relevant: usize,
    pub target: usize,
    pub sources: usize,
    pub failed_sources: usize,
    pub cache_hit: bool,
}

impl RunSummary {
    /// How many relevant articles short of the target the run came up.
    #[must_use]
    pub fn shortfall(&self) -> usize {
        self.target.saturating_sub(self.relevant)
    }

    pub(crate) fn log(&self) {
        tracing::info!(
            fetched = self.fetched,
            invalid = self.invalid,
            scanned = self.scanned,
            relevant = self.relevant,
            failed_sources = self.failed_sources,
            cache_hit = self.cache_hit,
            "total entries fetched: {}, relevant entries: {}",
            self.fetched,
            self.relevant
        );
        if self.shortfall() > 0 {
            tracing::info!(
                shortfall = self.shortfall(),
                "could only find {} relevant articles out of the requested {}",
                self.relevant,
                self.target
            );
        }
    }
}

/// Everything handed to the downstream consumer for one subject.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub subject: String,
    pub company_name: String,
    pub articles: Vec<ScoredArticle>,
    pub summary: RunSummary,
    /// Mean title sentiment; `None` when no articles were found.
    pub average_sentiment: Option<f64>,
}
