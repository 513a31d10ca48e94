//! News ingestion and sentiment pipeline for tickerwire.
//!
//! Fetches many RSS/Atom feeds concurrently, keeps the entries relevant to a
//! ticker symbol and its company name, and scores them with a lexicon-based
//! compound polarity scorer. Result sets and per-text scores are memoized in
//! two independent in-process caches.

pub mod analyzer;
pub mod cache;
pub mod error;
pub mod lexicon;
pub mod pipeline;
pub mod relevance;
pub mod resolver;
pub mod scorer;
pub mod sentiment;
pub mod sources;
pub mod types;

pub use analyzer::{normalize_subject, Analyzer};
pub use cache::{ResultCache, SentimentCache, TtlCache};
pub use error::SentimentError;
pub use pipeline::{Pipeline, PipelineOutput, PipelineSettings, SweepStats};
pub use relevance::{filter_relevant, FilterOutcome};
pub use resolver::{StaticResolver, SubjectResolver, YahooSearchResolver};
pub use scorer::{compound_score, LexiconModel, PolarityModel};
pub use sentiment::{SentimentScorer, DEFAULT_SENTIMENT_TTL};
pub use sources::{
    parse_feed, FeedFetcher, FetchOutcome, ParsedFeed, SourceFetch, SourceVerification,
    VerificationReport, VerificationStatus,
};
pub use types::{
    AnalysisReport, FeedEntry, FeedSource, RelevantArticle, ResultKey, ResultSetRecord,
    RunSummary, ScoredArticle, SentimentRecord,
};
