//! Cached polarity scoring, single and bulk.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};

use crate::cache::SentimentCache;
use crate::scorer::{LexiconModel, PolarityModel};
use crate::types::SentimentRecord;

/// Default lifetime of a cached polarity score.
pub const DEFAULT_SENTIMENT_TTL: Duration = Duration::from_secs(60 * 60);

/// Scores text polarity, memoizing each distinct text for the cache TTL.
///
/// Cloning is cheap and clones share the same cache and model.
#[derive(Clone)]
pub struct SentimentScorer {
    model: Arc<dyn PolarityModel>,
    cache: Arc<SentimentCache>,
    max_concurrent: usize,
}

impl SentimentScorer {
    /// A scorer backed by the compiled-in lexicon.
    #[must_use]
    pub fn new(ttl: Duration, max_concurrent: usize) -> Self {
        Self::with_model(Arc::new(LexiconModel), ttl, max_concurrent)
    }

    #[must_use]
    pub fn with_model(model: Arc<dyn PolarityModel>, ttl: Duration, max_concurrent: usize) -> Self {
        Self {
            model,
            cache: Arc::new(SentimentCache::new(Some(ttl))),
            max_concurrent: max_concurrent.max(1),
        }
    }

    #[must_use]
    pub fn cache(&self) -> &SentimentCache {
        &self.cache
    }

    /// Polarity of `text`, served from the cache while the cached score is live.
    #[must_use]
    pub fn score(&self, text: &str) -> f64 {
        self.score_at(text, Utc::now())
    }

    /// [`SentimentScorer::score`] with an explicit clock reading.
    #[must_use]
    pub fn score_at(&self, text: &str, now: DateTime<Utc>) -> f64 {
        if let Some(score) = self.cached_at(text, now) {
            return score;
        }
        let score = self.model.polarity(text);
        self.store_at(text.to_string(), score, now);
        score
    }

    /// Score every text concurrently. Output order matches input order.
    ///
    /// Each computation runs on the blocking pool, at most `max_concurrent`
    /// at a time. A computation that panics yields a neutral `0.0` and is
    /// not cached. Dropping the returned future abandons outstanding work
    /// without writing its results.
    pub async fn score_all(&self, texts: &[String]) -> Vec<f64> {
        stream::iter(texts.iter().cloned().map(|text| {
            let scorer = self.clone();
            async move { scorer.score_detached(text).await }
        }))
        .buffered(self.max_concurrent)
        .collect()
        .await
    }

    /// Remove expired scores; returns how many were removed.
    pub fn sweep(&self) -> usize {
        let removed = self.cache.sweep();
        tracing::info!(removed, "cleaned up expired sentiment cache entries");
        removed
    }

    async fn score_detached(&self, text: String) -> f64 {
        let now = Utc::now();
        if let Some(score) = self.cached_at(&text, now) {
            return score;
        }

        let model = Arc::clone(&self.model);
        let input = text.clone();
        match tokio::task::spawn_blocking(move || model.polarity(&input)).await {
            Ok(score) => {
                self.store_at(text, score, Utc::now());
                score
            }
            Err(e) => {
                tracing::warn!(error = %e, "sentiment computation failed; using neutral score");
                0.0
            }
        }
    }

    fn cached_at(&self, text: &str, now: DateTime<Utc>) -> Option<f64> {
        let record = self.cache.get_at(text, now)?;
        tracing::debug!("returning cached sentiment");
        Some(record.score)
    }

    fn store_at(&self, text: String, score: f64, now: DateTime<Utc>) {
        self.cache.insert_at(
            text,
            SentimentRecord {
                score,
                model_version: self.model.version(),
                computed_at: now,
            },
            now,
        );
    }
}

impl std::fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentScorer")
            .field("cache", &self.cache)
            .field("max_concurrent", &self.max_concurrent)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::TimeDelta;

    use super::*;
    use crate::scorer::compound_score;

    /// Counts computations and delays the ones for texts starting with "slow".
    #[derive(Default)]
    struct CountingModel {
        calls: AtomicUsize,
    }

    impl PolarityModel for CountingModel {
        fn polarity(&self, text: &str) -> f64 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.starts_with("slow") {
                std::thread::sleep(Duration::from_millis(150));
            }
            compound_score(text)
        }
    }

    struct PanickingModel;

    impl PolarityModel for PanickingModel {
        fn polarity(&self, text: &str) -> f64 {
            assert!(!text.contains("boom"), "model exploded");
            compound_score(text)
        }
    }

    fn counting_scorer() -> (Arc<CountingModel>, SentimentScorer) {
        let model = Arc::new(CountingModel::default());
        let scorer = SentimentScorer::with_model(model.clone(), DEFAULT_SENTIMENT_TTL, 4);
        (model, scorer)
    }

    #[test]
    fn second_score_within_ttl_is_a_cache_hit() {
        let (model, scorer) = counting_scorer();
        let t0 = Utc::now();
        let first = scorer.score_at("great results", t0);
        let second = scorer.score_at("great results", t0 + TimeDelta::minutes(30));
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn score_after_ttl_recomputes() {
        let (model, scorer) = counting_scorer();
        let t0 = Utc::now();
        let first = scorer.score_at("great results", t0);
        let again = scorer.score_at("great results", t0 + TimeDelta::minutes(61));
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
        assert!((-1.0..=1.0).contains(&again));
        assert_eq!(first.to_bits(), again.to_bits());
    }

    #[test]
    fn distinct_texts_are_cached_separately() {
        let (model, scorer) = counting_scorer();
        let _ = scorer.score("good");
        let _ = scorer.score("bad");
        let _ = scorer.score("good");
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
        assert_eq!(scorer.cache().len(), 2);
    }

    #[test]
    fn cached_scores_record_the_model_version() {
        let lexicon = SentimentScorer::new(DEFAULT_SENTIMENT_TTL, 1);
        let _ = lexicon.score("great results");
        let record = lexicon.cache().get("great results").expect("cached");
        assert_eq!(record.model_version, crate::lexicon::LEXICON_VERSION);

        let (_model, custom) = counting_scorer();
        let _ = custom.score("great results");
        let record = custom.cache().get("great results").expect("cached");
        assert_eq!(record.model_version, "custom");
    }

    #[test]
    fn sweep_reclaims_expired_scores() {
        let (_model, scorer) = counting_scorer();
        let long_ago = Utc::now() - TimeDelta::hours(3);
        let _ = scorer.score_at("stale text", long_ago);
        let _ = scorer.score("fresh text");
        assert_eq!(scorer.sweep(), 1);
        assert_eq!(scorer.cache().len(), 1);
    }

    #[tokio::test]
    async fn bulk_scoring_preserves_input_order_despite_delays() {
        let (_model, scorer) = counting_scorer();
        let texts = vec![
            "slow but great news".to_string(),
            "terrible losses".to_string(),
            "neutral statement".to_string(),
        ];
        let scores = scorer.score_all(&texts).await;
        let expected: Vec<f64> = texts.iter().map(|t| compound_score(t)).collect();
        assert_eq!(scores, expected);
    }

    #[tokio::test]
    async fn bulk_scoring_uses_and_fills_the_cache() {
        let (model, scorer) = counting_scorer();
        let _ = scorer.score("good");
        let texts = vec!["good".to_string(), "bad".to_string()];
        let _ = scorer.score_all(&texts).await;
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
        let _ = scorer.score_all(&texts).await;
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn panicking_computation_degrades_to_neutral() {
        let scorer =
            SentimentScorer::with_model(Arc::new(PanickingModel), DEFAULT_SENTIMENT_TTL, 2);
        let texts = vec!["great".to_string(), "boom".to_string(), "bad".to_string()];
        let scores = scorer.score_all(&texts).await;
        assert_eq!(scores.len(), 3);
        assert!(scores[0] > 0.0);
        assert!(scores[1].abs() < f64::EPSILON);
        assert!(scores[2] < 0.0);
        assert!(scorer.cache().get("boom").is_none());
    }

    #[tokio::test]
    async fn dropped_bulk_scoring_caches_nothing() {
        let (model, scorer) = counting_scorer();
        let texts = vec!["slow good news".to_string(), "slow bad news".to_string()];

        let outcome =
            tokio::time::timeout(Duration::from_millis(20), scorer.score_all(&texts)).await;
        assert!(outcome.is_err());

        // Let the abandoned blocking computations run to completion.
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
        assert!(scorer.cache().is_empty());
    }

    #[tokio::test]
    async fn bulk_scoring_empty_input() {
        let (_model, scorer) = counting_scorer();
        assert!(scorer.score_all(&[]).await.is_empty());
    }
}
