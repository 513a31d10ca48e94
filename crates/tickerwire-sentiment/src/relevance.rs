//! Relevance scoring and quota-capped selection of feed entries.
//!
//! An entry's base score is how many query tokens (the subject plus every
//! word of the company name) occur among the entry's content words. Query
//! tokens are not de-duplicated, so a name repeating the subject counts it
//! twice. Strongly polar text (`|compound| > 0.5`) gets a 1.5x boost.

use std::collections::HashSet;

use crate::sentiment::SentimentScorer;
use crate::types::{FeedEntry, RelevantArticle};

const SENTIMENT_BOOST_THRESHOLD: f64 = 0.5;
const SENTIMENT_BOOST: f64 = 1.5;

/// English stop words dropped before matching.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "couldn", "d", "did", "didn", "do", "does", "doesn", "doing", "don",
    "down", "during", "each", "few", "for", "from", "further", "had", "hadn", "has", "hasn", "have",
    "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "i",
    "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "ll", "m", "ma", "me", "mightn",
    "more", "most", "mustn", "my", "myself", "needn", "no", "nor", "not", "now", "o", "of", "off",
    "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "re", "s",
    "same", "shan", "she", "should", "shouldn", "so", "some", "such", "t", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "ve", "very", "was", "wasn", "we", "were",
    "weren", "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "won",
    "wouldn", "y", "you", "your", "yours", "yourself", "yourselves",
];

/// Result of running the filter over one batch of entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    /// Relevant articles in discovery order, never more than the target.
    pub articles: Vec<RelevantArticle>,
    /// Entries examined before the quota filled (or all of them).
    pub scanned: usize,
}

/// Lower-cased alphabetic runs of `text`. Digits and punctuation split words
/// and are discarded.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// The tokens an entry is matched against: the subject's, then the name's.
#[must_use]
pub fn query_tokens(subject: &str, company_name: &str) -> Vec<String> {
    let mut tokens = tokenize(subject);
    tokens.extend(tokenize(company_name));
    tokens
}

/// Count of query tokens present among the content words of `text`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn base_score(text: &str, query: &[String]) -> f64 {
    let words: HashSet<String> = tokenize(text)
        .into_iter()
        .filter(|w| !is_stop_word(w))
        .collect();
    query.iter().filter(|token| words.contains(*token)).count() as f64
}

/// Full relevance score of `text`: base score, boosted for strong polarity.
///
/// Texts with no query match score `0.0` without consulting the scorer.
#[must_use]
pub fn relevance_score(text: &str, query: &[String], scorer: &SentimentScorer) -> f64 {
    let base = base_score(text, query);
    if base <= 0.0 {
        return 0.0;
    }
    let compound = scorer.score(text);
    if compound.abs() > SENTIMENT_BOOST_THRESHOLD {
        base * SENTIMENT_BOOST
    } else {
        base
    }
}

/// Select up to `target_count` relevant entries in input order.
///
/// Stops examining entries once the quota is met. Returns fewer articles
/// than requested when the input runs out first.
#[must_use]
pub fn filter_relevant(
    entries: &[FeedEntry],
    subject: &str,
    company_name: &str,
    target_count: usize,
    scorer: &SentimentScorer,
) -> FilterOutcome {
    let query = query_tokens(subject, company_name);
    let mut outcome = FilterOutcome::default();
    if target_count == 0 || query.is_empty() {
        return outcome;
    }

    for entry in entries {
        if outcome.articles.len() >= target_count {
            break;
        }
        outcome.scanned += 1;

        let score = relevance_score(&entry.text(), &query, scorer);
        if score > 0.0 {
            tracing::debug!(
                number = outcome.articles.len() + 1,
                score,
                title = %truncate(&entry.title, 50),
                "relevant article found"
            );
            outcome.articles.push(RelevantArticle {
                title: entry.title.clone(),
                link: entry.link.clone(),
                relevance_score: score,
            });
        }
    }

    outcome
}

fn truncate(s: &str, max_chars: usize) -> &str {
    s.char_indices().nth(max_chars).map_or(s, |(idx, _)| &s[..idx])
}
