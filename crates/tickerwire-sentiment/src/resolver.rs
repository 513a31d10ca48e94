//! Subject identifier to descriptive name lookup.
//!
//! Lookups never fail the caller: an unknown subject or a broken upstream
//! yields `None`, and relevance scoring falls back to subject tokens only.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use crate::error::SentimentError;

#[async_trait]
pub trait SubjectResolver: Send + Sync {
    /// Descriptive name for `subject`, or `None` if it cannot be resolved.
    async fn resolve(&self, subject: &str) -> Option<String>;
}

/// Resolves ticker symbols through the Yahoo Finance search endpoint.
#[derive(Debug, Clone)]
pub struct YahooSearchResolver {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    symbol: String,
    longname: Option<String>,
    shortname: Option<String>,
}

impl YahooSearchResolver {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Name of the quote whose symbol matches `subject`, long name first.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Resolver`] when no quote carries a usable
    /// name for `subject`, and an HTTP or status error when the search fails.
    pub async fn lookup(&self, subject: &str) -> Result<String, SentimentError> {
        let encoded = utf8_percent_encode(subject, NON_ALPHANUMERIC);
        let url = format!("{}/v1/finance/search?q={encoded}", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SentimentError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }
        let body: SearchResponse = response.json().await?;

        body.quotes
            .into_iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(subject))
            .and_then(|q| non_blank(q.longname).or_else(|| non_blank(q.shortname)))
            .ok_or_else(|| SentimentError::Resolver(format!("no quote named for {subject}")))
    }
}

fn non_blank(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

#[async_trait]
impl SubjectResolver for YahooSearchResolver {
    async fn resolve(&self, subject: &str) -> Option<String> {
        match self.lookup(subject).await {
            Ok(name) => {
                tracing::debug!(subject, name = %name, "resolved subject name");
                Some(name)
            }
            Err(SentimentError::Resolver(reason)) => {
                tracing::warn!(subject, reason = %reason, "no name found for subject");
                None
            }
            Err(e) => {
                tracing::warn!(subject, error = %e, "subject name lookup failed");
                None
            }
        }
    }
}

/// Fixed subject-to-name table, for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    names: HashMap<String, String>,
}

impl StaticResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping. Subjects match case-insensitively.
    #[must_use]
    pub fn with(mut self, subject: &str, name: &str) -> Self {
        self.names
            .insert(subject.trim().to_uppercase(), name.to_string());
        self
    }
}

impl<S: AsRef<str>, N: AsRef<str>> FromIterator<(S, N)> for StaticResolver {
    fn from_iter<I: IntoIterator<Item = (S, N)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |resolver, (subject, name)| {
            resolver.with(subject.as_ref(), name.as_ref())
        })
    }
}

#[async_trait]
impl SubjectResolver for StaticResolver {
    async fn resolve(&self, subject: &str) -> Option<String> {
        self.names.get(&subject.trim().to_uppercase()).cloned()
    }
}
