//! One-shot reachability and validity probe over the configured sources.

use futures::stream::{self, StreamExt};
use serde::Serialize;

use super::{parse_feed, FeedFetcher};
use crate::types::FeedSource;

/// Terminal classification of one source for one verification pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VerificationStatus {
    Valid,
    AccessibleInvalidContent,
    Inaccessible(u16),
    Timeout,
    Error(String),
}

impl VerificationStatus {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationStatus::Valid)
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationStatus::Valid => f.write_str("valid"),
            VerificationStatus::AccessibleInvalidContent => {
                f.write_str("accessible but not a valid feed")
            }
            VerificationStatus::Inaccessible(code) => write!(f, "inaccessible (HTTP {code})"),
            VerificationStatus::Timeout => f.write_str("timeout"),
            VerificationStatus::Error(reason) => write!(f, "error: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceVerification {
    pub source: FeedSource,
    pub status: VerificationStatus,
}

/// Statuses for every source, in the order the sources were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub results: Vec<SourceVerification>,
}

impl VerificationReport {
    #[must_use]
    pub fn all_valid(&self) -> bool {
        self.results.iter().all(|r| r.status.is_valid())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SourceVerification> {
        self.results.iter().filter(|r| !r.status.is_valid())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl FeedFetcher {
    /// Probe every source and classify it. Purely observational.
    pub async fn verify_sources(&self, sources: &[FeedSource]) -> VerificationReport {
        let results: Vec<SourceVerification> = stream::iter(sources.iter().cloned())
            .map(|source| async move {
                let status = self.verify_source(&source).await;
                SourceVerification { source, status }
            })
            .buffered(self.max_concurrent())
            .collect()
            .await;

        let failed = results.iter().filter(|r| !r.status.is_valid()).count();
        tracing::info!(
            total = results.len(),
            failed,
            "feed verification complete"
        );
        VerificationReport { results }
    }

    /// Classify one source: timeout, transport error, non-2xx, no entries,
    /// then valid, checked in that order.
    pub async fn verify_source(&self, source: &FeedSource) -> VerificationStatus {
        let response = match self.get(source).await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return VerificationStatus::Timeout,
            Err(e) => return VerificationStatus::Error(e.to_string()),
        };

        if !response.status.is_success() {
            return VerificationStatus::Inaccessible(response.status.as_u16());
        }

        match parse_feed(&response.body, source.as_str()) {
            Ok(parsed) if !parsed.entries.is_empty() => VerificationStatus::Valid,
            Ok(_) | Err(_) => VerificationStatus::AccessibleInvalidContent,
        }
    }
}
