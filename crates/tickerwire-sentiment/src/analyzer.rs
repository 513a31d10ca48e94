//! The single entry point: subject and count in, scored articles out.

use std::sync::Arc;

use crate::pipeline::Pipeline;
use crate::resolver::SubjectResolver;
use crate::types::{AnalysisReport, ScoredArticle};

/// Canonical form of a subject identifier: trimmed and upper-cased.
#[must_use]
pub fn normalize_subject(subject: &str) -> String {
    subject.trim().to_uppercase()
}

/// Resolves the subject's name, runs the pipeline, and scores the titles.
pub struct Analyzer {
    pipeline: Pipeline,
    resolver: Arc<dyn SubjectResolver>,
}

impl Analyzer {
    #[must_use]
    pub fn new(pipeline: Pipeline, resolver: Arc<dyn SubjectResolver>) -> Self {
        Self { pipeline, resolver }
    }

    #[must_use]
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Analyze `subject`, looking up its descriptive name first.
    ///
    /// A failed lookup degrades to an empty name and subject-only matching.
    pub async fn analyze(&self, subject: &str, target_count: usize) -> AnalysisReport {
        let subject = normalize_subject(subject);
        let company_name = self.resolver.resolve(&subject).await.unwrap_or_default();
        if company_name.is_empty() {
            tracing::warn!(subject = %subject, "no company name; matching on subject only");
        }
        self.analyze_with_name(&subject, &company_name, target_count)
            .await
    }

    /// Analyze `subject` with a caller-supplied name, skipping the lookup.
    pub async fn analyze_with_name(
        &self,
        subject: &str,
        company_name: &str,
        target_count: usize,
    ) -> AnalysisReport {
        let subject = normalize_subject(subject);
        let output = self
            .pipeline
            .run(&subject, company_name, target_count)
            .await;

        let titles: Vec<String> = output
            .record
            .items
            .iter()
            .map(|a| a.title.clone())
            .collect();
        let scores = self.pipeline.scorer().score_all(&titles).await;

        let articles: Vec<ScoredArticle> = output
            .record
            .items
            .iter()
            .zip(scores)
            .map(|(article, sentiment)| ScoredArticle {
                title: article.title.clone(),
                link: article.link.clone(),
                relevance_score: article.relevance_score,
                sentiment,
            })
            .collect();

        let average_sentiment = average(articles.iter().map(|a| a.sentiment));
        if let Some(avg) = average_sentiment {
            tracing::info!(average_sentiment = avg, "analysis complete");
        }

        AnalysisReport {
            subject,
            company_name: company_name.to_string(),
            articles,
            summary: output.summary,
            average_sentiment,
        }
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

#[allow(clippy::cast_precision_loss)]
fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
