//! Plain-text rendering of an analysis report.

use std::fmt::Write as _;

use tickerwire_sentiment::{AnalysisReport, Analyzer, VerificationReport};

const TITLE_WIDTH: usize = 72;

/// Run the analysis, with the feed verification alongside it when `verify`
/// is set. Verification only reports; it never gates the fetch.
pub(crate) async fn run_analysis(
    analyzer: &Analyzer,
    symbol: &str,
    name: Option<&str>,
    count: usize,
    verify: bool,
) -> (Option<VerificationReport>, AnalysisReport) {
    let analysis = async {
        match name {
            Some(name) => analyzer.analyze_with_name(symbol, name, count).await,
            None => analyzer.analyze(symbol, count).await,
        }
    };
    if verify {
        let (verification, report) =
            tokio::join!(analyzer.pipeline().verify_sources(), analysis);
        (Some(verification), report)
    } else {
        (None, analysis.await)
    }
}

pub(crate) fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let heading = if report.company_name.is_empty() {
        report.subject.clone()
    } else {
        format!("{} ({})", report.subject, report.company_name)
    };
    let _ = writeln!(out, "News sentiment for {heading}");
    let _ = writeln!(out);

    for (i, article) in report.articles.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", i + 1, clip(&article.title, TITLE_WIDTH));
        let _ = writeln!(
            out,
            "     sentiment {:+.3}  relevance {:.1}",
            article.sentiment, article.relevance_score
        );
        let _ = writeln!(out, "     {}", article.link);
    }
    if !report.articles.is_empty() {
        let _ = writeln!(out);
    }

    let summary = &report.summary;
    if summary.cache_hit {
        let _ = writeln!(out, "served from cache: {} relevant entries", summary.relevant);
    } else {
        let _ = writeln!(
            out,
            "total entries fetched: {}, scanned: {}, relevant: {} ({} of {} feeds failed)",
            summary.fetched,
            summary.scanned,
            summary.relevant,
            summary.failed_sources,
            summary.sources
        );
    }
    if summary.shortfall() > 0 {
        let _ = writeln!(
            out,
            "could only find {} relevant articles out of the requested {}",
            summary.relevant, summary.target
        );
    }

    match report.average_sentiment {
        Some(avg) => {
            let _ = writeln!(out, "average sentiment: {avg:+.3} ({})", label(avg));
        }
        None => {
            let _ = writeln!(out, "no relevant articles found");
        }
    }
    out
}

/// Conventional compound-score bands.
fn label(score: f64) -> &'static str {
    if score >= 0.05 {
        "positive"
    } else if score <= -0.05 {
        "negative"
    } else {
        "neutral"
    }
}

fn clip(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut clipped: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    clipped.push_str("...");
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickerwire_sentiment::{RunSummary, ScoredArticle};

    fn report(articles: Vec<ScoredArticle>, target: usize) -> AnalysisReport {
        let relevant = articles.len();
        let average_sentiment = if articles.is_empty() {
            None
        } else {
            #[allow(clippy::cast_precision_loss)]
            let n = articles.len() as f64;
            Some(articles.iter().map(|a| a.sentiment).sum::<f64>() / n)
        };
        AnalysisReport {
            subject: "ACME".to_string(),
            company_name: "Acme Corp".to_string(),
            articles,
            summary: RunSummary {
                fetched: 40,
                scanned: 40,
                relevant,
                target,
                sources: 5,
                failed_sources: 1,
                ..RunSummary::default()
            },
            average_sentiment,
        }
    }

    fn article(title: &str, sentiment: f64) -> ScoredArticle {
        ScoredArticle {
            title: title.to_string(),
            link: "https://example.com/a".to_string(),
            relevance_score: 3.0,
            sentiment,
        }
    }

    #[test]
    fn renders_articles_summary_and_shortfall() {
        let text = render_report(&report(vec![article("Acme Corp posts record profits", 0.36)], 3));
        assert!(text.contains("News sentiment for ACME (Acme Corp)"));
        assert!(text.contains("  1. Acme Corp posts record profits"));
        assert!(text.contains("sentiment +0.360  relevance 3.0"));
        assert!(text.contains("(1 of 5 feeds failed)"));
        assert!(text.contains("could only find 1 relevant articles out of the requested 3"));
        assert!(text.contains("average sentiment: +0.360 (positive)"));
    }

    #[test]
    fn no_shortfall_line_when_target_met() {
        let text = render_report(&report(vec![article("Acme slump", -0.4)], 1));
        assert!(!text.contains("could only find"));
        assert!(text.contains("(negative)"));
    }

    #[test]
    fn empty_report_says_nothing_found() {
        let text = render_report(&report(Vec::new(), 2));
        assert!(text.contains("no relevant articles found"));
    }

    #[tokio::test]
    async fn verification_runs_alongside_the_analysis() {
        use std::sync::Arc;
        use std::time::{Duration, Instant};

        use tickerwire_sentiment::{
            FeedSource, Pipeline, PipelineSettings, StaticResolver, VerificationStatus,
        };
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hung.xml"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
            .mount(&server)
            .await;
        let settings = PipelineSettings {
            fetch_timeout: Duration::from_secs(1),
            ..PipelineSettings::default()
        };
        let source = FeedSource::new(format!("{}/hung.xml", server.uri()));
        let pipeline = Pipeline::new(vec![source], &settings).expect("pipeline");
        let analyzer = Analyzer::new(pipeline, Arc::new(StaticResolver::new()));

        let started = Instant::now();
        let (verification, report) =
            run_analysis(&analyzer, "ACME", Some("Acme Corp"), 3, true).await;
        let elapsed = started.elapsed();

        // One timeout's worth of waiting, not one for verification plus one for the fetch.
        assert!(elapsed < Duration::from_millis(1800), "took {elapsed:?}");
        let verification = verification.expect("verification requested");
        assert_eq!(verification.results[0].status, VerificationStatus::Timeout);
        assert_eq!(report.summary.failed_sources, 1);
        assert!(report.articles.is_empty());
    }

    #[tokio::test]
    async fn verification_is_skipped_when_not_requested() {
        use std::sync::Arc;

        use tickerwire_sentiment::{Pipeline, PipelineSettings, StaticResolver};

        let pipeline =
            Pipeline::new(Vec::new(), &PipelineSettings::default()).expect("pipeline");
        let analyzer = Analyzer::new(pipeline, Arc::new(StaticResolver::new()));

        let (verification, report) = run_analysis(&analyzer, "acme", None, 2, false).await;

        assert!(verification.is_none());
        assert_eq!(report.subject, "ACME");
    }

    #[test]
    fn label_bands() {
        assert_eq!(label(0.05), "positive");
        assert_eq!(label(0.0), "neutral");
        assert_eq!(label(-0.2), "negative");
    }

    #[test]
    fn clip_long_titles() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("abcdefghijkl", 8), "abcde...");
    }
}
