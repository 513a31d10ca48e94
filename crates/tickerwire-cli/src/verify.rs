use std::fmt::Write as _;

use tickerwire_sentiment::VerificationReport;

/// One line when everything passed, otherwise one line per failing feed.
pub(crate) fn render_verification(report: &VerificationReport) -> String {
    if report.all_valid() {
        return format!("all {} feeds accessible and valid", report.len());
    }

    let mut out = String::new();
    let mut failed = 0;
    for failure in report.failures() {
        failed += 1;
        let _ = writeln!(out, "{}: {}", failure.source, failure.status);
    }
    let _ = write!(out, "{failed} of {} feeds failed verification", report.len());
    out
}
