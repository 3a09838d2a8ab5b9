use crossterm::style::{StyledContent, Stylize};
use itertools::Itertools;
use std::io::Write;

use crate::report::BenchReport;

/// Plain text report.
///
/// ```text
/// 120 requests: avg response time, sec: 0.042
/// Results:
/// Sent 130 requests, 120 success
/// Server errors by code: {502: 4, 503: 6}
/// RPS via success: 12
/// ```
pub struct TextReporter;

impl super::BenchReporter for TextReporter {
    fn print(&self, w: &mut dyn Write, report: &BenchReport) -> anyhow::Result<()> {
        let stats = &report.stats;

        if let Some(line) = stats.avg_line() {
            writeln!(w, "{line}")?;
        }

        writeln!(w, "{}", "Results:".h1())?;
        writeln!(w, "Sent {} requests, {} success", stats.sent(), stats.success.count)?;
        if !stats.server_errors.is_empty() {
            let errors = stats
                .server_errors
                .iter()
                .map(|(code, count)| format!("{code}: {count}"))
                .join(", ");
            writeln!(w, "{} {{{errors}}}", "Server errors by code:".red())?;
        }
        writeln!(w, "RPS via success: {:.0}", report.rps())?;

        Ok(())
    }
}

trait ReportStyle {
    fn h1(&self) -> StyledContent<&str>;
}

impl<T: AsRef<str>> ReportStyle for T {
    fn h1(&self) -> StyledContent<&str> {
        self.as_ref().bold().yellow()
    }
}
