use std::io::{self, Write};
use std::process::ExitCode;

use digest_core::{format_failure_line, format_report_line};
use digest_engine::{CrawlError, CrawlReport};
use digest_logging::digest_debug;

/// Writes the outcome of a run and picks the exit status.
///
/// A fatal crawl error leaves `out` untouched and exits with failure.
pub fn finish<O: Write, D: Write>(
    outcome: Result<CrawlReport, CrawlError>,
    out: &mut O,
    diagnostics: &mut D,
) -> io::Result<ExitCode> {
    match outcome {
        Ok(report) => {
            write_report(&report, out, diagnostics)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            digest_debug!("crawl aborted: {:?}", err);
            writeln!(diagnostics, "news_digest: {err}")?;
            diagnostics.flush()?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Matches go to `out`, one line each in listing order; articles that could
/// not be checked go to `diagnostics`.
pub fn write_report<O: Write, D: Write>(
    report: &CrawlReport,
    out: &mut O,
    diagnostics: &mut D,
) -> io::Result<()> {
    for line in report.results.iter().filter_map(format_report_line) {
        writeln!(out, "{line}")?;
    }
    for failure in &report.failures {
        writeln!(
            diagnostics,
            "{}",
            format_failure_line(&failure.url, &failure.error.to_string())
        )?;
    }
    out.flush()?;
    diagnostics.flush()
}
