use crate::{MatchOutcome, MatchResult};

/// Appended to report lines whose match came from the article body only.
pub const FULL_TEXT_MARKER: &str = " (найдено в полном тексте)";

/// Renders `"<date> — <title> — <url>"` for matches; `None` for `NoMatch`.
pub fn format_report_line(result: &MatchResult) -> Option<String> {
    let record = &result.record;
    let line = format!("{} — {} — {}", record.published_at, record.title, record.url);
    match result.outcome {
        MatchOutcome::NoMatch => None,
        MatchOutcome::MatchedInPreview => Some(line),
        MatchOutcome::MatchedInFullText => Some(format!("{line}{FULL_TEXT_MARKER}")),
    }
}

/// Diagnostic line for an article that could not be checked.
pub fn format_failure_line(url: &str, cause: &str) -> String {
    format!("Ошибка при обработке статьи {url}: {cause}")
}
