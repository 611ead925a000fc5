//! Digest core: pure matching rules, run state and report formatting.
mod decision;
mod keywords;
mod matcher;
mod record;
mod report;
mod url_norm;
mod visited;

pub use decision::{decide, resolve_full_text, Decision};
pub use keywords::{KeywordSet, DEFAULT_KEYWORDS};
pub use matcher::{contains_any, matches_preview, normalize};
pub use record::{MatchOutcome, MatchResult, PreviewRecord};
pub use report::{format_failure_line, format_report_line, FULL_TEXT_MARKER};
pub use url_norm::normalize_url;
pub use visited::VisitedSet;
