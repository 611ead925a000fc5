use crate::{contains_any, matches_preview, KeywordSet, MatchOutcome, PreviewRecord, VisitedSet};

/// What to do with a pending preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Title or excerpt matched; the article is not fetched.
    MatchedInPreview,
    /// The article was already checked this run; resolves to `NoMatch`.
    AlreadyVisited,
    /// The full text has to be fetched and scanned.
    FetchArticle,
}

impl Decision {
    /// Outcome reached without any fetch, if this decision is terminal.
    pub fn outcome(self) -> Option<MatchOutcome> {
        match self {
            Decision::MatchedInPreview => Some(MatchOutcome::MatchedInPreview),
            Decision::AlreadyVisited => Some(MatchOutcome::NoMatch),
            Decision::FetchArticle => None,
        }
    }
}

/// First step for a pending preview: preview tier, then the visited check.
pub fn decide(record: &PreviewRecord, keywords: &KeywordSet, visited: &VisitedSet) -> Decision {
    if matches_preview(record, keywords) {
        Decision::MatchedInPreview
    } else if visited.contains(&record.url) {
        Decision::AlreadyVisited
    } else {
        Decision::FetchArticle
    }
}

/// Second step, once the article body is available.
pub fn resolve_full_text(full_text: &str, keywords: &KeywordSet) -> MatchOutcome {
    if contains_any(full_text, keywords) {
        MatchOutcome::MatchedInFullText
    } else {
        MatchOutcome::NoMatch
    }
}
