/// One entry of the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRecord {
    pub title: String,
    /// Absolute, normalized article URL.
    pub url: String,
    /// Display string taken verbatim from the page; never parsed.
    pub published_at: String,
    /// Excerpt shown on the listing, possibly empty.
    pub preview_text: String,
}

impl PreviewRecord {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        published_at: impl Into<String>,
        preview_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            published_at: published_at.into(),
            preview_text: preview_text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    NoMatch,
    MatchedInPreview,
    MatchedInFullText,
}

impl MatchOutcome {
    pub fn is_match(self) -> bool {
        !matches!(self, MatchOutcome::NoMatch)
    }
}

/// A preview tagged with its final outcome. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub record: PreviewRecord,
    pub outcome: MatchOutcome,
}

impl MatchResult {
    pub fn new(record: PreviewRecord, outcome: MatchOutcome) -> Self {
        Self { record, outcome }
    }
}
