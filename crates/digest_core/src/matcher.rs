use crate::{KeywordSet, PreviewRecord};

/// Lowercases `text` and drops every char that is neither a word char
/// (alphanumeric or `_`) nor whitespace.
///
/// Lowercasing happens first so that case mappings which expand into
/// combining marks are stripped too, keeping the function idempotent.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

/// True when any keyword occurs as a substring of the normalized `text`.
///
/// No word boundaries: "web" matches "webinar".
pub fn contains_any(text: &str, keywords: &KeywordSet) -> bool {
    if text.is_empty() || keywords.is_empty() {
        return false;
    }
    let haystack = normalize(text);
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

/// Preview-tier check: title or excerpt.
pub fn matches_preview(record: &PreviewRecord, keywords: &KeywordSet) -> bool {
    contains_any(&record.title, keywords) || contains_any(&record.preview_text, keywords)
}
