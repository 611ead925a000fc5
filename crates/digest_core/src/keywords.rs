use crate::normalize;

/// Keywords used when no other set is configured.
pub const DEFAULT_KEYWORDS: [&str; 4] = ["дизайн", "фото", "web", "python"];

/// Immutable, ordered set of normalized keywords.
///
/// Entries that normalize to nothing are dropped, as are later duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordSet {
    words: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for word in words {
            let word = normalize(word.as_ref());
            if !word.is_empty() && !normalized.contains(&word) {
                normalized.push(word);
            }
        }
        Self { words: normalized }
    }

    /// The built-in set: design, photo, web and python.
    pub fn standard() -> Self {
        Self::new(DEFAULT_KEYWORDS)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
