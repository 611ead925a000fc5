use std::fmt;

use digest_core::{MatchOutcome, MatchResult};

/// Which page a fetch targets; only article fetches are throttled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    Listing,
    Article,
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchKind::Listing => write!(f, "listing"),
            FetchKind::Article => write!(f, "article"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    /// Page markup decoded to UTF-8.
    pub body: String,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub encoding_label: String,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("fetching {url} failed ({kind}): {message}")]
pub struct FetchError {
    pub url: String,
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(url: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    WebDriver { code: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "undecodable body"),
            FailureKind::WebDriver { code } => write!(f, "webdriver error {code}"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("no article content container found")]
    NoContentContainer,
    #[error("invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Why a single article could not be checked. Never fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArticleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// The only failures that abort a crawl.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("invalid listing url {url:?}: {message}")]
    InvalidListingUrl { url: String, message: String },
    #[error("listing {url} could not be fetched: {source}")]
    ListingFetchFailed {
        url: String,
        #[source]
        source: FetchError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFailure {
    pub url: String,
    pub error: ArticleError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CrawlSummary {
    pub total: usize,
    pub matched_in_preview: usize,
    pub matched_in_full_text: usize,
    pub no_match: usize,
    pub failed: usize,
}

/// Everything one run produced, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    pub listing_url: String,
    pub results: Vec<MatchResult>,
    pub failures: Vec<ArticleFailure>,
}

impl CrawlReport {
    pub fn matches(&self) -> impl Iterator<Item = &MatchResult> {
        self.results.iter().filter(|result| result.outcome.is_match())
    }

    pub fn outcomes(&self) -> Vec<MatchOutcome> {
        self.results.iter().map(|result| result.outcome).collect()
    }

    pub fn summary(&self) -> CrawlSummary {
        let mut summary = CrawlSummary {
            total: self.results.len(),
            failed: self.failures.len(),
            ..CrawlSummary::default()
        };
        for result in &self.results {
            match result.outcome {
                MatchOutcome::NoMatch => summary.no_match += 1,
                MatchOutcome::MatchedInPreview => summary.matched_in_preview += 1,
                MatchOutcome::MatchedInFullText => summary.matched_in_full_text += 1,
            }
        }
        summary
    }
}

/// Observation points of a run, see [`crate::CrawlObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    FetchStarted { url: String, kind: FetchKind },
    /// `bytes` is `None` when the fetch failed.
    FetchFinished {
        url: String,
        kind: FetchKind,
        bytes: Option<u64>,
    },
    PreviewsExtracted { count: usize },
    MatchDecided { url: String, outcome: MatchOutcome },
    ArticleFailed { url: String, reason: String },
    RunFinished { summary: CrawlSummary },
}
