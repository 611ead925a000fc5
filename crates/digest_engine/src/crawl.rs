use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use digest_core::{
    decide, resolve_full_text, Decision, KeywordSet, MatchOutcome, MatchResult, PreviewRecord,
    VisitedSet,
};
use futures_util::stream::{self, StreamExt};
use url::Url;

use crate::{
    ArticleError, ArticleFailure, CrawlError, CrawlEvent, CrawlObserver, CrawlReport, Extractor,
    FetchKind, Fetcher, NullObserver, Throttle,
};

#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Minimum spacing between article requests.
    pub article_delay: Duration,
    /// Article checks in flight at once; 1 keeps the run strictly sequential.
    pub concurrency: usize,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            article_delay: Duration::from_secs(1),
            concurrency: 1,
        }
    }
}

/// Runs the listing -> preview -> full text pipeline.
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    observer: Arc<dyn CrawlObserver>,
    settings: CrawlSettings,
}

/// Per-run state. Dropped when the run ends, so every run starts clean.
struct Run<'a> {
    keywords: &'a KeywordSet,
    visited: Mutex<VisitedSet>,
    throttle: Throttle,
}

struct Resolution {
    result: MatchResult,
    failure: Option<ArticleFailure>,
}

impl Crawler {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
        settings: CrawlSettings,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            observer: Arc::new(NullObserver),
            settings,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn CrawlObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Fetches the listing and resolves every preview in listing order.
    ///
    /// Only a listing failure is fatal; article failures resolve to
    /// `NoMatch` and are collected in [`CrawlReport::failures`].
    pub async fn run(
        &self,
        listing_url: &str,
        keywords: &KeywordSet,
    ) -> Result<CrawlReport, CrawlError> {
        let base_url = Url::parse(listing_url).map_err(|err| CrawlError::InvalidListingUrl {
            url: listing_url.to_string(),
            message: err.to_string(),
        })?;

        self.observer.record(CrawlEvent::FetchStarted {
            url: listing_url.to_string(),
            kind: FetchKind::Listing,
        });
        let listing = self.fetcher.fetch(listing_url, FetchKind::Listing).await;
        self.observer.record(CrawlEvent::FetchFinished {
            url: listing_url.to_string(),
            kind: FetchKind::Listing,
            bytes: listing.as_ref().ok().map(|output| output.metadata.byte_len),
        });
        let listing = listing.map_err(|source| CrawlError::ListingFetchFailed {
            url: listing_url.to_string(),
            source,
        })?;

        let previews = self.extractor.extract_previews(&listing.body, &base_url);
        self.observer.record(CrawlEvent::PreviewsExtracted {
            count: previews.len(),
        });

        let run = Run {
            keywords,
            visited: Mutex::new(VisitedSet::new()),
            throttle: Throttle::new(self.settings.article_delay),
        };

        // Decisions are taken while the stream is pulled, which happens in
        // listing order, so dedup does not depend on fetch completion order.
        let resolutions: Vec<Resolution> = stream::iter(previews)
            .map(|record| {
                let decision = run.claim(&record);
                self.resolve(&run, record, decision)
            })
            .buffered(self.settings.concurrency.max(1))
            .collect()
            .await;

        let mut report = CrawlReport {
            listing_url: listing_url.to_string(),
            results: Vec::with_capacity(resolutions.len()),
            failures: Vec::new(),
        };
        for resolution in resolutions {
            report.results.push(resolution.result);
            report.failures.extend(resolution.failure);
        }

        self.observer.record(CrawlEvent::RunFinished {
            summary: report.summary(),
        });
        Ok(report)
    }

    async fn resolve(&self, run: &Run<'_>, record: PreviewRecord, decision: Decision) -> Resolution {
        let (outcome, failure) = match decision.outcome() {
            Some(outcome) => (outcome, None),
            None => match self.check_full_text(run, &record.url).await {
                Ok(outcome) => (outcome, None),
                Err(error) => {
                    self.observer.record(CrawlEvent::ArticleFailed {
                        url: record.url.clone(),
                        reason: error.to_string(),
                    });
                    let failure = ArticleFailure {
                        url: record.url.clone(),
                        error,
                    };
                    (MatchOutcome::NoMatch, Some(failure))
                }
            },
        };
        self.observer.record(CrawlEvent::MatchDecided {
            url: record.url.clone(),
            outcome,
        });
        Resolution {
            result: MatchResult::new(record, outcome),
            failure,
        }
    }

    async fn check_full_text(&self, run: &Run<'_>, url: &str) -> Result<MatchOutcome, ArticleError> {
        self.observer.record(CrawlEvent::FetchStarted {
            url: url.to_string(),
            kind: FetchKind::Article,
        });
        let fetched = run
            .throttle
            .run(self.fetcher.fetch(url, FetchKind::Article))
            .await;
        self.observer.record(CrawlEvent::FetchFinished {
            url: url.to_string(),
            kind: FetchKind::Article,
            bytes: fetched.as_ref().ok().map(|output| output.metadata.byte_len),
        });
        let article = fetched?;
        let full_text = self.extractor.extract_full_text(&article.body)?;
        Ok(resolve_full_text(&full_text, run.keywords))
    }
}

impl Run<'_> {
    /// Decides a preview and, when its article is to be fetched, marks the
    /// URL visited in the same critical section.
    fn claim(&self, record: &PreviewRecord) -> Decision {
        let mut visited = self.visited.lock().unwrap_or_else(PoisonError::into_inner);
        let decision = decide(record, self.keywords, &visited);
        if decision == Decision::FetchArticle {
            visited.mark(record.url.clone());
        }
        decision
    }
}
