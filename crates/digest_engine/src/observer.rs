use digest_logging::{digest_debug, digest_info};

use crate::CrawlEvent;

/// Explicit observability port of the crawler.
pub trait CrawlObserver: Send + Sync {
    fn record(&self, event: CrawlEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl CrawlObserver for NullObserver {
    fn record(&self, _event: CrawlEvent) {}
}

/// Forwards events to the `digest_*` logging macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl CrawlObserver for LogObserver {
    fn record(&self, event: CrawlEvent) {
        match event {
            CrawlEvent::FetchStarted { url, kind } => {
                digest_debug!("fetch {} started: {}", kind, url);
            }
            CrawlEvent::FetchFinished { url, kind, bytes } => match bytes {
                Some(bytes) => digest_debug!("fetch {} finished: {} ({} bytes)", kind, url, bytes),
                None => digest_debug!("fetch {} failed: {}", kind, url),
            },
            CrawlEvent::PreviewsExtracted { count } => {
                digest_info!("extracted {} previews", count);
            }
            CrawlEvent::MatchDecided { url, outcome } => {
                digest_info!("{:?}: {}", outcome, url);
            }
            CrawlEvent::ArticleFailed { url, reason } => {
                digest_debug!("article {} could not be checked: {}", url, reason);
            }
            CrawlEvent::RunFinished { summary } => {
                digest_info!(
                    "run finished: total={} preview={} full_text={} no_match={} failed={}",
                    summary.total,
                    summary.matched_in_preview,
                    summary.matched_in_full_text,
                    summary.no_match,
                    summary.failed
                );
            }
        }
    }
}
