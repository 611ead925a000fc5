//! Digest engine: fetching, extraction and the crawl coordinator.
mod config;
mod crawl;
mod decode;
mod extract;
mod fetch;
mod observer;
mod throttle;
mod types;
mod webdriver;

pub use config::{Backend, DigestConfig, BACKEND_ENV, DEFAULT_LISTING_URL, WEBDRIVER_URL_ENV};
pub use crawl::{CrawlSettings, Crawler};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use extract::{Extractor, HabrExtractor, ListingDocument, PageLayout};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use observer::{CrawlObserver, LogObserver, NullObserver};
pub use throttle::Throttle;
pub use types::{
    ArticleError, ArticleFailure, CrawlError, CrawlEvent, CrawlReport, CrawlSummary,
    ExtractError, FailureKind, FetchError, FetchKind, FetchMetadata, FetchOutput,
};
pub use webdriver::{WebDriverFetcher, WebDriverSettings};
