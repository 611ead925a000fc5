use std::sync::Arc;

use digest_core::KeywordSet;

use crate::{
    CrawlSettings, FetchError, FetchSettings, Fetcher, PageLayout, ReqwestFetcher,
    WebDriverFetcher, WebDriverSettings,
};

/// The "all articles" index the digest is built from.
pub const DEFAULT_LISTING_URL: &str = "https://habr.com/ru/all/";

/// Selects the fetcher implementation.
pub const BACKEND_ENV: &str = "NEWS_DIGEST_BACKEND";
/// Overrides [`WebDriverSettings::endpoint`].
pub const WEBDRIVER_URL_ENV: &str = "WEBDRIVER_URL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Plain HTTP requests.
    #[default]
    Http,
    /// Pages rendered by a browser behind a WebDriver endpoint.
    WebDriver,
}

impl Backend {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "http" => Some(Backend::Http),
            "webdriver" | "browser" | "selenium" => Some(Backend::WebDriver),
            _ => None,
        }
    }
}

/// Everything one run needs. Compiled defaults; the environment may only
/// pick the backend and the WebDriver endpoint.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub listing_url: String,
    pub keywords: KeywordSet,
    pub layout: PageLayout,
    pub crawl: CrawlSettings,
    pub fetch: FetchSettings,
    pub backend: Backend,
    pub webdriver: WebDriverSettings,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            keywords: KeywordSet::standard(),
            layout: PageLayout::default(),
            crawl: CrawlSettings::default(),
            fetch: FetchSettings::default(),
            backend: Backend::default(),
            webdriver: WebDriverSettings::default(),
        }
    }
}

impl DigestConfig {
    /// Applies overrides from `lookup`, usually `std::env::var`.
    ///
    /// Unknown backend names are reported back instead of being ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup(BACKEND_ENV) {
            self.backend = Backend::from_name(&name)
                .ok_or_else(|| format!("{BACKEND_ENV}: unknown backend {name:?}"))?;
        }
        if let Some(endpoint) = lookup(WEBDRIVER_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.webdriver.endpoint = endpoint.trim().to_string();
        }
        Ok(self)
    }

    pub fn build_fetcher(&self) -> Result<Arc<dyn Fetcher>, FetchError> {
        Ok(match self.backend {
            Backend::Http => Arc::new(ReqwestFetcher::new(self.fetch.clone())),
            Backend::WebDriver => Arc::new(WebDriverFetcher::new(self.webdriver.clone())?),
        })
    }
}
