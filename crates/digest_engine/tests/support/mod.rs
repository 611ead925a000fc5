#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Mutex, Once};

use digest_engine::{
    CrawlEvent, CrawlObserver, FailureKind, FetchError, FetchKind, FetchMetadata, FetchOutput,
    Fetcher,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(digest_logging::initialize_for_tests);
}

pub struct Entry<'a> {
    pub title: &'a str,
    pub href: &'a str,
    pub date: &'a str,
    pub preview: &'a str,
}

/// Listing markup shaped like the Habr "all articles" page.
pub fn listing_html(entries: &[Entry<'_>]) -> String {
    let mut html = String::from("<html><body><div class=\"tm-articles-list\">");
    for entry in entries {
        html.push_str(&format!(
            r#"<article class="tm-articles-list__item">
                 <span class="tm-article-datetime-published"><time datetime="2024-05-01T10:00:00.000Z" title="{date}">сегодня</time></span>
                 <h2 class="tm-title"><a href="{href}" class="tm-title__link"><span>{title}</span></a></h2>
                 <div class="article-formatted-body"><p>{preview}</p></div>
               </article>"#,
            date = entry.date,
            href = entry.href,
            title = entry.title,
            preview = entry.preview,
        ));
    }
    html.push_str("</div></body></html>");
    html
}

pub fn article_html(body: &str) -> String {
    format!(
        r#"<html><body><div class="tm-article-body"><div id="post-content-body"><p>{body}</p></div></div></body></html>"#
    )
}

fn output(url: &str, body: &str) -> FetchOutput {
    FetchOutput {
        body: body.to_string(),
        metadata: FetchMetadata {
            original_url: url.to_string(),
            final_url: url.to_string(),
            redirect_count: 0,
            content_type: Some("text/html; charset=utf-8".to_string()),
            encoding_label: "UTF-8".to_string(),
            byte_len: body.len() as u64,
        },
    }
}

/// In-memory fetcher that records every call in order.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, Result<String, FailureKind>>,
    calls: Mutex<Vec<(String, FetchKind)>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), Ok(body.into()));
        self
    }

    pub fn failing(mut self, url: &str, kind: FailureKind) -> Self {
        self.pages.insert(url.to_string(), Err(kind));
        self
    }

    pub fn calls(&self) -> Vec<(String, FetchKind)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn article_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(_, kind)| *kind == FetchKind::Article)
            .map(|(url, _)| url)
            .collect()
    }
}

#[async_trait::async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str, kind: FetchKind) -> Result<FetchOutput, FetchError> {
        self.calls.lock().unwrap().push((url.to_string(), kind));
        match self.pages.get(url) {
            Some(Ok(body)) => Ok(output(url, body)),
            Some(Err(kind)) => Err(FetchError {
                url: url.to_string(),
                kind: kind.clone(),
                message: "simulated".to_string(),
            }),
            None => Err(FetchError {
                url: url.to_string(),
                kind: FailureKind::HttpStatus(404),
                message: "404 Not Found".to_string(),
            }),
        }
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<CrawlEvent>>,
}

impl RecordingObserver {
    pub fn take(&self) -> Vec<CrawlEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl CrawlObserver for RecordingObserver {
    fn record(&self, event: CrawlEvent) {
        self.events.lock().unwrap().push(event);
    }
}
