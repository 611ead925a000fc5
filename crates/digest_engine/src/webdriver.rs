//! Browser-rendered fetching through a W3C WebDriver endpoint
//! (chromedriver, geckodriver, a Selenium grid).
//!
//! One session is opened lazily and reused for every page; pages are loaded
//! one at a time since a session drives a single browser tab.

use std::time::Duration;

use digest_logging::{digest_debug, digest_info, digest_warn, truncate_for_log};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::fetch::map_reqwest_error;
use crate::{FailureKind, FetchError, FetchKind, FetchMetadata, FetchOutput, Fetcher};

#[derive(Debug, Clone)]
pub struct WebDriverSettings {
    pub endpoint: String,
    pub headless: bool,
    pub window_size: (u32, u32),
    /// Time given to scripts after the listing has loaded.
    pub listing_settle: Duration,
    /// Time given to scripts after an article has loaded.
    pub article_settle: Duration,
    /// Page load limit, also used as the HTTP timeout towards the driver.
    pub page_load_timeout: Duration,
}

impl Default for WebDriverSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9515".to_string(),
            headless: true,
            window_size: (1920, 1080),
            listing_settle: Duration::from_secs(3),
            article_settle: Duration::from_secs(2),
            page_load_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    value: Value,
}

#[derive(Debug, Deserialize)]
struct WireError {
    error: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct NewSession {
    #[serde(rename = "sessionId")]
    session_id: String,
}

pub struct WebDriverFetcher {
    client: reqwest::Client,
    settings: WebDriverSettings,
    session: Mutex<Option<String>>,
}

impl WebDriverFetcher {
    pub fn new(settings: WebDriverSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(settings.page_load_timeout + Duration::from_secs(5))
            .build()
            .map_err(|err| FetchError::new(&settings.endpoint, FailureKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            settings,
            session: Mutex::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.endpoint.trim_end_matches('/'), path)
    }

    fn capabilities(&self) -> Value {
        let (width, height) = self.settings.window_size;
        let mut args = vec![format!("--window-size={width},{height}")];
        if self.settings.headless {
            args.push("--headless".to_string());
        }
        json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "pageLoadStrategy": "normal",
                    "timeouts": {
                        "pageLoad": self.settings.page_load_timeout.as_millis() as u64
                    },
                    "goog:chromeOptions": { "args": args }
                }
            }
        })
    }

    /// Sends one WebDriver command and unwraps its `value`.
    async fn command(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<Value>,
        page_url: &str,
    ) -> Result<Value, FetchError> {
        let mut request = self.client.request(method, self.endpoint(path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request
            .send()
            .await
            .map_err(|err| map_reqwest_error(page_url, err))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| map_reqwest_error(page_url, err))?;

        let envelope = serde_json::from_str::<Envelope>(&text).ok();
        if let Some(error) = envelope
            .as_ref()
            .and_then(|env| WireError::deserialize(&env.value).ok())
        {
            let kind = match error.error.as_str() {
                "timeout" | "script timeout" => FailureKind::Timeout,
                "invalid argument" => FailureKind::InvalidUrl,
                code => FailureKind::WebDriver {
                    code: code.to_string(),
                },
            };
            return Err(FetchError::new(page_url, kind, error.message));
        }
        if !status.is_success() {
            return Err(FetchError::new(
                page_url,
                FailureKind::HttpStatus(status.as_u16()),
                truncate_for_log(&text, 240),
            ));
        }
        envelope.map(|env| env.value).ok_or_else(|| {
            FetchError::new(
                page_url,
                FailureKind::WebDriver {
                    code: "malformed response".to_string(),
                },
                truncate_for_log(&text, 240),
            )
        })
    }

    async fn create_session(&self, page_url: &str) -> Result<String, FetchError> {
        let value = self
            .command(
                reqwest::Method::POST,
                "/session",
                Some(self.capabilities()),
                page_url,
            )
            .await?;
        let session = NewSession::deserialize(&value).map_err(|err| {
            FetchError::new(
                page_url,
                FailureKind::WebDriver {
                    code: "session not created".to_string(),
                },
                err.to_string(),
            )
        })?;
        digest_info!("webdriver session {} opened", session.session_id);
        Ok(session.session_id)
    }
}

#[async_trait::async_trait]
impl Fetcher for WebDriverFetcher {
    async fn fetch(&self, url: &str, kind: FetchKind) -> Result<FetchOutput, FetchError> {
        reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(url, FailureKind::InvalidUrl, err.to_string()))?;

        let mut session = self.session.lock().await;
        let session_id = match session.as_ref() {
            Some(id) => id.clone(),
            None => {
                let id = self.create_session(url).await?;
                *session = Some(id.clone());
                id
            }
        };

        digest_debug!("webdriver navigate {} ({})", url, kind);
        self.command(
            reqwest::Method::POST,
            &format!("/session/{session_id}/url"),
            Some(json!({ "url": url })),
            url,
        )
        .await?;

        let settle = match kind {
            FetchKind::Listing => self.settings.listing_settle,
            FetchKind::Article => self.settings.article_settle,
        };
        tokio::time::sleep(settle).await;

        let final_url = self
            .command(
                reqwest::Method::GET,
                &format!("/session/{session_id}/url"),
                None,
                url,
            )
            .await
            .ok()
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_else(|| url.to_string());
        let source = self
            .command(
                reqwest::Method::GET,
                &format!("/session/{session_id}/source"),
                None,
                url,
            )
            .await?;
        let body = source.as_str().map(str::to_string).ok_or_else(|| {
            FetchError::new(
                url,
                FailureKind::WebDriver {
                    code: "malformed response".to_string(),
                },
                "page source is not a string",
            )
        })?;

        let metadata = FetchMetadata {
            original_url: url.to_string(),
            final_url,
            redirect_count: 0,
            content_type: None,
            encoding_label: "UTF-8".to_string(),
            byte_len: body.len() as u64,
        };
        Ok(FetchOutput { body, metadata })
    }

    async fn shutdown(&self) {
        let Some(session_id) = self.session.lock().await.take() else {
            return;
        };
        let endpoint = self.settings.endpoint.clone();
        match self
            .command(
                reqwest::Method::DELETE,
                &format!("/session/{session_id}"),
                None,
                &endpoint,
            )
            .await
        {
            Ok(_) => digest_info!("webdriver session {} closed", session_id),
            Err(err) => digest_warn!("webdriver session {} not closed: {}", session_id, err),
        }
    }
}
