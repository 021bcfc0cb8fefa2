//! Blocking JSON-over-HTTP client shared by the embedding and search adapters

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Transport-level failure after retries are exhausted
#[derive(Error, Debug)]
pub enum TransportError {
    /// Could not build the HTTP client
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    /// Non-success status
    #[error("request to {url} failed ({status}): {body}")]
    Status {
        /// Target URL
        url: String,
        /// HTTP status returned
        status: StatusCode,
        /// Response body, if readable
        body: String,
    },

    /// Connection, timeout or body error
    #[error("request to {url} failed: {source}")]
    Request {
        /// Target URL
        url: String,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// Response body did not match the expected contract
    #[error("invalid response from {url}: {reason}")]
    Decode {
        /// Target URL
        url: String,
        /// Decoder message
        reason: String,
    },
}

/// Connection settings for one HTTP backend
#[derive(Debug, Clone, PartialEq)]
pub struct HttpSettings {
    /// Base URL, e.g. `http://127.0.0.1:18115`
    pub endpoint: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Total attempts for transient failures (at least 1)
    pub max_retries: usize,
    /// Bearer token sent with every request
    pub api_key: Option<String>,
}

impl HttpSettings {
    /// Settings with default timeout (120 s) and retries (3)
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(120),
            max_retries: 3,
            api_key: None,
        }
    }

    /// URL of `path` under the endpoint
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// JSON POST client with capped exponential backoff
#[derive(Debug, Clone)]
pub struct JsonClient {
    client: Client,
    max_retries: usize,
}

impl JsonClient {
    /// Build a client from settings
    pub fn new(settings: &HttpSettings) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = settings.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            let value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| TransportError::Build("invalid API key".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }
        let client = Client::builder()
            .timeout(settings.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self {
            client,
            max_retries: settings.max_retries.max(1),
        })
    }

    /// POST `body` to `url` and decode the JSON response
    pub fn post<Req, Resp>(&self, url: &str, body: &Req) -> Result<Resp, TransportError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let mut attempt = 0usize;
        loop {
            match self.client.post(url).json(body).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let text = resp.text().map_err(|source| TransportError::Request {
                            url: url.to_string(),
                            source,
                        })?;
                        return serde_json::from_str(&text).map_err(|e| TransportError::Decode {
                            url: url.to_string(),
                            reason: e.to_string(),
                        });
                    }

                    let body = resp
                        .text()
                        .unwrap_or_else(|_| "<body unavailable>".to_string());
                    if should_retry(status) && attempt + 1 < self.max_retries {
                        attempt += 1;
                        log::warn!("{url} returned {status}, retry {attempt}/{}", self.max_retries - 1);
                        thread::sleep(retry_backoff(attempt));
                        continue;
                    }
                    return Err(TransportError::Status {
                        url: url.to_string(),
                        status,
                        body,
                    });
                }
                Err(err) => {
                    if is_retryable_error(&err) && attempt + 1 < self.max_retries {
                        attempt += 1;
                        log::warn!("{url} request failed ({err}), retry {attempt}/{}", self.max_retries - 1);
                        thread::sleep(retry_backoff(attempt));
                        continue;
                    }
                    return Err(TransportError::Request {
                        url: url.to_string(),
                        source: err,
                    });
                }
            }
        }
    }
}

fn should_retry(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn is_retryable_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

fn retry_backoff(attempt: usize) -> Duration {
    let capped = attempt.min(5) as u32;
    Duration::from_millis(250 * (1 << capped))
}
