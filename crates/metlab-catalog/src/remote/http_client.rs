//! Blocking HTTP transport with retry, exponential backoff, timeout and gzip.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use metlab_core::config::BackendConfig;
use metlab_core::errors::BackendError;

use super::request::RequestSpec;
#[cfg(feature = "remote")]
use super::request::{HttpMethod, RequestBody};

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    /// Retries after the first attempt. Client errors are never retried.
    pub max_retries: u32,
    /// Doubles after every retry, up to `max_backoff`.
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::from_backend(&BackendConfig::default())
    }
}

impl HttpClientConfig {
    pub fn from_backend(config: &BackendConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.effective_timeout_secs()),
            max_retries: config.effective_max_retries(),
            initial_backoff: Duration::from_millis(config.effective_backoff_ms()),
            max_backoff: Duration::from_secs(30),
        }
    }
}

/// Status and raw body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, BackendError> {
        serde_json::from_slice(&self.body).map_err(|e| BackendError::Decode {
            reason: e.to_string(),
        })
    }

    /// Maps a non-2xx response to [`BackendError::Http`], preferring the
    /// backend's own `message`/`error` field over the raw body.
    pub fn into_result(self) -> Result<Self, BackendError> {
        if self.is_success() {
            return Ok(self);
        }
        let text = String::from_utf8_lossy(&self.body).into_owned();
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| {
                ["message", "error", "msg"]
                    .iter()
                    .find_map(|k| v.get(k).and_then(Value::as_str).map(str::to_string))
            })
            .unwrap_or(text);
        Err(BackendError::Http {
            status: self.status,
            message,
        })
    }
}

#[cfg(feature = "remote")]
fn net_err(reason: impl Into<String>) -> BackendError {
    BackendError::Network { reason: reason.into() }
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Sends `request`, retrying network failures and 5xx responses. The
    /// returned response is always 2xx.
    pub fn execute(&self, request: &RequestSpec) -> Result<HttpResponse, BackendError> {
        #[cfg(feature = "remote")]
        {
            self.do_request(request)
        }

        #[cfg(not(feature = "remote"))]
        {
            tracing::debug!(method = request.method.as_str(), url = %request.url, "remote transport disabled");
            Err(BackendError::NotConfigured {
                what: "remote feature not enabled".to_string(),
            })
        }
    }

    #[cfg(feature = "remote")]
    fn do_request(&self, request: &RequestSpec) -> Result<HttpResponse, BackendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .gzip(true)
            .build()
            .map_err(|e| net_err(e.to_string()))?;
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let url = request.full_url();

        let mut backoff = self.config.initial_backoff;
        let mut last_err = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::debug!(
                    attempt,
                    max_retries = self.config.max_retries,
                    ?backoff,
                    "backend: retrying request"
                );
                std::thread::sleep(backoff);
                backoff = (backoff * 2).min(self.config.max_backoff);
            }

            let mut req = client.request(method.clone(), &url);
            for (name, value) in &request.headers {
                req = req.header(name.as_str(), value.as_str());
            }
            req = match &request.body {
                RequestBody::None => req,
                RequestBody::Json(value) => req.json(value),
                RequestBody::Bytes { data, content_type } => req
                    .header(reqwest::header::CONTENT_TYPE, content_type.as_str())
                    .body(data.clone()),
            };

            match req.send() {
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp
                        .bytes()
                        .map_err(|e| net_err(format!("reading response failed: {e}")))?
                        .to_vec();
                    let response = HttpResponse {
                        status: status.as_u16(),
                        body,
                    };
                    if status.is_success() || status.is_client_error() {
                        return response.into_result();
                    }
                    last_err = format!("HTTP {status}");
                }
                Err(e) => {
                    last_err = e.to_string();
                }
            }
        }

        Err(net_err(format!(
            "all {} retries exhausted: {last_err}",
            self.config.max_retries
        )))
    }
}
