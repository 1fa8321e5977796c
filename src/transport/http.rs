//! reqwest-backed transport for OpenAI-compatible endpoints.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::config::ColloqConfig;
use crate::error::{ColloqError, Result};
use crate::gateway::CompletionRequest;

use super::{Transport, TransportError, TransportResponse};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Posts requests to `{base_url}/chat/completions` with bearer auth.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"..")
            .finish()
    }
}

impl HttpTransport {
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| ColloqError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &ColloqConfig) -> Result<Self> {
        Self::new(config.base_url(), config.api_key(), config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        if self.api_key.trim().is_empty() {
            return Err(TransportError::MissingCredential);
        }
        let headers = bearer_headers(&self.api_key).ok_or(TransportError::MissingCredential)?;

        debug!(endpoint = %self.endpoint, "POST chat completion");

        let resp = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(classify)?;
        Ok(TransportResponse { status, body })
    }
}

/// Build default headers for a Bearer-token API. `None` if the key cannot be
/// carried in a header.
fn bearer_headers(api_key: &str) -> Option<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let mut value = HeaderValue::from_str(&format!("Bearer {api_key}")).ok()?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Some(headers)
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Io(error.to_string())
    }
}
