//! Transport seam below the completion gateway.
//!
//! A transport moves one [`CompletionRequest`] to the endpoint and hands back
//! the raw status and body. Interpreting them is the gateway's job.

pub mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use thiserror::Error;

use crate::gateway::CompletionRequest;

/// Raw answer from the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("no API key configured")]
    MissingCredential,

    #[error("transport failure: {0}")]
    Io(String),
}

/// Delivers completion requests to an endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &CompletionRequest)
        -> Result<TransportResponse, TransportError>;
}
