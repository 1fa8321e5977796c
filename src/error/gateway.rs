//! Normalized failures of a completion call.

use strum::Display;
use thiserror::Error;

/// Broad failure class, for routing recovery logic without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum GatewayErrorKind {
    /// Missing or rejected credential.
    #[strum(to_string = "Authentication error")]
    Auth,
    /// Endpoint unreachable or the call timed out.
    #[strum(to_string = "Network error")]
    Network,
    /// Non-2xx answer other than an auth rejection.
    #[strum(to_string = "Remote error")]
    Remote,
    /// 2xx answer whose body did not have the expected shape.
    #[strum(to_string = "Malformed response")]
    MalformedResponse,
}

/// A completion call that did not produce an assistant turn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
    /// HTTP status, when the endpoint answered at all.
    pub status: Option<u16>,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Auth, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Network, message)
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Remote, message).with_status(status)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::MalformedResponse, message)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_auth(&self) -> bool {
        self.kind == GatewayErrorKind::Auth
    }

    /// Network failures, rate limiting and server-side errors may clear up on
    /// their own. Nothing in this crate retries; this only informs callers.
    pub fn is_transient(&self) -> bool {
        match self.kind {
            GatewayErrorKind::Network => true,
            GatewayErrorKind::Remote => {
                matches!(self.status, Some(429) | Some(500..=599))
            }
            GatewayErrorKind::Auth | GatewayErrorKind::MalformedResponse => false,
        }
    }
}
