//! Completion gateway: turns a session into one remote call.

mod wire;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ColloqConfig;
use crate::error::{GatewayError, Result};
use crate::session::ConversationSession;
use crate::transport::{HttpTransport, Transport, TransportError};
use crate::types::{FinishReason, Turn, Usage};

/// Output token budget sent with every request.
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

/// The body submitted to the endpoint. Derived from a session on each call.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Turn>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn from_session(session: &ConversationSession) -> Self {
        Self {
            model: session.model().as_str().to_string(),
            messages: session.history().to_vec(),
            temperature: session.temperature(),
            max_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

/// A successful completion with the metadata the endpoint reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub turn: Turn,
    pub usage: Option<Usage>,
    pub finish_reason: Option<FinishReason>,
}

/// Stateless adapter performing one call per completion.
///
/// The gateway never touches the session it reads; appending the returned
/// turn is up to the caller.
#[derive(Clone)]
pub struct CompletionGateway {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for CompletionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionGateway").finish_non_exhaustive()
    }
}

impl CompletionGateway {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Gateway over HTTP, using the configured endpoint and credential.
    pub fn from_config(config: &ColloqConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::from_config(config)?)))
    }

    /// Request the next assistant turn for `session`.
    pub async fn complete(
        &self,
        session: &ConversationSession,
    ) -> std::result::Result<Turn, GatewayError> {
        self.complete_detailed(session).await.map(|c| c.turn)
    }

    /// Like [`complete`](Self::complete), keeping usage and finish reason.
    pub async fn complete_detailed(
        &self,
        session: &ConversationSession,
    ) -> std::result::Result<Completion, GatewayError> {
        let request = CompletionRequest::from_session(session);

        debug!(
            session = %session.id(),
            model = %request.model,
            turns = request.messages.len(),
            "requesting completion"
        );

        let result = match self.transport.send(&request).await {
            Ok(resp) if resp.is_success() => decode_completion(&resp.body),
            Ok(resp) => Err(status_to_error(resp.status, &resp.body)),
            Err(err) => Err(transport_to_error(err)),
        };

        if let Err(ref err) = result {
            warn!(session = %session.id(), kind = %err.kind, status = ?err.status, "completion failed: {}", err.message);
        }
        result
    }
}

fn decode_completion(body: &str) -> std::result::Result<Completion, GatewayError> {
    let data: wire::ChatResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::malformed(format!("unexpected response body: {e}")))?;
    let choice = data
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::malformed("no choices in response"))?;

    Ok(Completion {
        // A null content (e.g. an empty generation) is stored as empty text.
        turn: Turn::assistant(choice.message.content.unwrap_or_default()),
        usage: data.usage.map(Usage::from),
        finish_reason: choice
            .finish_reason
            .as_deref()
            .and_then(wire::parse_finish_reason),
    })
}

fn status_to_error(status: u16, body: &str) -> GatewayError {
    let message = wire::error_message(status, body);
    match status {
        401 | 403 => GatewayError::auth(message).with_status(status),
        _ => GatewayError::remote(status, message),
    }
}

fn transport_to_error(err: TransportError) -> GatewayError {
    match err {
        TransportError::MissingCredential => GatewayError::auth(err.to_string()),
        TransportError::Timeout | TransportError::Connect(_) | TransportError::Io(_) => {
            GatewayError::network(err.to_string())
        }
    }
}
