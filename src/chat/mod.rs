//! Chat agent: a session paired with the gateway that continues it.
//!
//! This is the glue every front-end needs: record the user's turn, ask the
//! gateway for a reply, record the reply. Failures come back as errors; how
//! to show them (inline in the conversation or elsewhere) is up to the
//! front-end.

use tracing::debug;

use crate::error::Result;
use crate::gateway::CompletionGateway;
use crate::session::{ConversationSession, SessionConfig};
use crate::types::{Turn, Usage};

#[derive(Debug)]
pub struct ChatAgent {
    session: ConversationSession,
    gateway: CompletionGateway,
    usage: Usage,
}

impl ChatAgent {
    pub fn new(config: SessionConfig, gateway: CompletionGateway) -> Result<Self> {
        Ok(Self::with_session(ConversationSession::new(config)?, gateway))
    }

    pub fn with_session(session: ConversationSession, gateway: CompletionGateway) -> Self {
        Self {
            session,
            gateway,
            usage: Usage::default(),
        }
    }

    /// Send one user message and return the assistant's reply.
    ///
    /// Empty input is rejected before anything is sent. When the gateway
    /// fails, the user turn stays in the history and nothing else is added.
    pub async fn send(&mut self, text: impl Into<String>) -> Result<Turn> {
        self.session.append_user(text)?;

        let completion = self.gateway.complete_detailed(&self.session).await?;
        if let Some(usage) = &completion.usage {
            self.usage.merge(usage);
        }
        self.session
            .append_assistant(completion.turn.content().to_string());
        Ok(completion.turn)
    }

    /// Clear the conversation, keeping the system prompt.
    pub fn reset(&mut self) {
        self.session.reset();
        self.usage = Usage::default();
    }

    /// Replace the session with a fresh one built from `config`. The gateway
    /// is kept. On error the current session is left untouched.
    pub fn reconfigure(&mut self, config: SessionConfig) -> Result<()> {
        let session = ConversationSession::new(config)?;
        debug!(old = %self.session.id(), new = %session.id(), "session reconfigured");
        self.session = session;
        self.usage = Usage::default();
        Ok(())
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn gateway(&self) -> &CompletionGateway {
        &self.gateway
    }

    /// Tokens reported by the endpoint since the last reset.
    pub fn usage(&self) -> Usage {
        self.usage
    }
}
