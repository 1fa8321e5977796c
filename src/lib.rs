//! colloq: conversation sessions over hosted chat completion APIs.
//!
//! A [`ConversationSession`](session::ConversationSession) keeps the ordered
//! turn history; a [`CompletionGateway`](gateway::CompletionGateway) sends it
//! to an OpenAI-compatible endpoint (Groq by default) and hands back the next
//! assistant turn or a typed [`GatewayError`](error::GatewayError).
//!
//! # Quick Start
//!
//! ```no_run
//! use colloq::prelude::*;
//!
//! # async fn example() -> colloq::error::Result<()> {
//! let config = ColloqConfig::from_env()?;
//! let gateway = CompletionGateway::from_config(&config)?;
//! let mut session = ConversationSession::new(config.session_config())?;
//!
//! session.append_user("Hello!")?;
//! let reply = gateway.complete(&session).await?;
//! println!("{}", reply.content());
//! session.append_assistant(reply.into_content());
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod prelude;
pub mod session;
pub mod transport;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
