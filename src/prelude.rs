//! Convenience re-exports for common use.

pub use crate::chat::ChatAgent;
pub use crate::config::ColloqConfig;
pub use crate::error::{ColloqError, GatewayError, GatewayErrorKind, Result};
pub use crate::gateway::{Completion, CompletionGateway, CompletionRequest};
pub use crate::models::ChatModel;
pub use crate::session::{ConversationSession, SessionConfig};
pub use crate::transport::{Transport, TransportError, TransportResponse};
pub use crate::types::{FinishReason, Role, Turn, Usage};
