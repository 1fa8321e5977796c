//! Error types for colloq.

pub mod gateway;

pub use gateway::{GatewayError, GatewayErrorKind};

use thiserror::Error;

/// Primary error type for all colloq operations.
#[derive(Error, Debug)]
pub enum ColloqError {
    /// User input was rejected before anything was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ColloqError {
    /// The gateway failure behind this error, if any.
    pub fn as_gateway(&self) -> Option<&GatewayError> {
        match self {
            Self::Gateway(err) => Some(err),
            _ => None,
        }
    }

    /// Whether retrying the same call later could succeed.
    pub fn is_transient(&self) -> bool {
        self.as_gateway().is_some_and(GatewayError::is_transient)
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ColloqError>;
