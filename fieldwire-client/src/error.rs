//! Client error types.

use fieldwire_protocol::{ExceptionCode, ProtocolError};
use thiserror::Error;

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("peer exception for function {code:#04x}: {exception}")]
    Exception { code: u8, exception: ExceptionCode },
}

impl ClientError {
    /// Returns whether this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Io(_) => true,
            ClientError::Transport(_) => true,
            ClientError::Exception { exception, .. } => exception.is_retryable(),
            ClientError::Protocol(_) => false,
        }
    }
}
