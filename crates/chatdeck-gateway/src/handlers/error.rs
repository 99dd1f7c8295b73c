//! Handler error types

use chatdeck_service::ServiceError;
use thiserror::Error;

use crate::protocol::ServerMessage;

/// Handler error type
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Frame could not be decoded
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Validation or storage failure from the service layer
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl HandlerError {
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::Service(e) => e.error_code(),
        }
    }

    /// The `error` frame owed to the sender, if any
    ///
    /// Undecodable frames are dropped silently. Storage failures carry a
    /// generic message so backend details stay in the logs.
    pub fn to_error_frame(&self) -> Option<ServerMessage> {
        match self {
            Self::InvalidPayload(_) => None,
            Self::Service(e) if e.status_code() >= 500 => Some(ServerMessage::error(
                e.error_code(),
                "The request could not be completed, please try again",
            )),
            Self::Service(e) => Some(ServerMessage::error(e.error_code(), e.to_string())),
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
