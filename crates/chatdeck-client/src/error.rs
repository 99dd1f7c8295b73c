//! Client error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The connection task has stopped; no more frames can be sent
    #[error("Client closed")]
    Closed,
}

pub type ClientResult<T> = Result<T, ClientError>;
