//! Data transfer objects for API requests and responses
//!
//! Field names are camelCase on the wire.

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateMemoRequest, HistoryQuery, UpdateMemoRequest};

pub use responses::{
    DeleteMemoResponse, HealthResponse, MemoResponse, MessageResponse, UserResponse,
};
