//! # chatdeck-core
//!
//! Domain layer containing entities, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (storage, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    ChatMessage, Memo, MemoChanges, User, ANONYMOUS_USER_ID, DEFAULT_CHANNEL,
    MAX_CONTENT_LENGTH, MAX_USERNAME_LENGTH,
};
pub use error::DomainError;
pub use traits::{MemoRepository, MessageRepository, RepoResult, UserRepository};
