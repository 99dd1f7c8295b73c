//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every call is async and may fail, so callers
//! decide how to degrade.

use async_trait::async_trait;

use crate::entities::{ChatMessage, Memo, MemoChanges, User};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>>;

    /// Find the first user with this username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Insert a user, replacing any existing record with the same id
    async fn save(&self, user: &User) -> RepoResult<()>;

    /// Set the online flag and refresh `last_seen`
    ///
    /// Unknown ids are ignored.
    async fn update_online_status(&self, id: &str, is_online: bool) -> RepoResult<()>;

    /// List users currently flagged online
    async fn find_online(&self) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a new message
    async fn create(&self, message: &ChatMessage) -> RepoResult<()>;

    /// The most recent `limit` messages of a channel, oldest first
    async fn find_by_channel(&self, channel: &str, limit: usize) -> RepoResult<Vec<ChatMessage>>;
}

// ============================================================================
// Memo Repository
// ============================================================================

#[async_trait]
pub trait MemoRepository: Send + Sync {
    /// Find memo by ID
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Memo>>;

    /// List a user's memos, most recently updated first
    async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Memo>>;

    /// Persist a new memo
    async fn create(&self, memo: &Memo) -> RepoResult<()>;

    /// Apply changes to a memo; `None` if the id is unknown
    async fn update(&self, id: &str, changes: MemoChanges) -> RepoResult<Option<Memo>>;

    /// Delete a memo; `false` if the id is unknown
    async fn delete(&self, id: &str) -> RepoResult<bool>;
}
