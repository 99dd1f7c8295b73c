//! # chatdeck-store
//!
//! Storage layer implementing the repository traits from `chatdeck-core`
//! entirely in process memory.
//!
//! Nothing is persisted: restarting the server starts from an empty store.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chatdeck_store::MemStore;
//! use chatdeck_core::MessageRepository;
//!
//! let store = MemStore::new();
//! let recent = store.messages.find_by_channel("general", 50).await?;
//! ```

pub mod repositories;

use std::sync::Arc;

pub use repositories::{MemMemoRepository, MemMessageRepository, MemUserRepository};

/// One instance of every repository, sharing a process lifetime
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    pub users: Arc<MemUserRepository>,
    pub messages: Arc<MemMessageRepository>,
    pub memos: Arc<MemMemoRepository>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}
