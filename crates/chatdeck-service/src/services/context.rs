//! Service context - dependency container for services
//!
//! Holds the repositories and the history limits every service call needs.

use std::sync::Arc;

use chatdeck_common::HistoryConfig;
use chatdeck_core::traits::{MemoRepository, MessageRepository, UserRepository};
use chatdeck_store::MemStore;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    message_repo: Arc<dyn MessageRepository>,
    memo_repo: Arc<dyn MemoRepository>,
    history: HistoryConfig,
}

impl ServiceContext {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        message_repo: Arc<dyn MessageRepository>,
        memo_repo: Arc<dyn MemoRepository>,
        history: HistoryConfig,
    ) -> Self {
        Self {
            user_repo,
            message_repo,
            memo_repo,
            history,
        }
    }

    /// Context backed by the in-memory store
    pub fn from_store(store: &MemStore, history: HistoryConfig) -> Self {
        Self::new(
            store.users.clone(),
            store.messages.clone(),
            store.memos.clone(),
            history,
        )
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    pub fn memo_repo(&self) -> &dyn MemoRepository {
        self.memo_repo.as_ref()
    }

    // === Settings ===

    pub fn history(&self) -> &HistoryConfig {
        &self.history
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("history", &self.history)
            .finish()
    }
}

/// Builder for a ServiceContext with individually replaced repositories
///
/// Anything left unset falls back to a fresh in-memory repository.
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    memo_repo: Option<Arc<dyn MemoRepository>>,
    history: Option<HistoryConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn memo_repo(mut self, repo: Arc<dyn MemoRepository>) -> Self {
        self.memo_repo = Some(repo);
        self
    }

    pub fn history(mut self, history: HistoryConfig) -> Self {
        self.history = Some(history);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the history limits are unusable
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let history = self.history.unwrap_or(HistoryConfig {
            default_limit: 50,
            max_limit: 1000,
        });
        if history.default_limit == 0 || history.max_limit == 0 {
            return Err(ServiceError::validation("history limits must be positive"));
        }

        let store = MemStore::new();
        let user_repo: Arc<dyn UserRepository> = match self.user_repo {
            Some(repo) => repo,
            None => store.users,
        };
        let message_repo: Arc<dyn MessageRepository> = match self.message_repo {
            Some(repo) => repo,
            None => store.messages,
        };
        let memo_repo: Arc<dyn MemoRepository> = match self.memo_repo {
            Some(repo) => repo,
            None => store.memos,
        };

        Ok(ServiceContext::new(user_repo, message_repo, memo_repo, history))
    }
}
