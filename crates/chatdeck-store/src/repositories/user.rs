//! In-memory implementation of UserRepository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::instrument;

use chatdeck_core::entities::User;
use chatdeck_core::traits::{RepoResult, UserRepository};

/// Users keyed by id
#[derive(Debug, Default)]
pub struct MemUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl MemUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users ever seen
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserRepository for MemUserRepository {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        Ok(self.users.read().get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn save(&self, user: &User) -> RepoResult<()> {
        self.users.write().insert(user.id.clone(), user.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_online_status(&self, id: &str, is_online: bool) -> RepoResult<()> {
        match self.users.write().get_mut(id) {
            Some(user) => user.set_online(is_online),
            None => tracing::debug!("online status update for unknown user ignored"),
        }
        Ok(())
    }

    async fn find_online(&self) -> RepoResult<Vec<User>> {
        let mut online: Vec<User> = self
            .users
            .read()
            .values()
            .filter(|u| u.is_online)
            .cloned()
            .collect();

        // HashMap order is arbitrary; keep listings stable for clients
        online.sort_by(|a, b| a.username.cmp(&b.username).then_with(|| a.id.cmp(&b.id)));
        Ok(online)
    }
}
