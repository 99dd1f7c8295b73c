//! Presence service
//!
//! Tracks which users are online. A user comes online on `join` and goes
//! offline when their last connection closes.

use tracing::{debug, info, instrument};
use uuid::Uuid;

use chatdeck_core::entities::User;

use crate::dto::UserResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Presence service
pub struct PresenceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PresenceService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Identify a user and mark them online
    ///
    /// An absent or blank `user_id` gets a freshly generated one. Known users
    /// take the new username; unknown ids are created.
    #[instrument(skip(self))]
    pub async fn join(&self, user_id: Option<&str>, username: &str) -> ServiceResult<UserResponse> {
        User::validate_username(username)?;

        let user_id = match user_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };

        let user = match self.ctx.user_repo().find_by_id(&user_id).await? {
            Some(mut existing) => {
                existing.set_username(username);
                existing.set_online(true);
                existing
            }
            None => {
                debug!(user_id = %user_id, "first join for user");
                User::new(user_id, username)
            }
        };

        self.ctx.user_repo().save(&user).await?;
        info!(user_id = %user.id, username = %user.username, "User online");

        Ok(UserResponse::from(user))
    }

    /// Mark a user offline; unknown ids are ignored
    #[instrument(skip(self))]
    pub async fn go_offline(&self, user_id: &str) -> ServiceResult<()> {
        self.ctx.user_repo().update_online_status(user_id, false).await?;
        info!(user_id = %user_id, "User offline");
        Ok(())
    }

    /// Users currently online
    pub async fn online_users(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().find_online().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}
