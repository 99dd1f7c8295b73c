//! Join handler

use chatdeck_service::PresenceService;

use crate::connection::{ConnectionId, Identity};
use crate::protocol::ServerMessage;
use crate::server::GatewayState;

use super::HandlerResult;

/// Identifies a connection and announces the user
pub struct JoinHandler;

impl JoinHandler {
    /// Upsert the user, attach the identity, broadcast `userJoined` to all
    ///
    /// Storage writes and the online-user read run before the registry is
    /// touched, so a failed join leaves the connection as it was.
    #[tracing::instrument(skip(state, id, username), fields(connection_id = %id))]
    pub async fn handle(
        state: &GatewayState,
        id: &ConnectionId,
        username: &str,
        user_id: Option<&str>,
    ) -> HandlerResult<()> {
        let presence = PresenceService::new(state.service_context());
        let user = presence.join(user_id, username).await?;
        let mut online_users = presence.online_users().await?;

        let identity = Identity::new(user.id.clone(), user.username.clone());
        if let Some(previous) = state.registry().attach_identity(id, identity) {
            if previous.user_id != user.id && !state.registry().has_user(&previous.user_id) {
                match presence.go_offline(&previous.user_id).await {
                    Ok(()) => online_users.retain(|u| u.id != previous.user_id),
                    Err(e) => {
                        tracing::warn!(user_id = %previous.user_id, error = %e, "Failed to retire previous identity");
                    }
                }
            }
        }

        state.broadcaster().broadcast(
            &ServerMessage::UserJoined {
                username: user.username,
                online_users,
            },
            None,
        );
        Ok(())
    }
}
