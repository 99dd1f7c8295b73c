//! Disconnect handler
//!
//! Runs once per socket after both of its tasks have stopped.

use chatdeck_service::PresenceService;

use crate::connection::ConnectionId;
use crate::protocol::ServerMessage;
use crate::server::GatewayState;

pub struct DisconnectHandler;

impl DisconnectHandler {
    /// Drop the connection and, if it had joined, announce `userLeft`
    ///
    /// The user stays online while another connection carries the same id.
    /// Storage failures are logged and skip the broadcast.
    #[tracing::instrument(skip(state, id), fields(connection_id = %id))]
    pub async fn handle(state: &GatewayState, id: &ConnectionId) {
        let _events = state.lock_events().await;
        let Some(identity) = state.registry().remove(id) else {
            tracing::debug!("Anonymous connection closed");
            return;
        };

        let presence = PresenceService::new(state.service_context());

        if !state.registry().has_user(&identity.user_id) {
            if let Err(e) = presence.go_offline(&identity.user_id).await {
                tracing::error!(user_id = %identity.user_id, error = %e, "Failed to mark user offline");
                return;
            }
        }

        match presence.online_users().await {
            Ok(online_users) => {
                state.broadcaster().broadcast(
                    &ServerMessage::UserLeft {
                        username: identity.username,
                        online_users,
                    },
                    None,
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load online users, userLeft skipped");
            }
        }
    }
}
