//! Chat message handler

use chatdeck_service::MessageService;

use crate::connection::ConnectionId;
use crate::protocol::ServerMessage;
use crate::server::GatewayState;

use super::HandlerResult;

pub struct MessageHandler;

impl MessageHandler {
    /// Persist the message, then broadcast `newMessage` to everyone
    /// including the sender
    #[tracing::instrument(skip(state, id, content, username), fields(connection_id = %id))]
    pub async fn handle(
        state: &GatewayState,
        id: &ConnectionId,
        content: &str,
        username: &str,
        channel: Option<String>,
    ) -> HandlerResult<()> {
        let user_id = state.registry().identity(id).map(|identity| identity.user_id);

        let message = MessageService::new(state.service_context())
            .post_message(content, username, channel, user_id.as_deref())
            .await?;

        state
            .broadcaster()
            .broadcast(&ServerMessage::NewMessage { message }, None);
        Ok(())
    }
}
