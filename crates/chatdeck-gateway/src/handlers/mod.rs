//! Inbound frame handlers
//!
//! Classifies each client frame by its `type` and runs the matching handler.

mod disconnect;
mod error;
mod join;
mod message;
mod typing;

pub use disconnect::DisconnectHandler;
pub use error::{HandlerError, HandlerResult};
pub use join::JoinHandler;
pub use message::MessageHandler;
pub use typing::TypingHandler;

use crate::connection::ConnectionId;
use crate::protocol::ClientMessage;
use crate::server::GatewayState;

/// Dispatch incoming client messages to appropriate handlers
pub struct MessageDispatcher;

impl MessageDispatcher {
    /// Handle one decoded client message
    ///
    /// Holds the gateway event lock until the handler has broadcast.
    pub async fn dispatch(
        state: &GatewayState,
        id: &ConnectionId,
        message: ClientMessage,
    ) -> HandlerResult<()> {
        let _events = state.lock_events().await;
        match message {
            ClientMessage::Join { username, user_id } => {
                JoinHandler::handle(state, id, &username, user_id.as_deref()).await
            }
            ClientMessage::Message {
                content,
                username,
                channel,
            } => MessageHandler::handle(state, id, &content, &username, channel).await,
            ClientMessage::Typing {
                username,
                is_typing,
            } => {
                TypingHandler::handle(state, id, username, is_typing);
                Ok(())
            }
        }
    }

    /// Handle a raw text frame
    ///
    /// Frames that fail to decode are logged and dropped. Handler failures
    /// are reported to the sender as an `error` frame; the connection stays
    /// open either way.
    pub async fn handle_text(state: &GatewayState, id: &ConnectionId, text: &str) {
        let result = match ClientMessage::from_json(text) {
            Ok(message) => {
                tracing::trace!(connection_id = %id, kind = message.kind(), "Received message");
                Self::dispatch(state, id, message).await
            }
            Err(e) => Err(HandlerError::InvalidPayload(e.to_string())),
        };

        let Err(e) = result else {
            return;
        };

        match e.to_error_frame() {
            Some(frame) => {
                if matches!(&e, HandlerError::Service(s) if s.is_storage()) {
                    tracing::error!(connection_id = %id, error = %e, "Storage failure, event dropped");
                } else {
                    tracing::debug!(connection_id = %id, error = %e, "Rejected client message");
                }
                state.broadcaster().send_to(id, &frame);
            }
            None => {
                tracing::debug!(connection_id = %id, error = %e, "Dropped malformed frame");
            }
        }
    }
}
