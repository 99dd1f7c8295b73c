//! Typing indicator handler

use crate::connection::ConnectionId;
use crate::protocol::ServerMessage;
use crate::server::GatewayState;

pub struct TypingHandler;

impl TypingHandler {
    /// Relay to every other connection; nothing is stored
    pub fn handle(state: &GatewayState, id: &ConnectionId, username: String, is_typing: bool) {
        state.broadcaster().broadcast(
            &ServerMessage::UserTyping {
                username,
                is_typing,
            },
            Some(id),
        );
    }
}
