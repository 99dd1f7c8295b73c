//! Entity to DTO mappers

use chatdeck_core::entities::{ChatMessage, Memo, User};

use super::responses::{MemoResponse, MessageResponse, UserResponse};

impl From<&ChatMessage> for MessageResponse {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id.clone(),
            content: message.content.clone(),
            username: message.username.clone(),
            channel: message.channel.clone(),
            user_id: message.user_id.clone(),
            timestamp: message.timestamp,
        }
    }
}

impl From<ChatMessage> for MessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            content: message.content,
            username: message.username,
            channel: message.channel,
            user_id: message.user_id,
            timestamp: message.timestamp,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            is_online: user.is_online,
            last_seen: user.last_seen,
        }
    }
}

impl From<Memo> for MemoResponse {
    fn from(memo: Memo) -> Self {
        Self {
            id: memo.id,
            title: memo.title,
            content: memo.content,
            user_id: memo.user_id,
            created_at: memo.created_at,
            updated_at: memo.updated_at,
        }
    }
}
