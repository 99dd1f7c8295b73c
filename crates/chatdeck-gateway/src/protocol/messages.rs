//! Gateway message formats
//!
//! Every frame is a JSON object whose `type` field selects the variant.

use chatdeck_service::dto::{MessageResponse, UserResponse};
use serde::{Deserialize, Serialize};

/// Frames a client sends to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Identify this connection; `userId` is optional
    Join {
        username: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
    /// Post a chat message
    Message {
        content: String,
        username: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        channel: Option<String>,
    },
    /// Typing indicator on/off
    Typing { username: String, is_typing: bool },
}

impl ClientMessage {
    /// Parse a client frame
    ///
    /// # Errors
    /// Malformed JSON, an unknown `type` or a missing required field.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The `type` tag, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Message { .. } => "message",
            Self::Typing { .. } => "typing",
        }
    }
}

/// Frames the server pushes to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    UserJoined {
        username: String,
        online_users: Vec<UserResponse>,
    },
    UserLeft {
        username: String,
        online_users: Vec<UserResponse>,
    },
    NewMessage {
        message: MessageResponse,
    },
    UserTyping {
        username: String,
        is_typing: bool,
    },
    /// Sent only to the connection whose request failed
    Error {
        code: String,
        message: String,
    },
}

impl ServerMessage {
    #[must_use]
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The `type` tag, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserJoined { .. } => "userJoined",
            Self::UserLeft { .. } => "userLeft",
            Self::NewMessage { .. } => "newMessage",
            Self::UserTyping { .. } => "userTyping",
            Self::Error { .. } => "error",
        }
    }
}
