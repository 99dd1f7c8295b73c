//! Chat message entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Channel used when a message does not name one
pub const DEFAULT_CHANNEL: &str = "general";

/// Maximum message content length in characters
pub const MAX_CONTENT_LENGTH: usize = 2000;

/// A chat message posted to a channel
///
/// Messages are immutable once created. Within a channel they are ordered by
/// insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub username: String,
    pub channel: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new message with a fresh id, stamped now
    ///
    /// A blank channel falls back to [`DEFAULT_CHANNEL`].
    pub fn new(
        content: impl Into<String>,
        username: impl Into<String>,
        channel: Option<String>,
        user_id: impl Into<String>,
    ) -> Self {
        let channel = channel
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CHANNEL.to_string());

        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            username: username.into(),
            channel,
            user_id: user_id.into(),
            timestamp: Utc::now(),
        }
    }

    /// Check if the message belongs to the given channel
    #[inline]
    pub fn is_in(&self, channel: &str) -> bool {
        self.channel == channel
    }

    /// Check if the content is blank
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Check if the content exceeds [`MAX_CONTENT_LENGTH`]
    pub fn is_too_long(&self) -> bool {
        self.content.chars().count() > MAX_CONTENT_LENGTH
    }
}
