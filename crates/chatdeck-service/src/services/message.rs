//! Message service
//!
//! Validates and stores chat messages and reads channel history.

use tracing::{info, instrument};

use chatdeck_core::entities::{ChatMessage, User, ANONYMOUS_USER_ID, DEFAULT_CHANNEL};
use chatdeck_core::DomainError;
use chatdeck_core::MAX_CONTENT_LENGTH;

use crate::dto::{HistoryQuery, MessageResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store a new chat message
    ///
    /// Messages from connections that never joined are attributed to
    /// `"anonymous"`; a missing or blank channel means `"general"`.
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    pub async fn post_message(
        &self,
        content: &str,
        username: &str,
        channel: Option<String>,
        user_id: Option<&str>,
    ) -> ServiceResult<MessageResponse> {
        User::validate_username(username)?;

        let message = ChatMessage::new(
            content,
            username,
            channel,
            user_id.unwrap_or(ANONYMOUS_USER_ID),
        );
        if message.is_empty() {
            return Err(DomainError::ValidationError("message content is required".to_string()).into());
        }
        if message.is_too_long() {
            return Err(DomainError::ContentTooLong {
                max: MAX_CONTENT_LENGTH,
            }
            .into());
        }

        self.ctx.message_repo().create(&message).await?;
        info!(message_id = %message.id, channel = %message.channel, "Message created");

        Ok(MessageResponse::from(message))
    }

    /// Most recent messages of a channel, oldest first
    #[instrument(skip(self))]
    pub async fn recent_messages(&self, query: HistoryQuery) -> ServiceResult<Vec<MessageResponse>> {
        let channel = query
            .channel
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CHANNEL);
        let limit = self.ctx.history().resolve_limit(query.limit);

        let messages = self.ctx.message_repo().find_by_channel(channel, limit).await?;
        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }
}
