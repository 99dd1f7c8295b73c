//! In-memory implementation of MessageRepository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::instrument;

use chatdeck_core::entities::ChatMessage;
use chatdeck_core::traits::{MessageRepository, RepoResult};

/// Chat history, one append-only list per channel
#[derive(Debug, Default)]
pub struct MemMessageRepository {
    channels: RwLock<HashMap<String, Vec<ChatMessage>>>,
}

impl MemMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored messages across channels
    pub fn len(&self) -> usize {
        self.channels.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MessageRepository for MemMessageRepository {
    #[instrument(skip(self, message), fields(message_id = %message.id, channel = %message.channel))]
    async fn create(&self, message: &ChatMessage) -> RepoResult<()> {
        self.channels
            .write()
            .entry(message.channel.clone())
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn find_by_channel(&self, channel: &str, limit: usize) -> RepoResult<Vec<ChatMessage>> {
        let channels = self.channels.read();
        let Some(history) = channels.get(channel) else {
            return Ok(Vec::new());
        };

        let start = history.len().saturating_sub(limit);
        Ok(history[start..].to_vec())
    }
}
