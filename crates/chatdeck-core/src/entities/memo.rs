//! Memo entity - a user's personal note

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Memo entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub id: String,
    pub title: String,
    pub content: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to a memo
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Memo {
    /// Create a new memo with a fresh id
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            user_id: user_id.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update; `updated_at` is always bumped
    pub fn apply(&mut self, changes: MemoChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        self.updated_at = Utc::now();
    }
}

impl MemoChanges {
    /// Check if the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}
