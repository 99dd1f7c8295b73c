//! User entity - someone who has joined the chat

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// User id stamped on messages sent by connections that never joined
pub const ANONYMOUS_USER_ID: &str = "anonymous";

/// Maximum username length in characters
pub const MAX_USERNAME_LENGTH: usize = 32;

/// User entity with presence information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub is_online: bool,
    pub last_seen: DateTime<Utc>,
}

impl User {
    /// Create a new user, online as of now
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            is_online: true,
            last_seen: Utc::now(),
        }
    }

    /// Update the online flag and refresh `last_seen`
    pub fn set_online(&mut self, is_online: bool) {
        self.is_online = is_online;
        self.last_seen = Utc::now();
    }

    /// Update the display name
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    /// Reject blank names and names longer than [`MAX_USERNAME_LENGTH`]
    ///
    /// Usernames are not unique and are otherwise kept exactly as sent.
    pub fn validate_username(username: &str) -> Result<(), DomainError> {
        if username.trim().is_empty() {
            return Err(DomainError::InvalidUsername("username is required".to_string()));
        }
        if username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(DomainError::InvalidUsername(format!(
                "username must be at most {MAX_USERNAME_LENGTH} characters"
            )));
        }
        Ok(())
    }
}
