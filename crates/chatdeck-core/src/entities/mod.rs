//! Domain entities - core business objects

mod memo;
mod message;
mod user;

pub use memo::{Memo, MemoChanges};
pub use message::{ChatMessage, DEFAULT_CHANNEL, MAX_CONTENT_LENGTH};
pub use user::{User, ANONYMOUS_USER_ID, MAX_USERNAME_LENGTH};
