//! Test fixtures and data generators
//!
//! Protocol frames and request bodies as raw JSON, so tests exercise the
//! wire format rather than the Rust types.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub fn unique_user_id() -> String {
    format!("user-{}", unique_suffix())
}

pub fn join_frame(username: &str, user_id: Option<&str>) -> Value {
    match user_id {
        Some(id) => json!({"type": "join", "username": username, "userId": id}),
        None => json!({"type": "join", "username": username}),
    }
}

pub fn message_frame(content: &str, username: &str, channel: Option<&str>) -> Value {
    let mut frame = json!({"type": "message", "content": content, "username": username});
    if let Some(channel) = channel {
        frame["channel"] = json!(channel);
    }
    frame
}

pub fn typing_frame(username: &str, is_typing: bool) -> Value {
    json!({"type": "typing", "username": username, "isTyping": is_typing})
}

pub fn memo_body(title: &str, content: &str, user_id: Option<&str>) -> Value {
    let mut body = json!({"title": title, "content": content});
    if let Some(user_id) = user_id {
        body["userId"] = json!(user_id);
    }
    body
}
