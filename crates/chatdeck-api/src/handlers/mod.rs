//! Route handlers

pub mod health;
pub mod memos;
pub mod messages;
pub mod users;
