//! # chatdeck-client
//!
//! Client side of the relay protocol: a socket that reconnects on its own
//! and re-joins after every reconnect, plus the typing indicator debounce.

mod client;
mod error;
mod typing;

pub use client::{ChatClient, ClientConfig, ClientEvent, ClientHandle};
pub use error::{ClientError, ClientResult};
pub use typing::TypingDebouncer;

pub use chatdeck_gateway::protocol::{ClientMessage, ServerMessage};
