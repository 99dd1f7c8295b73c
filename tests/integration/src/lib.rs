//! Integration test utilities for the chat relay
//!
//! Spawns the real server on an ephemeral port and drives it over HTTP and
//! WebSocket.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
