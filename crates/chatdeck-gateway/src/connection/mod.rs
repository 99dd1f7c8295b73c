//! Connection management
//!
//! Tracks every open WebSocket: its outbound queue and who it belongs to.

mod connection;
mod registry;
mod session;

pub use connection::{Connection, ConnectionId, Frame};
pub use registry::SessionRegistry;
pub use session::{Identity, SessionState};
