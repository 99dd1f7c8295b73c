//! Event broadcasting
//!
//! Fans server frames out to the connections in the session registry.

mod broadcaster;

pub use broadcaster::Broadcaster;
