//! # chatdeck-gateway
//!
//! WebSocket relay: tracks open sockets, classifies inbound frames and fans
//! events out to every connected client. Serves the HTTP API on the same port.

pub mod broadcast;
pub mod connection;
pub mod handlers;
pub mod protocol;
pub mod server;

pub use server::{create_app, create_gateway_state, run, serve, shutdown_signal, GatewayState};
