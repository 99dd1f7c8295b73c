//! # chatdeck-api
//!
//! HTTP endpoints built with Axum: chat history, online users, memos and a
//! health probe. The WebSocket gateway mounts this router next to `/ws`.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::create_app;
pub use state::ApiState;
