//! # chatdeck-service
//!
//! Application layer: presence, chat history and memo use cases, plus the
//! request/response DTOs shared by the HTTP and WebSocket surfaces.

pub mod dto;
pub mod services;

pub use services::{
    MemoService, MessageService, PresenceService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
