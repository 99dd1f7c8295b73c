//! Business logic services
//!
//! Services borrow a [`ServiceContext`] for the duration of one call and
//! validate input before touching a repository.

pub mod context;
pub mod error;
pub mod memo;
pub mod message;
pub mod presence;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use memo::MemoService;
pub use message::MessageService;
pub use presence::PresenceService;
