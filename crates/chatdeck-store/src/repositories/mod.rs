//! In-memory repository implementations

mod memo;
mod message;
mod user;

pub use memo::MemMemoRepository;
pub use message::MemMessageRepository;
pub use user::MemUserRepository;
