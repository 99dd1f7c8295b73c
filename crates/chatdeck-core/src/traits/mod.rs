//! Repository traits (ports)

mod repositories;

pub use repositories::{MemoRepository, MessageRepository, RepoResult, UserRepository};
