//! Gateway protocol definitions
//!
//! JSON text frames tagged by `type`, camelCase fields.

mod messages;

pub use messages::{ClientMessage, ServerMessage};
