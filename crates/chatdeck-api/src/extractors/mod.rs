//! Axum extractors for request handling

mod history;
mod validated;

pub use history::History;
pub use validated::ValidatedJson;
