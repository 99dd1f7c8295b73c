//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, memos, messages, users};
use crate::state::ApiState;

/// All HTTP routes
pub fn create_router() -> Router<ApiState> {
    Router::new()
        .nest("/api", api_routes())
        .merge(health_routes())
}

pub fn health_routes() -> Router<ApiState> {
    Router::new().route("/health", get(health::health_check))
}

fn api_routes() -> Router<ApiState> {
    Router::new()
        .route("/messages", get(messages::get_messages))
        .route("/users/online", get(users::get_online_users))
        .merge(memo_routes())
}

/// Memo routes
///
/// `GET /memos/:id` takes a user id while `PUT`/`DELETE` take a memo id;
/// axum requires one parameter name per path segment.
fn memo_routes() -> Router<ApiState> {
    Router::new().route("/memos", post(memos::create_memo)).route(
        "/memos/:id",
        get(memos::get_user_memos)
            .put(memos::update_memo)
            .delete(memos::delete_memo),
    )
}
