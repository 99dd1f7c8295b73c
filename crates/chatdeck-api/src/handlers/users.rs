//! User handlers

use axum::{extract::State, Json};
use chatdeck_service::{dto::UserResponse, PresenceService};

use crate::response::ApiResult;
use crate::state::ApiState;

/// Users currently online
///
/// GET /api/users/online
pub async fn get_online_users(State(state): State<ApiState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = PresenceService::new(state.service_context());
    Ok(Json(service.online_users().await?))
}
