//! Chat history handlers

use axum::{extract::State, Json};
use chatdeck_service::{dto::MessageResponse, MessageService};

use crate::extractors::History;
use crate::response::ApiResult;
use crate::state::ApiState;

/// Recent messages of a channel, oldest first
///
/// GET /api/messages?channel=&limit=
pub async fn get_messages(
    State(state): State<ApiState>,
    History(query): History,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let messages = service.recent_messages(query).await?;
    Ok(Json(messages))
}
