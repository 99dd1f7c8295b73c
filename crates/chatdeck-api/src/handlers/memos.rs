//! Memo handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chatdeck_service::dto::{CreateMemoRequest, DeleteMemoResponse, MemoResponse, UpdateMemoRequest};
use chatdeck_service::MemoService;

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::ApiState;

/// Create memo
///
/// POST /api/memos
pub async fn create_memo(
    State(state): State<ApiState>,
    ValidatedJson(request): ValidatedJson<CreateMemoRequest>,
) -> ApiResult<Created<Json<MemoResponse>>> {
    let service = MemoService::new(state.service_context());
    let memo = service.create(request).await?;
    Ok(Created(Json(memo)))
}

/// A user's memos, most recently updated first
///
/// GET /api/memos/{user_id}
pub async fn get_user_memos(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<MemoResponse>>> {
    let service = MemoService::new(state.service_context());
    Ok(Json(service.list_for_user(&user_id).await?))
}

/// Update memo
///
/// PUT /api/memos/{memo_id}
pub async fn update_memo(
    State(state): State<ApiState>,
    Path(memo_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateMemoRequest>,
) -> ApiResult<Json<MemoResponse>> {
    let service = MemoService::new(state.service_context());
    Ok(Json(service.update(&memo_id, request).await?))
}

/// Delete memo
///
/// DELETE /api/memos/{memo_id}
pub async fn delete_memo(
    State(state): State<ApiState>,
    Path(memo_id): Path<String>,
) -> ApiResult<Json<DeleteMemoResponse>> {
    let service = MemoService::new(state.service_context());
    service.delete(&memo_id).await?;
    Ok(Json(DeleteMemoResponse::deleted()))
}
