//! Memo service
//!
//! Personal notes, owned by a user id. There is no ownership check: any
//! caller can edit or delete any memo by id.

use tracing::{info, instrument};
use validator::Validate;

use chatdeck_core::entities::{Memo, MemoChanges, ANONYMOUS_USER_ID};

use crate::dto::{CreateMemoRequest, MemoResponse, UpdateMemoRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Memo service
pub struct MemoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemoService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateMemoRequest) -> ServiceResult<MemoResponse> {
        request.validate()?;

        let user_id = request
            .user_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS_USER_ID.to_string());
        let memo = Memo::new(request.title, request.content, user_id);

        self.ctx.memo_repo().create(&memo).await?;
        info!(memo_id = %memo.id, user_id = %memo.user_id, "Memo created");

        Ok(MemoResponse::from(memo))
    }

    /// A user's memos, most recently updated first
    pub async fn list_for_user(&self, user_id: &str) -> ServiceResult<Vec<MemoResponse>> {
        let memos = self.ctx.memo_repo().find_by_user(user_id).await?;
        Ok(memos.into_iter().map(MemoResponse::from).collect())
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: &str, request: UpdateMemoRequest) -> ServiceResult<MemoResponse> {
        request.validate()?;

        let memo = self
            .ctx
            .memo_repo()
            .update(id, MemoChanges::from(request))
            .await?
            .ok_or_else(|| ServiceError::not_found("Memo", id))?;

        info!(memo_id = %memo.id, "Memo updated");
        Ok(MemoResponse::from(memo))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        if !self.ctx.memo_repo().delete(id).await? {
            return Err(ServiceError::not_found("Memo", id));
        }

        info!(memo_id = %id, "Memo deleted");
        Ok(())
    }
}
