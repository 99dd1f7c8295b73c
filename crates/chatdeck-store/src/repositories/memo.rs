//! In-memory implementation of MemoRepository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::instrument;

use chatdeck_core::entities::{Memo, MemoChanges};
use chatdeck_core::traits::{MemoRepository, RepoResult};

#[derive(Debug, Default)]
pub struct MemMemoRepository {
    memos: RwLock<HashMap<String, Memo>>,
}

impl MemMemoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemoRepository for MemMemoRepository {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Memo>> {
        Ok(self.memos.read().get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Memo>> {
        let mut memos: Vec<Memo> = self
            .memos
            .read()
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();

        memos.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(memos)
    }

    #[instrument(skip(self, memo), fields(memo_id = %memo.id))]
    async fn create(&self, memo: &Memo) -> RepoResult<()> {
        self.memos.write().insert(memo.id.clone(), memo.clone());
        Ok(())
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: &str, changes: MemoChanges) -> RepoResult<Option<Memo>> {
        let mut memos = self.memos.write();
        Ok(memos.get_mut(id).map(|memo| {
            memo.apply(changes);
            memo.clone()
        }))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> RepoResult<bool> {
        Ok(self.memos.write().remove(id).is_some())
    }
}
