//! TaskStore port - task collection の正本（source of truth）
//!
//! すべての呼び出しは認証済み identity にスコープされます。
//! 他の identity が所有する task への操作は `NotFound` を返し、
//! 存在自体を漏らしません。

use async_trait::async_trait;

use crate::domain::{TaskDraft, TaskFields, TaskId, TaskRecord};
use crate::ports::identity::Identity;

/// StoreError は TaskStore の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("task {0} not found")]
    NotFound(TaskId),

    #[error("unauthorized")]
    Unauthorized,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// TaskStore は task の CRUD を提供
///
/// # 設計原則
/// - 戻り値は store が確定した canonical な record（id, timestamp, default 値を含む）
/// - `list_tasks` は作成日時の新しい順
/// - 排他制御は持たない（last-write-wins）
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list_tasks(&self, identity: &Identity) -> Result<Vec<TaskRecord>, StoreError>;

    /// 新しい task を作成（id と timestamp は store が採番）
    async fn create_task(
        &self,
        identity: &Identity,
        draft: TaskDraft,
    ) -> Result<TaskRecord, StoreError>;

    /// 全フィールドを上書き更新
    async fn update_task(
        &self,
        identity: &Identity,
        id: TaskId,
        fields: TaskFields,
    ) -> Result<TaskRecord, StoreError>;

    async fn delete_task(&self, identity: &Identity, id: TaskId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: TaskStore + ?Sized> TaskStore for std::sync::Arc<S> {
    async fn list_tasks(&self, identity: &Identity) -> Result<Vec<TaskRecord>, StoreError> {
        (**self).list_tasks(identity).await
    }

    async fn create_task(
        &self,
        identity: &Identity,
        draft: TaskDraft,
    ) -> Result<TaskRecord, StoreError> {
        (**self).create_task(identity, draft).await
    }

    async fn update_task(
        &self,
        identity: &Identity,
        id: TaskId,
        fields: TaskFields,
    ) -> Result<TaskRecord, StoreError> {
        (**self).update_task(identity, id, fields).await
    }

    async fn delete_task(&self, identity: &Identity, id: TaskId) -> Result<(), StoreError> {
        (**self).delete_task(identity, id).await
    }
}
