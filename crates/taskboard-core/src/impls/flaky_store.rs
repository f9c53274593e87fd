//! FlakyTaskStore - 任意の store を包んで障害を注入する
//!
//! 永続化失敗時の rollback（optimistic state の破棄と再取得）を
//! テストやデモで再現するために使います。

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::warn;

use crate::domain::{TaskDraft, TaskFields, TaskId, TaskRecord};
use crate::ports::{Identity, StoreError, TaskStore};

/// Which store calls should fail.
#[derive(Debug, Default)]
struct Faults {
    list: AtomicBool,
    create: AtomicBool,
    update: AtomicBool,
    delete: AtomicBool,
}

pub struct FlakyTaskStore<S> {
    inner: S,
    faults: Faults,
}

impl<S: TaskStore> FlakyTaskStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            faults: Faults::default(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn fail_lists(&self, fail: bool) {
        self.faults.list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_creates(&self, fail: bool) {
        self.faults.create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.faults.update.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.faults.delete.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool, op: &'static str) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            warn!(op, "injected store failure");
            return Err(StoreError::Unavailable(format!("injected {op} failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl<S: TaskStore> TaskStore for FlakyTaskStore<S> {
    async fn list_tasks(&self, identity: &Identity) -> Result<Vec<TaskRecord>, StoreError> {
        Self::check(&self.faults.list, "list")?;
        self.inner.list_tasks(identity).await
    }

    async fn create_task(
        &self,
        identity: &Identity,
        draft: TaskDraft,
    ) -> Result<TaskRecord, StoreError> {
        Self::check(&self.faults.create, "create")?;
        self.inner.create_task(identity, draft).await
    }

    async fn update_task(
        &self,
        identity: &Identity,
        id: TaskId,
        fields: TaskFields,
    ) -> Result<TaskRecord, StoreError> {
        Self::check(&self.faults.update, "update")?;
        self.inner.update_task(identity, id, fields).await
    }

    async fn delete_task(&self, identity: &Identity, id: TaskId) -> Result<(), StoreError> {
        Self::check(&self.faults.delete, "delete")?;
        self.inner.delete_task(identity, id).await
    }
}
