//! InMemoryTaskStore - 開発用・テスト用の task store
//!
//! # 学習ポイント
//! - tokio::sync::Mutex による状態の共有
//! - identity によるスコープ（他人の task は NotFound）
//! - Clock / IdGenerator の注入による決定的なテスト

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{TaskDraft, TaskFields, TaskId, TaskRecord, UserId};
use crate::ports::{Clock, IdGenerator, Identity, StoreError, SystemClock, TaskStore, UlidGenerator};

struct StoredTask {
    owner: UserId,
    record: TaskRecord,
}

/// InMemoryTaskStore は Vec に task を保持するだけの store
///
/// # 実装詳細
/// - 挿入順の Vec で保持し、list 時に created_at の新しい順に並べ替える
/// - 作成時の default: priority = Medium, status = todo
pub struct InMemoryTaskStore<C> {
    tasks: Arc<Mutex<Vec<StoredTask>>>,
    clock: C,
    id_gen: UlidGenerator<C>,
}

impl InMemoryTaskStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InMemoryTaskStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + Clone> InMemoryTaskStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            tasks: Arc::new(Mutex::new(Vec::new())),
            id_gen: UlidGenerator::new(clock.clone()),
            clock,
        }
    }

    /// Inserts a raw record as-is (no defaults, no validation).
    ///
    /// Lets tests and demos plant records the board would never create, such
    /// as an unknown status.
    pub async fn insert_record(&self, owner: UserId, record: TaskRecord) {
        self.tasks.lock().await.push(StoredTask { owner, record });
    }

    pub async fn len(&self) -> usize {
        self.tasks.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl<C: Clock + Clone> TaskStore for InMemoryTaskStore<C> {
    async fn list_tasks(&self, identity: &Identity) -> Result<Vec<TaskRecord>, StoreError> {
        let tasks = self.tasks.lock().await;
        let mut records: Vec<TaskRecord> = tasks
            .iter()
            .rev()
            .filter(|t| t.owner == identity.user_id)
            .map(|t| t.record.clone())
            .collect();
        // stable: equal timestamps keep newest-inserted first
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn create_task(
        &self,
        identity: &Identity,
        draft: TaskDraft,
    ) -> Result<TaskRecord, StoreError> {
        let now = self.clock.now();
        let record = TaskRecord {
            id: self.id_gen.generate_task_id(),
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            priority: Some(draft.priority.unwrap_or_default()),
            status: Some(draft.status.as_str().to_string()),
            assignee: None,
            created_at: now,
            updated_at: now,
        };
        debug!(task_id = %record.id, owner = %identity.user_id, "task stored");
        self.tasks.lock().await.push(StoredTask {
            owner: identity.user_id,
            record: record.clone(),
        });
        Ok(record)
    }

    async fn update_task(
        &self,
        identity: &Identity,
        id: TaskId,
        fields: TaskFields,
    ) -> Result<TaskRecord, StoreError> {
        let mut tasks = self.tasks.lock().await;
        let stored = tasks
            .iter_mut()
            .find(|t| t.record.id == id && t.owner == identity.user_id)
            .ok_or(StoreError::NotFound(id))?;
        let record = &mut stored.record;
        record.title = fields.title;
        record.description = fields.description;
        record.due_date = fields.due_date;
        record.priority = Some(fields.priority);
        record.status = Some(fields.status.as_str().to_string());
        record.updated_at = self.clock.now();
        Ok(record.clone())
    }

    async fn delete_task(&self, identity: &Identity, id: TaskId) -> Result<(), StoreError> {
        let mut tasks = self.tasks.lock().await;
        let index = tasks
            .iter()
            .position(|t| t.record.id == id && t.owner == identity.user_id)
            .ok_or(StoreError::NotFound(id))?;
        tasks.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, Status};
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};
    use ulid::Ulid;

    fn identity() -> Identity {
        Identity::new(UserId::from_ulid(Ulid::new()), "nina@example.com")
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let store = InMemoryTaskStore::new();
        let me = identity();

        let record = store.create_task(&me, TaskDraft::new("Write design doc")).await.unwrap();

        assert_eq!(record.priority, Some(Priority::Medium));
        assert_eq!(record.status.as_deref(), Some("todo"));
        assert!(!record.id.to_string().is_empty());
    }

    #[tokio::test]
    async fn list_is_newest_first_and_scoped() {
        let store = InMemoryTaskStore::new();
        let me = identity();
        let other = identity();

        store.create_task(&me, TaskDraft::new("first")).await.unwrap();
        store.create_task(&other, TaskDraft::new("not mine")).await.unwrap();
        store.create_task(&me, TaskDraft::new("second")).await.unwrap();

        let titles: Vec<String> = store
            .list_tasks(&me)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn other_identity_gets_not_found() {
        let store = InMemoryTaskStore::new();
        let me = identity();
        let other = identity();
        let record = store.create_task(&me, TaskDraft::new("mine")).await.unwrap();

        let fields = TaskFields {
            title: "stolen".into(),
            description: None,
            due_date: None,
            priority: Priority::Low,
            status: Status::Done,
        };
        assert_eq!(
            store.update_task(&other, record.id, fields).await,
            Err(StoreError::NotFound(record.id))
        );
        assert_eq!(
            store.delete_task(&other, record.id).await,
            Err(StoreError::NotFound(record.id))
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn update_overwrites_and_stamps() {
        let created = Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap();
        let store = InMemoryTaskStore::with_clock(FixedClock::new(created));
        let me = identity();
        let record = store.create_task(&me, TaskDraft::new("A")).await.unwrap();

        let updated = store
            .update_task(
                &me,
                record.id,
                TaskFields {
                    title: "A".into(),
                    description: Some("now with text".into()),
                    due_date: None,
                    priority: Priority::High,
                    status: Status::InProgress,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status.as_deref(), Some("inProgress"));
        assert_eq!(updated.priority, Some(Priority::High));
        assert_eq!(updated.updated_at, created);
    }

    #[tokio::test]
    async fn delete_removes() {
        let store = InMemoryTaskStore::new();
        let me = identity();
        let record = store.create_task(&me, TaskDraft::new("A")).await.unwrap();
        store.delete_task(&me, record.id).await.unwrap();
        assert!(store.is_empty().await);
        assert_eq!(
            store.delete_task(&me, record.id).await,
            Err(StoreError::NotFound(record.id))
        );
    }
}
