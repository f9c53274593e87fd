//! ReconcileEngine - column model と store の突き合わせ
//!
//! # 責務
//! - drag-move を optimistic に column model へ反映し、その後 store に永続化する
//! - 永続化に失敗したら store から一覧を取り直して model を置き換える（retry はしない）
//! - create / edit / delete は store の canonical な record を受け取ってから model を変更する
//! - model が変わるたびに SyncBus へ publish する
//!
//! # 並行性
//! 全ての操作は `&mut self` を取るので、1 つの engine で同時に走る操作は常に 1 つです。
//! await するのは store 呼び出しだけです。

use tracing::{debug, error, info, warn};

use crate::board::Columns;
use crate::domain::{
    BoardError, BoardEvent, DataIntegrityWarning, Status, Task, TaskDraft, TaskEdit, TaskId,
    TaskRecord,
};
use crate::drag::MoveIntent;
use crate::ports::{DurableSlot, Identity, NoticeSink, StoreError, TaskStore};
use crate::sync::SyncBus;

/// Result of a successful move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: Status, to: Status },
    /// The task already sat in the requested column.
    Unchanged,
}

/// ReconcileEngine は 1 人の identity の board を管理する
///
/// # 使用例
/// ```ignore
/// let mut engine = ReconcileEngine::new(identity, store, bus, notices);
/// engine.load().await?;
/// engine.move_task(task_id, Status::Done).await?;
/// ```
pub struct ReconcileEngine<S, D, N> {
    identity: Identity,
    store: S,
    bus: SyncBus<D>,
    notices: N,
    columns: Columns,
}

impl<S, D, N> ReconcileEngine<S, D, N>
where
    S: TaskStore,
    D: DurableSlot,
    N: NoticeSink,
{
    /// Starts with an empty model. Call [`ReconcileEngine::load`] to fill it.
    pub fn new(identity: Identity, store: S, bus: SyncBus<D>, notices: N) -> Self {
        Self {
            identity,
            store,
            bus,
            notices,
            columns: Columns::new(),
        }
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn bus(&self) -> &SyncBus<D> {
        &self.bus
    }

    /// Replaces the model with the store's collection for this identity.
    ///
    /// Returns the records that had to be placed in `todo` because of a
    /// missing or unknown status. On failure the model is left as it was.
    pub async fn load(&mut self) -> Result<Vec<DataIntegrityWarning>, BoardError> {
        let records = match self.store.list_tasks(&self.identity).await {
            Ok(records) => records,
            Err(err) => return Err(self.store_failure(err, None, BoardEvent::LoadFailed)),
        };
        let partition = Columns::partition(records);
        self.columns = partition.columns;
        info!(user_id = %self.identity.user_id, tasks = self.columns.len(), "board loaded");
        self.publish();
        Ok(partition.warnings)
    }

    /// Moves a task to another column.
    ///
    /// The move is applied and published before the store is called. If the
    /// store rejects it, the whole collection is re-fetched and replaces the
    /// model.
    pub async fn move_task(&mut self, task_id: TaskId, to: Status) -> Result<MoveOutcome, BoardError> {
        // 所属 column は task.status ではなく membership で決める
        let (Some(from), Some(task)) = (self.columns.locate(task_id), self.columns.get(task_id)) else {
            warn!(task_id = %task_id, to = %to, "move requested for unknown task");
            return Err(BoardError::TaskNotFound(task_id));
        };
        if from == to {
            debug!(task_id = %task_id, column = %to, "drop on own column");
            return Ok(MoveOutcome::Unchanged);
        }
        let fields = task.fields_with_status(to);

        let before = self.columns.clone();
        self.columns.relocate(task_id, from, to);
        self.publish();

        match self.store.update_task(&self.identity, task_id, fields).await {
            Ok(_) => {
                info!(task_id = %task_id, from = %from, to = %to, "move persisted");
                self.emit(BoardEvent::TaskMoved { task_id, from, to });
                Ok(MoveOutcome::Moved { from, to })
            }
            Err(err) => {
                warn!(task_id = %task_id, to = %to, error = %err, "move not persisted, re-fetching board");
                self.resync(before).await;
                self.emit(BoardEvent::MoveRolledBack { task_id });
                Err(BoardError::from_store(err, Some(task_id)))
            }
        }
    }

    /// Applies the intent produced by a successful drop.
    pub async fn apply_intent(&mut self, intent: MoveIntent) -> Result<MoveOutcome, BoardError> {
        self.move_task(intent.task_id, intent.to).await
    }

    /// Creates a task and appends the store's record to its column.
    pub async fn create(&mut self, draft: TaskDraft) -> Result<Task, BoardError> {
        draft.validate()?;
        let record = match self.store.create_task(&self.identity, draft).await {
            Ok(record) => record,
            Err(err) => return Err(self.store_failure(err, None, BoardEvent::CreateFailed)),
        };
        let task = self.accept(record);
        info!(task_id = %task.id, column = %task.status, "task created");
        self.columns.push_back(task.clone());
        self.publish();
        self.emit(BoardEvent::TaskCreated { task_id: task.id });
        Ok(task)
    }

    /// Saves an edit. The task keeps its current status.
    pub async fn edit(&mut self, task_id: TaskId, edit: TaskEdit) -> Result<Task, BoardError> {
        edit.validate()?;
        let Some(current) = self.columns.get(task_id) else {
            return Err(self.missing(task_id));
        };
        let fields = edit.into_fields(current.status);
        let record = match self.store.update_task(&self.identity, task_id, fields).await {
            Ok(record) => record,
            Err(err) => {
                return Err(self.store_failure(err, Some(task_id), BoardEvent::UpdateFailed { task_id }));
            }
        };
        let task = self.accept(record);
        self.columns.replace(task.clone());
        info!(task_id = %task_id, "task updated");
        self.publish();
        self.emit(BoardEvent::TaskUpdated { task_id });
        Ok(task)
    }

    pub async fn delete(&mut self, task_id: TaskId) -> Result<(), BoardError> {
        if self.columns.locate(task_id).is_none() {
            return Err(self.missing(task_id));
        }
        if let Err(err) = self.store.delete_task(&self.identity, task_id).await {
            return Err(self.store_failure(err, Some(task_id), BoardEvent::DeleteFailed { task_id }));
        }
        self.columns.remove(task_id);
        info!(task_id = %task_id, "task deleted");
        self.publish();
        self.emit(BoardEvent::TaskDeleted { task_id });
        Ok(())
    }

    /// Re-fetches after a failed move.
    ///
    /// If the re-fetch fails too, the pre-move snapshot is restored.
    async fn resync(&mut self, before: Columns) {
        match self.store.list_tasks(&self.identity).await {
            Ok(records) => {
                self.columns = Columns::partition(records).columns;
            }
            Err(err) => {
                error!(error = %err, "re-fetch failed, restoring pre-move board");
                self.columns = before;
            }
        }
        self.publish();
    }

    /// Converts a record returned by the store, logging a bad status.
    fn accept(&self, record: TaskRecord) -> Task {
        let (task, warning) = Task::from_record(record);
        if let Some(warning) = warning {
            warn!(%warning, "store returned task with unrecognized status");
        }
        task
    }

    fn missing(&self, task_id: TaskId) -> BoardError {
        warn!(task_id = %task_id, "task not on board");
        self.emit(BoardEvent::TaskMissing { task_id });
        BoardError::TaskNotFound(task_id)
    }

    /// Maps a store error. Everything except an auth failure also gets an
    /// error notice; auth failures are a redirect, not a message.
    fn store_failure(&self, err: StoreError, task_id: Option<TaskId>, event: BoardEvent) -> BoardError {
        let err = BoardError::from_store(err, task_id);
        if !matches!(err, BoardError::Unauthorized) {
            error!(error = %err, "store call failed");
            self.emit(event);
        }
        err
    }

    fn publish(&self) {
        if let Err(err) = self.bus.publish(&self.columns) {
            error!(key = %self.bus.key(), error = %err, "failed to publish column model");
        }
    }

    fn emit(&self, event: BoardEvent) {
        self.notices.notify(event.notice());
    }
}
