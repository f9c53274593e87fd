//! Column model: the three-bucket projection of a task collection.
//!
//! Invariant: every task id appears in exactly one column. Every mutating
//! method keeps the id set unchanged except `push_back` (adds one) and
//! `remove` (removes one).

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{DataIntegrityWarning, Status, Task, TaskId, TaskRecord};

/// Tasks grouped by status.
///
/// Serializes as `{"todo": [...], "inProgress": [...], "done": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Columns {
    #[serde(default)]
    todo: Vec<Task>,
    #[serde(default)]
    in_progress: Vec<Task>,
    #[serde(default)]
    done: Vec<Task>,
}

/// Result of partitioning store records.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub columns: Columns,
    pub warnings: Vec<DataIntegrityWarning>,
}

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the model from already-validated tasks, keeping input order.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut columns = Self::new();
        for task in tasks {
            columns.push_back(task);
        }
        columns
    }

    /// Places every record in the bucket named by its status.
    ///
    /// Records with a missing or unknown status go to `todo` and are reported;
    /// nothing is dropped.
    pub fn partition(records: impl IntoIterator<Item = TaskRecord>) -> Partition {
        let mut partition = Partition::default();
        for record in records {
            let (task, warning) = Task::from_record(record);
            if let Some(warning) = warning {
                warn!(task_id = %warning.task_id, found = ?warning.found, "unrecognized task status, placed in todo");
                partition.warnings.push(warning);
            }
            partition.columns.push_back(task);
        }
        partition
    }

    pub fn column(&self, status: Status) -> &[Task] {
        match status {
            Status::Todo => &self.todo,
            Status::InProgress => &self.in_progress,
            Status::Done => &self.done,
        }
    }

    fn column_mut(&mut self, status: Status) -> &mut Vec<Task> {
        match status {
            Status::Todo => &mut self.todo,
            Status::InProgress => &mut self.in_progress,
            Status::Done => &mut self.done,
        }
    }

    /// Column currently holding `task_id`, by membership scan.
    pub fn locate(&self, task_id: TaskId) -> Option<Status> {
        Status::ALL
            .into_iter()
            .find(|&status| self.column(status).iter().any(|t| t.id == task_id))
    }

    pub fn get(&self, task_id: TaskId) -> Option<&Task> {
        self.iter().find(|t| t.id == task_id)
    }

    /// All tasks in board order (todo, inProgress, done).
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.todo
            .iter()
            .chain(self.in_progress.iter())
            .chain(self.done.iter())
    }

    pub fn ids(&self) -> Vec<TaskId> {
        self.iter().map(|t| t.id).collect()
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a task to the column named by its status.
    pub fn push_back(&mut self, task: Task) {
        self.column_mut(task.status).push(task);
    }

    /// Removes the task from whichever column holds it.
    pub fn remove(&mut self, task_id: TaskId) -> Option<Task> {
        let status = self.locate(task_id)?;
        let column = self.column_mut(status);
        let index = column.iter().position(|t| t.id == task_id)?;
        Some(column.remove(index))
    }

    /// Replaces the entry with the same id.
    ///
    /// Stays in place when the status is unchanged; otherwise the task is
    /// moved to the front of its new column. Returns `false` when absent.
    pub fn replace(&mut self, task: Task) -> bool {
        let Some(current) = self.locate(task.id) else {
            return false;
        };
        if current == task.status {
            let column = self.column_mut(current);
            if let Some(slot) = column.iter_mut().find(|t| t.id == task.id) {
                *slot = task;
            }
        } else {
            self.remove(task.id);
            self.column_mut(task.status).insert(0, task);
        }
        true
    }

    /// Moves `task_id` from `from` to the front of `to`, in place.
    ///
    /// Returns `false` (and changes nothing) when the task is not in `from`.
    /// Same-column moves are a no-op that still returns `true`.
    pub fn relocate(&mut self, task_id: TaskId, from: Status, to: Status) -> bool {
        let source = self.column_mut(from);
        let Some(index) = source.iter().position(|t| t.id == task_id) else {
            warn!(task_id = %task_id, from = %from, "task not in source column, model already inconsistent");
            return false;
        };
        if from == to {
            return true;
        }
        let mut task = source.remove(index);
        task.status = to;
        self.column_mut(to).insert(0, task);
        true
    }

    /// Pure form of [`Columns::relocate`]: returns the moved model.
    pub fn apply_move(&self, task_id: TaskId, from: Status, to: Status) -> Columns {
        let mut next = self.clone();
        next.relocate(task_id, from, to);
        next
    }

    /// Task counts per column in board order.
    pub fn counts(&self) -> [(Status, usize); 3] {
        Status::ALL.map(|status| (status, self.column(status).len()))
    }
}
