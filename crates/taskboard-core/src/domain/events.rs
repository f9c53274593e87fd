//! Events - board で発生した変更と、ユーザーに見せる通知
//!
//! `BoardEvent` は engine の各操作の結果を表し、`Notice` に変換されて
//! NoticeSink（UI の toast 相当）に送られます。

use serde::{Deserialize, Serialize};

use super::ids::TaskId;
use super::task::Status;

/// BoardEvent は engine の操作結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    TaskCreated { task_id: TaskId },
    TaskUpdated { task_id: TaskId },
    TaskDeleted { task_id: TaskId },
    TaskMoved { task_id: TaskId, from: Status, to: Status },
    /// Move の永続化に失敗し、store の内容で model を置き換えた
    MoveRolledBack { task_id: TaskId },
    CreateFailed,
    UpdateFailed { task_id: TaskId },
    DeleteFailed { task_id: TaskId },
    LoadFailed,
    TaskMissing { task_id: TaskId },
}

impl BoardEvent {
    pub fn notice(&self) -> Notice {
        match self {
            BoardEvent::TaskCreated { .. } => Notice::success("Task created successfully"),
            BoardEvent::TaskUpdated { .. } => Notice::success("Task updated successfully"),
            BoardEvent::TaskDeleted { .. } => Notice::success("Task deleted successfully"),
            BoardEvent::TaskMoved { .. } => Notice::success("Status updated"),
            BoardEvent::MoveRolledBack { .. } => Notice::error("Failed to update"),
            BoardEvent::CreateFailed => Notice::error("Failed to create task"),
            BoardEvent::UpdateFailed { .. } => Notice::error("Failed to update task"),
            BoardEvent::DeleteFailed { .. } => Notice::error("Failed to delete task"),
            BoardEvent::LoadFailed => Notice::error("Failed to load tasks"),
            BoardEvent::TaskMissing { .. } => Notice::error("Task not found"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use ulid::Ulid;

    fn id() -> TaskId {
        TaskId::from_ulid(Ulid::new())
    }

    #[rstest]
    #[case::created(BoardEvent::TaskCreated { task_id: id() }, false, "Task created successfully")]
    #[case::moved(BoardEvent::TaskMoved { task_id: id(), from: Status::Todo, to: Status::Done }, false, "Status updated")]
    #[case::rolled_back(BoardEvent::MoveRolledBack { task_id: id() }, true, "Failed to update")]
    #[case::load_failed(BoardEvent::LoadFailed, true, "Failed to load tasks")]
    #[case::missing(BoardEvent::TaskMissing { task_id: id() }, true, "Task not found")]
    fn failures_become_error_notices(#[case] event: BoardEvent, #[case] is_error: bool, #[case] message: &str) {
        let notice = event.notice();
        assert_eq!(notice.is_error(), is_error);
        assert_eq!(notice.message, message);
    }
}
