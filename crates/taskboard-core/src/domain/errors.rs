//! Errors - エラー型と分類
//!
//! - `BoardError`: board 操作（move / create / edit / delete / load）の失敗
//! - `ValidationError`: フォーム送信前の入力検証
//! - `DataIntegrityWarning`: partition 時の不正 status（エラーではなく報告）
//! - `ErrorKind`: UI 側での扱いを決める運用分類

use crate::ports::task_store::StoreError;

use super::ids::TaskId;

/// ErrorKind は board エラーの運用分類
///
/// # 分類
/// - Unauthorized: ログイン画面へリダイレクト（メッセージは出さない）
/// - NotFound: 古い参照（move では silent no-op + log）
/// - Validation: フォーム送信をブロック（store には届かない）
/// - Persistence: store 障害（optimistic state の rollback + notice）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    Validation,
    Persistence,
}

/// 入力検証エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// BoardError は board 操作のドメインエラー
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("not signed in")]
    Unauthorized,

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("persistence failed: {0}")]
    PersistenceFailure(#[source] StoreError),
}

impl BoardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::Unauthorized => ErrorKind::Unauthorized,
            BoardError::TaskNotFound(_) => ErrorKind::NotFound,
            BoardError::Validation(_) => ErrorKind::Validation,
            BoardError::PersistenceFailure(_) => ErrorKind::Persistence,
        }
    }

    /// Maps a store error for an operation on `task_id`.
    ///
    /// A store-side `NotFound` means the task is gone (or owned by someone
    /// else), which the board reports the same way as a stale local reference.
    pub fn from_store(err: StoreError, task_id: Option<TaskId>) -> Self {
        match (err, task_id) {
            (StoreError::Unauthorized, _) => BoardError::Unauthorized,
            (StoreError::NotFound(_), Some(id)) => BoardError::TaskNotFound(id),
            (err, _) => BoardError::PersistenceFailure(err),
        }
    }
}

/// Task whose stored status is missing or not one of the three columns.
///
/// The task is kept (placed in `todo`) and this warning is reported instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataIntegrityWarning {
    pub task_id: TaskId,
    pub found: Option<String>,
}

impl std::fmt::Display for DataIntegrityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.found {
            Some(found) => write!(f, "task {} has unrecognized status '{}'", self.task_id, found),
            None => write!(f, "task {} has no status", self.task_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ulid::Ulid;

    #[test]
    fn store_not_found_becomes_task_not_found() {
        let id = TaskId::from_ulid(Ulid::new());
        let err = BoardError::from_store(StoreError::NotFound(id), Some(id));
        assert!(matches!(err, BoardError::TaskNotFound(found) if found == id));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn unavailable_is_a_persistence_failure() {
        let err = BoardError::from_store(StoreError::Unavailable("timeout".into()), None);
        assert_eq!(err.kind(), ErrorKind::Persistence);
    }

    #[test]
    fn store_unauthorized_is_a_redirect() {
        let err = BoardError::from_store(StoreError::Unauthorized, None);
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn warning_mentions_the_bad_value() {
        let id = TaskId::from_ulid(Ulid::new());
        let w = DataIntegrityWarning {
            task_id: id,
            found: Some("archived".into()),
        };
        assert!(w.to_string().contains("archived"));
    }
}
