//! Domain model (IDs, tasks, errors, events).

pub mod errors;
pub mod events;
pub mod ids;
pub mod task;

pub use self::errors::{BoardError, DataIntegrityWarning, ErrorKind, ValidationError};
pub use self::events::{BoardEvent, Notice, NoticeLevel};
pub use self::ids::{DragToken, TaskId, UserId};
pub use self::task::{Priority, Status, Task, TaskDraft, TaskEdit, TaskFields, TaskRecord};
