//! Task model: the validated domain task, the store's wire record, and the
//! input shapes for create / update / edit.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::{DataIntegrityWarning, ValidationError};
use super::ids::TaskId;

/// Board column a task lives in.
///
/// Serialized as `todo` / `inProgress` / `done`, which is also the key used
/// for each column in the serialized column model.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    /// All columns in board order.
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "inProgress",
            Status::Done => "done",
        }
    }

    /// Human label shown on column headers and badges.
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Status::Todo),
            "inProgress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as the board sees it.
///
/// Only `status` may be changed by a drag-move; everything else goes through
/// an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Full field set for a persistence update, with `status` replaced.
    pub fn fields_with_status(&self, status: Status) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority,
            status,
        }
    }

    /// Converts a store record into a task.
    ///
    /// A missing or unrecognized status is not fatal: the task lands in
    /// `todo` and the anomaly is returned alongside it.
    pub fn from_record(record: TaskRecord) -> (Task, Option<DataIntegrityWarning>) {
        let (status, warning) = match record.status.as_deref().map(str::parse::<Status>) {
            Some(Ok(status)) => (status, None),
            Some(Err(())) | None => (
                Status::Todo,
                Some(DataIntegrityWarning {
                    task_id: record.id,
                    found: record.status.clone(),
                }),
            ),
        };
        let task = Task {
            id: record.id,
            title: record.title,
            description: record.description,
            due_date: record.due_date,
            priority: record.priority.unwrap_or_default(),
            status,
            assignee: record.assignee,
            created_at: record.created_at,
            updated_at: record.updated_at,
        };
        (task, warning)
    }

    /// Case-insensitive match against title, description or priority label.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
            || self.priority.as_str().to_lowercase().contains(&needle)
    }
}

/// The store's view of a task.
///
/// `status` is a free string here: the store is not trusted to only hold the
/// three known values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input of the add-task flow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Status,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)
    }
}

/// Full field set sent with an update. The store overwrites every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub status: Status,
}

/// What the edit form can change. Status is deliberately absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskEdit {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl TaskEdit {
    /// Pre-fills the form from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            priority: task.priority,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)
    }

    pub fn into_fields(self, status: Status) -> TaskFields {
        TaskFields {
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            priority: self.priority,
            status,
        }
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingField("title"));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;
    use ulid::Ulid;

    pub fn task(title: &str, status: Status) -> Task {
        let at = Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap();
        Task {
            id: TaskId::from_ulid(Ulid::new()),
            title: title.to_string(),
            description: None,
            due_date: None,
            priority: Priority::Medium,
            status,
            assignee: None,
            created_at: at,
            updated_at: at,
        }
    }

    pub fn record(title: &str, status: Option<&str>) -> TaskRecord {
        let at = Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap();
        TaskRecord {
            id: TaskId::from_ulid(Ulid::new()),
            title: title.to_string(),
            description: None,
            due_date: None,
            priority: None,
            status: status.map(str::to_string),
            assignee: None,
            created_at: at,
            updated_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{record, task};
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::todo("todo", Status::Todo)]
    #[case::in_progress("inProgress", Status::InProgress)]
    #[case::done("done", Status::Done)]
    fn known_status_converts_without_warning(#[case] raw: &str, #[case] expected: Status) {
        let (task, warning) = Task::from_record(record("A", Some(raw)));
        assert_eq!(task.status, expected);
        assert!(warning.is_none());
    }

    #[rstest]
    #[case::missing(None)]
    #[case::unknown(Some("archived"))]
    #[case::wrong_case(Some("InProgress"))]
    fn bad_status_falls_back_to_todo(#[case] raw: Option<&str>) {
        let rec = record("A", raw);
        let id = rec.id;
        let (task, warning) = Task::from_record(rec);
        assert_eq!(task.status, Status::Todo);
        let warning = warning.expect("warning must be reported");
        assert_eq!(warning.task_id, id);
        assert_eq!(warning.found.as_deref(), raw);
    }

    #[test]
    fn missing_priority_defaults_to_medium() {
        let (task, _) = Task::from_record(record("A", Some("todo")));
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn status_serializes_as_column_key() {
        assert_eq!(serde_json::to_string(&Status::InProgress).unwrap(), "\"inProgress\"");
        let parsed: Status = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(parsed, Status::Done);
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_eq!(
            TaskDraft::new("   ").validate(),
            Err(ValidationError::MissingField("title"))
        );
        assert!(TaskDraft::new("Write design doc").validate().is_ok());
    }

    #[test]
    fn search_matches_title_description_and_priority() {
        let mut t = task("Design login page", Status::Todo);
        t.description = Some("OAuth flow".to_string());
        t.priority = Priority::High;

        assert!(t.matches("LOGIN"));
        assert!(t.matches("oauth"));
        assert!(t.matches("high"));
        assert!(t.matches("  "));
        assert!(!t.matches("database"));
    }

    #[test]
    fn edit_keeps_status_out_of_the_form() {
        let t = task("A", Status::Done);
        let fields = TaskEdit::from_task(&t).into_fields(t.status);
        assert_eq!(fields.status, Status::Done);
        assert_eq!(fields.title, "A");
    }
}
