//! Drag payload: the task snapshot carried by one gesture.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Priority, Task, TaskId};

/// Media type a foreign surface uses when it hands the payload over as text.
pub const PAYLOAD_MEDIA_TYPE: &str = "application/taskboard-section";

/// Snapshot of a task taken at drag start. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    #[serde(alias = "id")]
    pub task_id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub priority: Priority,
}

impl DragPayload {
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            assignee: task.assignee.clone(),
            priority: task.priority,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Reads a text handover, ignoring media types other than [`PAYLOAD_MEDIA_TYPE`].
    pub fn from_transfer(media_type: &str, raw: &str) -> Result<Option<Self>, serde_json::Error> {
        if media_type != PAYLOAD_MEDIA_TYPE {
            return Ok(None);
        }
        Self::from_json(raw).map(Some)
    }

    /// Parses a payload handed over by another surface.
    ///
    /// Extra fields (a full serialized task, for instance) are ignored.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use crate::domain::task::fixtures::task;

    #[test]
    fn full_task_json_is_accepted_as_payload() {
        let mut t = task("Setup database", Status::Todo);
        t.priority = Priority::High;
        let raw = serde_json::to_string(&t).unwrap();

        let payload = DragPayload::from_json(&raw).unwrap();
        assert_eq!(payload, DragPayload::from_task(&t));
    }

    #[test]
    fn foreign_media_type_is_skipped() {
        let t = task("Setup database", Status::Todo);
        let raw = DragPayload::from_task(&t).to_json().unwrap();

        assert_eq!(DragPayload::from_transfer("text/plain", &raw).unwrap(), None);
        assert_eq!(
            DragPayload::from_transfer(PAYLOAD_MEDIA_TYPE, &raw).unwrap(),
            Some(DragPayload::from_task(&t))
        );
        assert!(DragPayload::from_transfer(PAYLOAD_MEDIA_TYPE, "not json").is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(DragPayload::from_json("{\"title\": 1}").is_err());
    }
}
