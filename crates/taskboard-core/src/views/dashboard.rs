//! Dashboard summary: column counts plus the head of the `todo` column.

use serde::Serialize;

use crate::board::Columns;
use crate::domain::{Status, Task};

/// Number of upcoming tasks shown when none is configured.
pub const DEFAULT_UPCOMING_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    /// First `todo` tasks matching the search, in column order.
    pub upcoming: Vec<Task>,
}

impl Summary {
    /// Counts always cover the whole board; only `upcoming` is filtered.
    pub fn from_columns(columns: &Columns, query: &str, limit: usize) -> Self {
        let upcoming = columns
            .column(Status::Todo)
            .iter()
            .filter(|t| t.matches(query))
            .take(limit)
            .cloned()
            .collect();
        Self {
            todo: columns.column(Status::Todo).len(),
            in_progress: columns.column(Status::InProgress).len(),
            done: columns.column(Status::Done).len(),
            upcoming,
        }
    }

    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.done
    }

    /// Share of tasks in `done`, 0 for an empty board.
    pub fn completion(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.done as f64 / total as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::fixtures::task;

    fn board(todo: usize) -> Columns {
        let mut tasks: Vec<Task> = (0..todo).map(|i| task(&format!("todo {i}"), Status::Todo)).collect();
        tasks.push(task("doing", Status::InProgress));
        tasks.push(task("shipped", Status::Done));
        Columns::from_tasks(tasks)
    }

    #[test]
    fn counts_each_column() {
        let summary = Summary::from_columns(&board(3), "", DEFAULT_UPCOMING_LIMIT);
        assert_eq!((summary.todo, summary.in_progress, summary.done), (3, 1, 1));
        assert_eq!(summary.total(), 5);
        assert!((summary.completion() - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn upcoming_is_capped() {
        let summary = Summary::from_columns(&board(9), "", DEFAULT_UPCOMING_LIMIT);
        assert_eq!(summary.upcoming.len(), 6);
        assert_eq!(summary.upcoming[0].title, "todo 0");
    }

    #[test]
    fn search_narrows_upcoming_but_not_counts() {
        let summary = Summary::from_columns(&board(4), "todo 2", DEFAULT_UPCOMING_LIMIT);
        assert_eq!(summary.todo, 4);
        assert_eq!(summary.upcoming.len(), 1);
        assert_eq!(summary.upcoming[0].title, "todo 2");
    }

    #[test]
    fn empty_board_has_zero_completion() {
        let summary = Summary::from_columns(&Columns::new(), "", DEFAULT_UPCOMING_LIMIT);
        assert_eq!(summary.completion(), 0.0);
        assert!(summary.upcoming.is_empty());
    }
}
