//! Search filter shared by the board, dashboard and calendar.

use crate::board::Columns;
use crate::domain::Task;

/// Tasks matching `query` (title, description or priority label, ignoring
/// case), in input order. A blank query matches everything.
pub fn filter<'a>(tasks: impl IntoIterator<Item = &'a Task>, query: &str) -> Vec<&'a Task> {
    tasks.into_iter().filter(|t| t.matches(query)).collect()
}

/// Same filter applied column by column, keeping each column's order.
pub fn filter_columns(columns: &Columns, query: &str) -> Columns {
    Columns::from_tasks(columns.iter().filter(|t| t.matches(query)).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::fixtures::task;
    use crate::domain::{Priority, Status};
    use rstest::rstest;

    fn board() -> Vec<Task> {
        let mut report = task("Quarterly report", Status::Todo);
        report.description = Some("numbers for finance".into());
        let mut groceries = task("Groceries", Status::Done);
        groceries.priority = Priority::High;
        vec![report, groceries, task("Call mom", Status::InProgress)]
    }

    #[rstest]
    #[case::title("REPORT", vec!["Quarterly report"])]
    #[case::description("finance", vec!["Quarterly report"])]
    #[case::priority("high", vec!["Groceries"])]
    #[case::blank("   ", vec!["Quarterly report", "Groceries", "Call mom"])]
    #[case::nothing("dentist", vec![])]
    fn filters_by_title_description_or_priority(#[case] query: &str, #[case] expected: Vec<&str>) {
        let tasks = board();
        let titles: Vec<&str> = filter(&tasks, query).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn column_filter_keeps_placement() {
        let columns = Columns::from_tasks(board());
        let filtered = filter_columns(&columns, "o");
        assert_eq!(filtered.column(Status::Done).len(), 1);
        assert_eq!(filtered.column(Status::InProgress).len(), 1);
        assert_eq!(filtered.len(), 3);
    }
}
