//! Calendar month grid.
//!
//! 6 行 × 7 列（日曜始まり）の固定レイアウト。前月末・翌月頭の日付で埋めます。

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::domain::Task;
use crate::ports::Clock;

pub const WEEKS: usize = 6;
pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid month: {year}-{month}")]
pub struct InvalidMonth {
    pub year: i32,
    pub month: u32,
}

/// One month of the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    first: NaiveDate,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> Result<Self, InvalidMonth> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(InvalidMonth { year, month })
    }

    /// Month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// Month containing the clock's today.
    pub fn current(clock: &impl Clock) -> Self {
        Self::containing(clock.today())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Header label such as `February 2026`.
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// Previous month. Stays put at the lower end of the date range.
    pub fn prev(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// Next month. Stays put at the upper end of the date range.
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// Sunday on or before the first of the month: the top-left cell.
    fn grid_start(&self) -> NaiveDate {
        let lead = self.first.weekday().num_days_from_sunday();
        self.first
            .checked_sub_days(Days::new(u64::from(lead)))
            .unwrap_or(self.first)
    }

    /// 42 consecutive days, row by row.
    pub fn weeks(&self) -> [[NaiveDate; DAYS_PER_WEEK]; WEEKS] {
        let start = self.grid_start();
        std::array::from_fn(|week| {
            std::array::from_fn(|day| {
                let offset = (week * DAYS_PER_WEEK + day) as u64;
                start.checked_add_days(Days::new(offset)).unwrap_or(NaiveDate::MAX)
            })
        })
    }

    pub fn in_month(&self, date: NaiveDate) -> bool {
        date.year() == self.first.year() && date.month() == self.first.month()
    }

    pub fn is_today(&self, date: NaiveDate, clock: &impl Clock) -> bool {
        date == clock.today()
    }

    /// Tasks grouped by due date. Tasks without one are skipped.
    pub fn events_by_day<'a>(
        tasks: impl IntoIterator<Item = &'a Task>,
    ) -> BTreeMap<NaiveDate, Vec<&'a Task>> {
        let mut days: BTreeMap<NaiveDate, Vec<&'a Task>> = BTreeMap::new();
        for task in tasks {
            if let Some(due) = task.due_date {
                days.entry(due).or_default().push(task);
            }
        }
        days
    }

    /// Like [`MonthGrid::events_by_day`], restricted to this month.
    pub fn events_in_month<'a>(
        &self,
        tasks: impl IntoIterator<Item = &'a Task>,
    ) -> BTreeMap<NaiveDate, Vec<&'a Task>> {
        let mut days = Self::events_by_day(tasks);
        days.retain(|date, _| self.in_month(*date));
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use crate::domain::task::fixtures::task;
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc, Weekday};
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case::starts_midweek(2026, 10)]
    #[case::starts_on_sunday(2026, 2)]
    #[case::ends_on_saturday(2026, 1)]
    #[case::leap_february(2028, 2)]
    fn grid_is_six_sunday_first_weeks(#[case] year: i32, #[case] month: u32) {
        let grid = MonthGrid::new(year, month).unwrap();
        let weeks = grid.weeks();

        assert_eq!(weeks[0][0].weekday(), Weekday::Sun);
        assert!(weeks[0].contains(&date(year, month, 1)));
        let flat: Vec<NaiveDate> = weeks.iter().flatten().copied().collect();
        assert!(flat.windows(2).all(|w| w[1] == w[0].succ_opt().unwrap()));
        let days_in_month = flat.iter().filter(|d| grid.in_month(**d)).count();
        let month_len = grid.next().first_day() - grid.first_day();
        assert_eq!(days_in_month as i64, month_len.num_days());
    }

    #[test]
    fn october_2026_has_leading_september_days() {
        // 2026-10-01 is a Thursday
        let weeks = MonthGrid::new(2026, 10).unwrap().weeks();
        assert_eq!(weeks[0][0], date(2026, 9, 27));
        assert_eq!(weeks[5][6], date(2026, 11, 7));
    }

    #[test]
    fn navigation_wraps_years() {
        let jan = MonthGrid::new(2026, 1).unwrap();
        assert_eq!((jan.prev().year(), jan.prev().month()), (2025, 12));
        assert_eq!(jan.prev().next(), jan);
        assert_eq!(MonthGrid::new(2025, 12).unwrap().next(), jan);
    }

    #[test]
    fn rejects_bad_month() {
        assert_eq!(MonthGrid::new(2026, 13), Err(InvalidMonth { year: 2026, month: 13 }));
    }

    #[test]
    fn today_comes_from_the_clock() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap());
        let grid = MonthGrid::current(&clock);
        assert_eq!(grid.title(), "October 2026");
        assert!(grid.is_today(date(2026, 10, 19), &clock));
        assert!(!grid.is_today(date(2026, 10, 20), &clock));
    }

    #[test]
    fn events_grouped_by_due_date() {
        let mut a = task("A", Status::Todo);
        a.due_date = Some(date(2026, 10, 3));
        let mut b = task("B", Status::Done);
        b.due_date = Some(date(2026, 10, 3));
        let mut c = task("C", Status::Todo);
        c.due_date = Some(date(2026, 11, 1));
        let undated = task("D", Status::Todo);
        let tasks = vec![a, b, c, undated];

        let all = MonthGrid::events_by_day(&tasks);
        assert_eq!(all.len(), 2);
        assert_eq!(all[&date(2026, 10, 3)].len(), 2);

        let october = MonthGrid::new(2026, 10).unwrap().events_in_month(&tasks);
        assert_eq!(october.keys().copied().collect::<Vec<_>>(), vec![date(2026, 10, 3)]);
    }
}
