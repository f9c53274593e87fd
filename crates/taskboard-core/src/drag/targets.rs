//! Drop target registry and the closest-center collision rule.

use std::collections::BTreeMap;

use crate::domain::Status;

use super::geometry::{Point, Rect};

/// Columns that accept drops, with their on-screen bounds.
#[derive(Debug, Clone, Default)]
pub struct DropTargets {
    targets: BTreeMap<Status, Rect>,
}

impl DropTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or moves) a column's drop region.
    pub fn register(&mut self, column: Status, bounds: Rect) {
        self.targets.insert(column, bounds);
    }

    pub fn unregister(&mut self, column: Status) -> Option<Rect> {
        self.targets.remove(&column)
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Picks the drop column for a release at `at`.
    ///
    /// Regions containing the pointer are candidates; when several overlap,
    /// the one whose center is closest to the pointer wins. With no region
    /// under the pointer the hovered column (tracked by enter/leave) is used.
    pub fn resolve(&self, at: Point, hovered: Option<Status>) -> Option<Status> {
        let closest = self
            .targets
            .iter()
            .filter(|(_, rect)| rect.contains(at))
            .min_by(|(_, a), (_, b)| {
                a.center()
                    .distance_sq(at)
                    .total_cmp(&b.center().distance_sq(at))
            })
            .map(|(&column, _)| column);
        closest.or(hovered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> DropTargets {
        let mut targets = DropTargets::new();
        targets.register(Status::Todo, Rect::new(0.0, 0.0, 100.0, 400.0));
        targets.register(Status::InProgress, Rect::new(110.0, 0.0, 100.0, 400.0));
        targets.register(Status::Done, Rect::new(220.0, 0.0, 100.0, 400.0));
        targets
    }

    #[test]
    fn pointer_inside_one_column() {
        assert_eq!(board().resolve(Point::new(150.0, 30.0), None), Some(Status::InProgress));
    }

    #[test]
    fn overlapping_regions_use_closest_center() {
        let mut targets = DropTargets::new();
        // Done overlaps the right half of InProgress
        targets.register(Status::InProgress, Rect::new(0.0, 0.0, 200.0, 200.0));
        targets.register(Status::Done, Rect::new(100.0, 0.0, 200.0, 200.0));

        // center(InProgress) = (100,100), center(Done) = (200,100)
        assert_eq!(targets.resolve(Point::new(140.0, 100.0), None), Some(Status::InProgress));
        assert_eq!(targets.resolve(Point::new(160.0, 100.0), None), Some(Status::Done));
    }

    #[test]
    fn gap_between_columns_falls_back_to_hovered() {
        let targets = board();
        assert_eq!(targets.resolve(Point::new(105.0, 10.0), Some(Status::Todo)), Some(Status::Todo));
        assert_eq!(targets.resolve(Point::new(105.0, 10.0), None), None);
    }

    #[test]
    fn without_regions_only_hover_counts() {
        let targets = DropTargets::new();
        assert_eq!(targets.resolve(Point::new(1.0, 1.0), Some(Status::Done)), Some(Status::Done));
    }

    #[test]
    fn unregistered_column_stops_matching() {
        let mut targets = board();
        targets.unregister(Status::Done);
        assert_eq!(targets.resolve(Point::new(250.0, 10.0), None), None);
    }
}
