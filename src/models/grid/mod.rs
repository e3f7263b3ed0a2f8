//! Fixed-resolution weekly time grid.
//!
//! The grid is always 7 days × 288 five-minute slots. Every cell is either an
//! [`ActivityId`] or `None` (free). Cells hold plain identifiers; the owning
//! plan is responsible for clearing them when an activity goes away.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::models::activity::ActivityId;

pub const DAYS_PER_WEEK: usize = 7;
pub const SLOTS_PER_DAY: usize = 288;
pub const SLOT_MINUTES: u32 = 5;
pub const MINUTES_PER_WEEK: u32 = (DAYS_PER_WEEK * SLOTS_PER_DAY) as u32 * SLOT_MINUTES;

/// Zoom level of the grid view: how many fine slots make up one visual row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Granularity {
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    #[default]
    FifteenMinutes,
    #[serde(rename = "1h")]
    Hour,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [
        Granularity::FiveMinutes,
        Granularity::FifteenMinutes,
        Granularity::Hour,
    ];

    /// Fine slots per visual row.
    pub const fn slots(self) -> usize {
        match self {
            Granularity::FiveMinutes => 1,
            Granularity::FifteenMinutes => 3,
            Granularity::Hour => 12,
        }
    }

    pub const fn rows_per_day(self) -> usize {
        SLOTS_PER_DAY / self.slots()
    }

    /// First fine slot of the aligned block containing `slot`.
    pub const fn block_start(self, slot: usize) -> usize {
        (slot / self.slots()) * self.slots()
    }

    pub fn label(self) -> &'static str {
        match self {
            Granularity::FiveMinutes => "5 min",
            Granularity::FifteenMinutes => "15 min",
            Granularity::Hour => "1 hour",
        }
    }
}

static REVISIONS: AtomicU64 = AtomicU64::new(1);

/// Process-wide revision source shared by grids and registries. Every value
/// is handed out once, so a rebuilt plan never matches a stale cache key.
pub fn next_revision() -> u64 {
    REVISIONS.fetch_add(1, Ordering::Relaxed)
}

/// 7 × 288 matrix of optional activity references.
#[derive(Debug, Clone)]
pub struct TimeGrid {
    days: Vec<Vec<Option<ActivityId>>>,
    revision: u64,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TimeGrid {
    fn eq(&self, other: &Self) -> bool {
        self.days == other.days
    }
}

impl Eq for TimeGrid {}

impl TimeGrid {
    /// Empty grid: every cell free.
    pub fn new() -> Self {
        Self {
            days: vec![vec![None; SLOTS_PER_DAY]; DAYS_PER_WEEK],
            revision: next_revision(),
        }
    }

    /// Build a grid from raw columns. Returns `None` unless the shape is exactly
    /// 7 columns of 288 cells.
    pub fn from_columns(days: Vec<Vec<Option<ActivityId>>>) -> Option<Self> {
        if days.len() != DAYS_PER_WEEK || days.iter().any(|d| d.len() != SLOTS_PER_DAY) {
            return None;
        }
        Some(Self {
            days,
            revision: next_revision(),
        })
    }

    pub fn to_columns(&self) -> Vec<Vec<Option<ActivityId>>> {
        self.days.clone()
    }

    /// Bumped on every mutating call; used to invalidate derived caches.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, day: usize, slot: usize) -> Option<&ActivityId> {
        self.days[day][slot].as_ref()
    }

    pub fn day(&self, day: usize) -> &[Option<ActivityId>] {
        &self.days[day]
    }

    /// All cells, day by day.
    pub fn cells(&self) -> impl Iterator<Item = Option<&ActivityId>> {
        self.days.iter().flat_map(|d| d.iter().map(Option::as_ref))
    }

    /// Writes `value` to `[start_slot, min(288, start_slot + length))` of `day`.
    ///
    /// # Panics
    ///
    /// If `day` or `start_slot` is out of range.
    pub fn write_range(
        &mut self,
        day: usize,
        start_slot: usize,
        length: usize,
        value: Option<&ActivityId>,
    ) {
        assert!(day < DAYS_PER_WEEK, "day index {} out of range", day);
        assert!(start_slot < SLOTS_PER_DAY, "slot index {} out of range", start_slot);

        let end = start_slot.saturating_add(length).min(SLOTS_PER_DAY);
        for cell in &mut self.days[day][start_slot..end] {
            *cell = value.cloned();
        }
        self.revision = next_revision();
    }

    /// Frees every cell holding `id`. Returns how many cells were cleared.
    pub fn clear_activity(&mut self, id: &ActivityId) -> usize {
        let mut cleared = 0;
        for cell in self.days.iter_mut().flat_map(|d| d.iter_mut()) {
            if cell.as_ref() == Some(id) {
                *cell = None;
                cleared += 1;
            }
        }
        self.revision = next_revision();
        cleared
    }

    pub fn count_of(&self, id: &ActivityId) -> usize {
        self.cells().filter(|cell| *cell == Some(id)).count()
    }

    pub fn free_count(&self) -> usize {
        self.cells().filter(Option::is_none).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn id(value: &str) -> ActivityId {
        ActivityId::new(value)
    }

    #[test]
    fn test_new_grid_is_fully_free() {
        let grid = TimeGrid::new();
        assert_eq!(grid.cells().count(), DAYS_PER_WEEK * SLOTS_PER_DAY);
        assert_eq!(grid.free_count(), DAYS_PER_WEEK * SLOTS_PER_DAY);
    }

    #[test]
    fn test_write_range_sets_only_the_range() {
        let mut grid = TimeGrid::new();
        let work = id("work");
        grid.write_range(2, 10, 5, Some(&work));

        for slot in 0..SLOTS_PER_DAY {
            let expected = (10..15).contains(&slot).then_some(&work);
            assert_eq!(grid.get(2, slot), expected, "slot {}", slot);
        }
        assert!(grid.day(1).iter().all(Option::is_none));
        assert!(grid.day(3).iter().all(Option::is_none));
    }

    #[test]
    fn test_write_range_clamps_to_end_of_day() {
        let mut grid = TimeGrid::new();
        let sleep = id("sleep");
        grid.write_range(0, 280, 100, Some(&sleep));
        assert_eq!(grid.count_of(&sleep), 8);
        assert_eq!(grid.get(1, 0), None);
    }

    #[test]
    fn test_write_range_with_none_frees_cells() {
        let mut grid = TimeGrid::new();
        let sleep = id("sleep");
        grid.write_range(4, 0, 12, Some(&sleep));
        grid.write_range(4, 3, 3, None);
        assert_eq!(grid.count_of(&sleep), 9);
        assert_eq!(grid.get(4, 4), None);
    }

    #[test]
    #[should_panic(expected = "day index")]
    fn test_write_range_rejects_bad_day() {
        TimeGrid::new().write_range(7, 0, 1, None);
    }

    #[test]
    #[should_panic(expected = "slot index")]
    fn test_write_range_rejects_bad_slot() {
        TimeGrid::new().write_range(0, SLOTS_PER_DAY, 1, None);
    }

    #[test]
    fn test_clear_activity_frees_all_matching_cells() {
        let mut grid = TimeGrid::new();
        let (a, b) = (id("a"), id("b"));
        grid.write_range(0, 0, 10, Some(&a));
        grid.write_range(6, 100, 10, Some(&a));
        grid.write_range(3, 50, 10, Some(&b));

        assert_eq!(grid.clear_activity(&a), 20);
        assert_eq!(grid.count_of(&a), 0);
        assert_eq!(grid.count_of(&b), 10);
    }

    #[test]
    fn test_revision_bumps_on_mutation() {
        let mut grid = TimeGrid::new();
        let before = grid.revision();
        grid.write_range(0, 0, 1, None);
        assert!(grid.revision() > before);
    }

    #[test]
    fn test_rebuilt_grids_never_share_a_revision() {
        let columns = TimeGrid::new().to_columns();
        let first = TimeGrid::from_columns(columns.clone()).unwrap();
        let second = TimeGrid::from_columns(columns).unwrap();
        assert_eq!(first, second);
        assert_ne!(first.revision(), second.revision());
        assert_ne!(TimeGrid::new().revision(), TimeGrid::new().revision());
    }

    #[test]
    fn test_from_columns_rejects_wrong_shape() {
        assert!(TimeGrid::from_columns(vec![vec![None; SLOTS_PER_DAY]; 6]).is_none());
        let mut days = vec![vec![None; SLOTS_PER_DAY]; DAYS_PER_WEEK];
        days[3].pop();
        assert!(TimeGrid::from_columns(days).is_none());
    }

    #[test_case(Granularity::FiveMinutes, 288; "five minutes")]
    #[test_case(Granularity::FifteenMinutes, 96; "fifteen minutes")]
    #[test_case(Granularity::Hour, 24; "hour")]
    fn test_rows_per_day(granularity: Granularity, rows: usize) {
        assert_eq!(granularity.rows_per_day(), rows);
    }

    #[test_case(Granularity::FiveMinutes, 37, 37)]
    #[test_case(Granularity::FifteenMinutes, 37, 36)]
    #[test_case(Granularity::Hour, 37, 36)]
    #[test_case(Granularity::Hour, 287, 276)]
    fn test_block_start(granularity: Granularity, slot: usize, expected: usize) {
        assert_eq!(granularity.block_start(slot), expected);
    }

    #[test]
    fn test_week_has_10080_minutes() {
        assert_eq!(MINUTES_PER_WEEK, 10080);
    }
}
