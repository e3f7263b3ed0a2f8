//! Allocation summary: minutes per activity across the whole week.

use crate::models::activity::{ActivityId, RgbColor};
use crate::models::grid::{MINUTES_PER_WEEK, SLOT_MINUTES};
use crate::models::plan::Plan;

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationEntry {
    pub activity: ActivityId,
    pub name: String,
    pub colour: RgbColor,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationSummary {
    /// One entry per registered activity, in registry order
    pub entries: Vec<AllocationEntry>,
    pub free_minutes: u32,
    pub total_minutes: u32,
}

impl AllocationSummary {
    /// Recompute from the plan's current grid and registry. Cells naming an
    /// id the registry does not know count as free.
    pub fn compute(plan: &Plan) -> Self {
        let registry = plan.activities();
        let mut counts = vec![0u32; registry.len()];
        let mut free = 0u32;

        for cell in plan.grid().cells() {
            match cell.and_then(|id| registry.index_of(id)) {
                Some(index) => counts[index] += 1,
                None => free += 1,
            }
        }

        let entries = registry
            .iter()
            .zip(counts)
            .map(|(activity, count)| AllocationEntry {
                activity: activity.id.clone(),
                name: activity.name.clone(),
                colour: activity.colour,
                minutes: count * SLOT_MINUTES,
            })
            .collect();

        Self {
            entries,
            free_minutes: free * SLOT_MINUTES,
            total_minutes: MINUTES_PER_WEEK,
        }
    }

    pub fn allocated_minutes(&self) -> u32 {
        self.entries.iter().map(|e| e.minutes).sum()
    }

    pub fn minutes_for(&self, id: &ActivityId) -> u32 {
        self.entries
            .iter()
            .find(|e| &e.activity == id)
            .map(|e| e.minutes)
            .unwrap_or(0)
    }

    /// Fraction of the week, in `0.0..=1.0`.
    pub fn share(&self, minutes: u32) -> f32 {
        minutes as f32 / self.total_minutes as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grid::TimeGrid;

    #[test]
    fn test_empty_plan_is_all_free() {
        let plan = Plan::new("Week");
        let summary = AllocationSummary::compute(&plan);
        assert_eq!(summary.free_minutes, 10080);
        assert_eq!(summary.total_minutes, 10080);
        assert_eq!(summary.entries.len(), 5);
        assert!(summary.entries.iter().all(|e| e.minutes == 0));
    }

    #[test]
    fn test_counts_minutes_per_activity() {
        let mut plan = Plan::new("Week");
        let ids = plan.activities().ids();
        plan.grid_mut().write_range(0, 0, 96, Some(&ids[0]));
        plan.grid_mut().write_range(1, 0, 12, Some(&ids[1]));

        let summary = AllocationSummary::compute(&plan);
        assert_eq!(summary.minutes_for(&ids[0]), 480);
        assert_eq!(summary.minutes_for(&ids[1]), 60);
        assert_eq!(summary.minutes_for(&ids[2]), 0);
        assert_eq!(summary.allocated_minutes(), 540);
        assert_eq!(summary.free_minutes, 10080 - 540);
    }

    #[test]
    fn test_entries_follow_registry_order() {
        let plan = Plan::new("Week");
        let summary = AllocationSummary::compute(&plan);
        let ids: Vec<_> = summary.entries.iter().map(|e| e.activity.clone()).collect();
        assert_eq!(ids, plan.activities().ids());
    }

    #[test]
    fn test_unknown_ids_count_as_free() {
        let mut columns = vec![vec![None; 288]; 7];
        columns[2][0] = Some(ActivityId::new("ghost"));
        let plan = crate::models::plan::Plan::from_parts(
            crate::models::plan::PlanId::new("p"),
            "Plan",
            Default::default(),
            TimeGrid::from_columns(columns).unwrap(),
            None,
            Default::default(),
        );
        let summary = AllocationSummary::compute(&plan);
        assert_eq!(summary.free_minutes, 10080);
        assert_eq!(summary.minutes_for(&ActivityId::new("ghost")), 0);
    }

    #[test]
    fn test_share() {
        let summary = AllocationSummary::compute(&Plan::new("Week"));
        assert_eq!(summary.share(5040), 0.5);
    }
}
