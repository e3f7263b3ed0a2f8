// Test fixtures - reusable plans and list geometry
// Shared by the integration and property test crates

#![allow(dead_code)]

use weekly_planner::models::activity::{Activity, ActivityIcon, ActivityId, RgbColor};
use weekly_planner::models::grid::TimeGrid;
use weekly_planner::models::plan::{Plan, PlanId, Tool};
use weekly_planner::models::registry::ActivityRegistry;
use weekly_planner::services::reorder::RowBounds;

/// Height of one activity list row in the reorder tests
pub const ROW_HEIGHT: f32 = 20.0;

pub fn id(value: &str) -> ActivityId {
    ActivityId::new(value)
}

pub fn ids(values: &[&str]) -> Vec<ActivityId> {
    values.iter().map(|value| id(value)).collect()
}

/// A plan whose activities are named after their ids, first one selected.
pub fn plan_with(names: &[&str]) -> Plan {
    let activities = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Activity::with_id(
                id(name),
                *name,
                RgbColor::new((i * 37 % 256) as u8, 100, 200),
                ActivityIcon::Generic,
            )
        })
        .collect();

    Plan::from_parts(
        PlanId::new("plan-fixture"),
        "Fixture week",
        ActivityRegistry::from_activities(activities).expect("fixture ids are unique"),
        TimeGrid::new(),
        names.first().map(|name| id(name)),
        Tool::Paint,
    )
}

/// List rows stacked from y = 0, `ROW_HEIGHT` each.
pub fn row_bounds(order: &[ActivityId]) -> Vec<(ActivityId, RowBounds)> {
    order
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let top = i as f32 * ROW_HEIGHT;
            (id.clone(), RowBounds::new(top, top + ROW_HEIGHT))
        })
        .collect()
}
