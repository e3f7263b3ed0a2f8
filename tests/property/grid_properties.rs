// Property-based tests for the grid, stroke, aggregation and reorder engines
// Random gestures must never break the structural guarantees
#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::{id, plan_with, row_bounds, ROW_HEIGHT};
use proptest::prelude::*;
use weekly_planner::models::grid::{
    Granularity, TimeGrid, DAYS_PER_WEEK, MINUTES_PER_WEEK, SLOTS_PER_DAY,
};
use weekly_planner::models::plan::Plan;
use weekly_planner::services::aggregation::{classify_row, StripeCell};
use weekly_planner::services::allocation::AllocationSummary;
use weekly_planner::services::paint::{PaintEngine, PointerButton};
use weekly_planner::services::reorder::ReorderEngine;

const NAMES: [&str; 3] = ["A", "B", "C"];

fn granularity() -> impl Strategy<Value = Granularity> {
    prop_oneof![
        Just(Granularity::FiveMinutes),
        Just(Granularity::FifteenMinutes),
        Just(Granularity::Hour),
    ]
}

fn button() -> impl Strategy<Value = PointerButton> {
    prop_oneof![
        3 => Just(PointerButton::Primary),
        1 => Just(PointerButton::Secondary),
    ]
}

/// One stroke: which activity is selected, how it starts, and where it goes.
fn stroke() -> impl Strategy<Value = (usize, PointerButton, Granularity, Vec<(usize, usize)>)> {
    (
        0..NAMES.len(),
        button(),
        granularity(),
        prop::collection::vec((0..DAYS_PER_WEEK, 0..SLOTS_PER_DAY), 1..12),
    )
}

fn painted_plan(strokes: &[(usize, PointerButton, Granularity, Vec<(usize, usize)>)]) -> Plan {
    let mut plan = plan_with(&NAMES);
    let mut paint = PaintEngine::new();
    for (selected, button, g, cells) in strokes {
        plan.select_activity(Some(&id(NAMES[*selected])));
        let (day, slot) = cells[0];
        paint.begin_stroke(&mut plan, day, slot, *button, *g);
        for (day, slot) in &cells[1..] {
            paint.continue_stroke(&mut plan, *day, *slot, *g);
        }
        paint.end_stroke();
    }
    plan
}

proptest! {
    /// Property: a range write touches exactly the clamped range
    #[test]
    fn prop_write_range_is_clamped(
        day in 0..DAYS_PER_WEEK,
        start in 0..SLOTS_PER_DAY,
        length in 0usize..400,
    ) {
        let mut grid = TimeGrid::new();
        grid.write_range(day, start, length, Some(&id("A")));

        let end = (start + length).min(SLOTS_PER_DAY);
        prop_assert_eq!(grid.count_of(&id("A")), end - start);
        for slot in 0..SLOTS_PER_DAY {
            let inside = slot >= start && slot < end;
            prop_assert_eq!(grid.get(day, slot).is_some(), inside);
        }
    }

    /// Property: the allocation always accounts for the whole week
    #[test]
    fn prop_allocation_covers_week(strokes in prop::collection::vec(stroke(), 0..8)) {
        let plan = painted_plan(&strokes);
        let summary = AllocationSummary::compute(&plan);

        prop_assert_eq!(summary.total_minutes, MINUTES_PER_WEEK);
        prop_assert_eq!(summary.allocated_minutes() + summary.free_minutes, MINUTES_PER_WEEK);
        for entry in &summary.entries {
            prop_assert_eq!(entry.minutes as usize, plan.grid().count_of(&entry.activity) * 5);
        }
    }

    /// Property: mixed rows are ordered by count and fill the row exactly
    #[test]
    fn prop_mixed_rows_are_well_formed(
        strokes in prop::collection::vec(stroke(), 1..8),
        view in granularity(),
        day in 0..DAYS_PER_WEEK,
    ) {
        let plan = painted_plan(&strokes);
        for row in 0..view.rows_per_day() {
            if let StripeCell::Mixed { segments, .. } = classify_row(&plan, day, row, view) {
                prop_assert!(segments.len() >= 2);
                prop_assert_eq!(segments.iter().map(|s| s.count).sum::<usize>(), view.slots());
                prop_assert!(segments.windows(2).all(|w| w[0].count >= w[1].count));
                prop_assert!(segments.windows(2).all(|w| w[0].end == w[1].start));
                prop_assert_eq!(segments[0].start, 0.0);
                prop_assert_eq!(segments[segments.len() - 1].end, 1.0);
            }
        }
    }

    /// Property: deleting an activity frees its cells and nothing else
    #[test]
    fn prop_delete_cascades(
        strokes in prop::collection::vec(stroke(), 1..8),
        victim in 0..NAMES.len(),
    ) {
        let mut plan = painted_plan(&strokes);
        let victim = id(NAMES[victim]);
        let others: Vec<_> = NAMES
            .iter()
            .map(|name| id(name))
            .filter(|other| other != &victim)
            .map(|other| (plan.grid().count_of(&other), other))
            .collect();

        plan.delete_activity(&victim);

        prop_assert_eq!(plan.grid().count_of(&victim), 0);
        prop_assert!(!plan.activities().contains(&victim));
        for (count, other) in others {
            prop_assert_eq!(plan.grid().count_of(&other), count);
        }
    }

    /// Property: a finished drag is a single-item move of the dragged row
    #[test]
    fn prop_reorder_moves_one_item(
        len in 1usize..7,
        from_seed in 0usize..7,
        pointer in -10.0f32..150.0,
    ) {
        let names: Vec<String> = (0..len).map(|i| format!("item-{}", i)).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut plan = plan_with(&name_refs);
        let order = plan.activities().ids();
        let from = from_seed % len;
        let dragged = order[from].clone();
        let rows = row_bounds(&order);
        let top = from as f32 * ROW_HEIGHT;

        let mut reorder = ReorderEngine::new();
        prop_assert!(reorder.begin(
            PointerButton::Primary, &order, &dragged, top + 5.0, top, 200.0, ROW_HEIGHT,
        ));
        reorder.update(pointer, &rows);
        reorder.finish(&mut plan);

        let after = plan.activities().ids();
        let mut rest_before = order.clone();
        rest_before.remove(from);
        let mut rest_after = after.clone();
        let to = rest_after.iter().position(|id| id == &dragged).unwrap();
        rest_after.remove(to);

        prop_assert_eq!(after.len(), order.len());
        prop_assert_eq!(rest_after, rest_before);
    }
}
