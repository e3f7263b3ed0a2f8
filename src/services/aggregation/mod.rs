//! Stripe computation: collapsing fine slots into visual rows.
//!
//! For a zoom level `g`, visual row `v` of a day covers fine slots
//! `[v*g, v*g+g)`. A row is free, a single activity, or mixed; mixed rows get
//! proportional segments ordered by count, ties kept in first-seen order.

use std::collections::HashMap;

use crate::models::activity::{ActivityIcon, ActivityId, RgbColor};
use crate::models::grid::{Granularity, DAYS_PER_WEEK, SLOT_MINUTES};
use crate::models::plan::{Plan, PlanId};
use crate::utils::time::format_minutes;

pub const FREE_LABEL: &str = "Free";

/// One proportional band of a mixed row.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// `None` for the synthetic free segment
    pub activity: Option<ActivityId>,
    pub label: String,
    pub colour: Option<RgbColor>,
    pub count: usize,
    /// Left edge as a fraction of the row width
    pub start: f32,
    /// Right edge as a fraction of the row width
    pub end: f32,
}

impl Segment {
    pub fn minutes(&self) -> u32 {
        self.count as u32 * SLOT_MINUTES
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StripeCell {
    Free,
    Single {
        activity: ActivityId,
        name: String,
        colour: RgbColor,
        icon: ActivityIcon,
    },
    Mixed {
        segments: Vec<Segment>,
        tooltip: String,
    },
}

impl StripeCell {
    pub fn is_free(&self) -> bool {
        matches!(self, StripeCell::Free)
    }
}

/// Classify visual row `row` of `day` at zoom level `granularity`.
///
/// Grid ids the registry does not know are counted as free.
pub fn classify_row(plan: &Plan, day: usize, row: usize, granularity: Granularity) -> StripeCell {
    let g = granularity.slots();
    let start = row * g;
    let cells = &plan.grid().day(day)[start..start + g];
    let registry = plan.activities();

    // (id, count) in first-encountered order
    let mut tallies: Vec<(&ActivityId, usize)> = Vec::new();
    let mut free = 0usize;
    for cell in cells {
        match cell.as_ref().filter(|id| registry.contains(id)) {
            None => free += 1,
            Some(id) => match tallies.iter_mut().find(|(seen, _)| *seen == id) {
                Some((_, count)) => *count += 1,
                None => tallies.push((id, 1)),
            },
        }
    }

    if tallies.is_empty() {
        return StripeCell::Free;
    }

    if tallies.len() == 1 && free == 0 {
        let (id, _) = tallies[0];
        if let Some(activity) = registry.get(id) {
            return StripeCell::Single {
                activity: id.clone(),
                name: activity.name.clone(),
                colour: activity.colour,
                icon: activity.icon,
            };
        }
    }

    let mut segments: Vec<Segment> = tallies
        .into_iter()
        .filter_map(|(id, count)| {
            let activity = registry.get(id)?;
            Some(Segment {
                activity: Some(id.clone()),
                label: activity.name.clone(),
                colour: Some(activity.colour),
                count,
                start: 0.0,
                end: 0.0,
            })
        })
        .collect();
    if free > 0 {
        segments.push(Segment {
            activity: None,
            label: FREE_LABEL.to_string(),
            colour: None,
            count: free,
            start: 0.0,
            end: 0.0,
        });
    }

    // Stable: equal counts keep first-encountered order.
    segments.sort_by(|a, b| b.count.cmp(&a.count));

    let mut cumulative = 0usize;
    for segment in &mut segments {
        segment.start = cumulative as f32 / g as f32;
        cumulative += segment.count;
        segment.end = cumulative as f32 / g as f32;
    }

    let tooltip = segments
        .iter()
        .filter(|s| s.count > 0)
        .map(|s| format!("{}: {}", s.label, format_minutes(s.minutes())))
        .collect::<Vec<_>>()
        .join("\n");

    StripeCell::Mixed { segments, tooltip }
}

/// Every visual row of one day, top to bottom.
pub fn classify_day(plan: &Plan, day: usize, granularity: Granularity) -> Vec<StripeCell> {
    (0..granularity.rows_per_day())
        .map(|row| classify_row(plan, day, row, granularity))
        .collect()
}

/// Memoizes row classifications for one plan.
///
/// Entries are dropped wholesale whenever the plan id, the grid revision or
/// the registry revision differs from the state they were computed from.
/// Granularity is part of the key.
#[derive(Debug, Default)]
pub struct StripeCache {
    source: Option<(PlanId, u64, u64)>,
    entries: HashMap<(usize, usize, Granularity), StripeCell>,
}

impl StripeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn invalidate(&mut self) {
        self.source = None;
        self.entries.clear();
    }

    pub fn get(&mut self, plan: &Plan, day: usize, row: usize, granularity: Granularity) -> &StripeCell {
        let source = (
            plan.id().clone(),
            plan.grid().revision(),
            plan.activities().revision(),
        );
        if self.source.as_ref() != Some(&source) {
            self.entries.clear();
            self.source = Some(source);
        }

        self.entries
            .entry((day, row, granularity))
            .or_insert_with(|| classify_row(plan, day, row, granularity))
    }

    /// All rows for the whole week: `result[day][row]`.
    pub fn week(&mut self, plan: &Plan, granularity: Granularity) -> Vec<Vec<StripeCell>> {
        let mut week = Vec::with_capacity(DAYS_PER_WEEK);
        for day in 0..DAYS_PER_WEEK {
            let mut rows = Vec::with_capacity(granularity.rows_per_day());
            for row in 0..granularity.rows_per_day() {
                rows.push(self.get(plan, day, row, granularity).clone());
            }
            week.push(rows);
        }
        week
    }
}
