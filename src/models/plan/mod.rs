//! A named weekly plan: one grid, one activity registry, the current
//! selection and the configured tool.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::models::activity::{
    default_activities, Activity, ActivityEdit, ActivityIcon, ActivityId,
    ActivityValidationError, RgbColor,
};
use crate::models::grid::TimeGrid;
use crate::models::registry::ActivityRegistry;

static NEXT_PLAN_SUFFIX: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(pub String);

impl PlanId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix = NEXT_PLAN_SUFFIX.fetch_add(1, Ordering::Relaxed);
        Self(format!("plan-{:x}-{}", millis, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a primary-button stroke does to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Paint,
    Erase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    id: PlanId,
    pub name: String,
    grid: TimeGrid,
    activities: ActivityRegistry,
    selected: Option<ActivityId>,
    tool: Tool,
}

impl Plan {
    /// A fresh plan seeded with the default activities, the first one selected.
    pub fn new(name: impl Into<String>) -> Self {
        let activities = default_activities();
        let selected = activities.first().map(|a| a.id.clone());
        let activities = ActivityRegistry::from_activities(activities).unwrap_or_default();
        Self {
            id: PlanId::generate(),
            name: name.into(),
            grid: TimeGrid::new(),
            activities,
            selected,
            tool: Tool::Paint,
        }
    }

    /// A plan with no activities and an empty grid.
    pub fn empty(id: PlanId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            grid: TimeGrid::new(),
            activities: ActivityRegistry::new(),
            selected: None,
            tool: Tool::Paint,
        }
    }

    /// Assemble a plan from already-validated parts. A selection that does not
    /// name a registered activity is dropped.
    pub fn from_parts(
        id: PlanId,
        name: impl Into<String>,
        activities: ActivityRegistry,
        grid: TimeGrid,
        selected: Option<ActivityId>,
        tool: Tool,
    ) -> Self {
        let selected = selected.filter(|id| activities.contains(id));
        Self {
            id,
            name: name.into(),
            grid,
            activities,
            selected,
            tool,
        }
    }

    pub fn id(&self) -> &PlanId {
        &self.id
    }

    /// Only the workspace hands out plan ids, so it alone may change one.
    pub(crate) fn set_id(&mut self, id: PlanId) {
        self.id = id;
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut TimeGrid {
        &mut self.grid
    }

    pub fn activities(&self) -> &ActivityRegistry {
        &self.activities
    }

    pub(crate) fn activities_mut(&mut self) -> &mut ActivityRegistry {
        &mut self.activities
    }

    pub fn selected_activity(&self) -> Option<&ActivityId> {
        self.selected.as_ref()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Select an activity, or clear the selection with `None`. Unknown ids are
    /// ignored and leave the selection unchanged.
    pub fn select_activity(&mut self, id: Option<&ActivityId>) -> bool {
        match id {
            None => {
                self.selected = None;
                true
            }
            Some(id) if self.activities.contains(id) => {
                self.selected = Some(id.clone());
                true
            }
            Some(_) => false,
        }
    }

    /// Create and append a new activity.
    pub fn add_activity(
        &mut self,
        name: &str,
        colour: RgbColor,
        icon: ActivityIcon,
    ) -> Result<ActivityId, ActivityValidationError> {
        let activity = Activity::new(name.trim(), colour, icon);
        activity.validate()?;
        let id = activity.id.clone();
        self.activities.push(activity)?;
        if self.selected.is_none() {
            self.selected = Some(id.clone());
        }
        Ok(id)
    }

    pub fn update_activity(
        &mut self,
        id: &ActivityId,
        edit: ActivityEdit,
    ) -> Result<bool, ActivityValidationError> {
        self.activities.update(id, edit)
    }

    /// Delete an activity. Grid cells holding it are freed before it leaves the
    /// registry; a selection pointing at it moves to the activity now at the
    /// same position (or the new last one), or `None` when nothing is left.
    pub fn delete_activity(&mut self, id: &ActivityId) -> Option<Activity> {
        if !self.activities.contains(id) {
            return None;
        }

        let cleared = self.grid.clear_activity(id);
        let (index, removed) = self.activities.remove(id)?;
        log::info!(
            "Deleted activity '{}' from plan '{}' ({} cells freed)",
            removed.name,
            self.name,
            cleared
        );

        if self.selected.as_ref() == Some(id) {
            let slice = self.activities.as_slice();
            self.selected = slice
                .get(index)
                .or_else(|| slice.last())
                .map(|a| a.id.clone());
        }

        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_with(ids: &[&str]) -> Plan {
        let activities = ids
            .iter()
            .map(|id| Activity::with_id(ActivityId::new(*id), *id, RgbColor::FALLBACK, ActivityIcon::Generic))
            .collect();
        Plan::from_parts(
            PlanId::new("p"),
            "Plan",
            ActivityRegistry::from_activities(activities).unwrap(),
            TimeGrid::new(),
            ids.first().map(|id| ActivityId::new(*id)),
            Tool::Paint,
        )
    }

    #[test]
    fn test_new_plan_selects_first_default_activity() {
        let plan = Plan::new("Week");
        assert_eq!(plan.activities().len(), 5);
        assert_eq!(
            plan.selected_activity(),
            Some(&plan.activities().as_slice()[0].id)
        );
        assert_eq!(plan.tool(), Tool::Paint);
    }

    #[test]
    fn test_id_is_fixed_at_construction() {
        let plan = plan_with(&["a"]);
        assert_eq!(plan.id(), &PlanId::new("p"));
        assert_ne!(Plan::new("One").id(), Plan::new("Two").id());
    }

    #[test]
    fn test_from_parts_drops_dangling_selection() {
        let plan = Plan::from_parts(
            PlanId::new("p"),
            "Plan",
            ActivityRegistry::new(),
            TimeGrid::new(),
            Some(ActivityId::new("ghost")),
            Tool::Erase,
        );
        assert_eq!(plan.selected_activity(), None);
    }

    #[test]
    fn test_delete_activity_cascades_to_grid() {
        let mut plan = plan_with(&["a", "b"]);
        let a = ActivityId::new("a");
        let b = ActivityId::new("b");
        plan.grid_mut().write_range(0, 0, 50, Some(&a));
        plan.grid_mut().write_range(5, 0, 50, Some(&b));

        let removed = plan.delete_activity(&a).unwrap();
        assert_eq!(removed.id, a);
        assert_eq!(plan.grid().count_of(&a), 0);
        assert_eq!(plan.grid().count_of(&b), 50);
        assert!(!plan.activities().contains(&a));
    }

    #[test]
    fn test_delete_selected_moves_selection_to_neighbour() {
        let mut plan = plan_with(&["a", "b", "c"]);
        plan.select_activity(Some(&ActivityId::new("b")));
        plan.delete_activity(&ActivityId::new("b"));
        assert_eq!(plan.selected_activity(), Some(&ActivityId::new("c")));

        plan.delete_activity(&ActivityId::new("c"));
        assert_eq!(plan.selected_activity(), Some(&ActivityId::new("a")));

        plan.delete_activity(&ActivityId::new("a"));
        assert_eq!(plan.selected_activity(), None);
    }

    #[test]
    fn test_delete_unselected_keeps_selection() {
        let mut plan = plan_with(&["a", "b"]);
        plan.delete_activity(&ActivityId::new("b"));
        assert_eq!(plan.selected_activity(), Some(&ActivityId::new("a")));
    }

    #[test]
    fn test_delete_unknown_activity_is_noop() {
        let mut plan = plan_with(&["a"]);
        assert!(plan.delete_activity(&ActivityId::new("zzz")).is_none());
        assert_eq!(plan.activities().len(), 1);
    }

    #[test]
    fn test_select_unknown_activity_is_ignored() {
        let mut plan = plan_with(&["a"]);
        assert!(!plan.select_activity(Some(&ActivityId::new("zzz"))));
        assert_eq!(plan.selected_activity(), Some(&ActivityId::new("a")));
        assert!(plan.select_activity(None));
        assert_eq!(plan.selected_activity(), None);
    }

    #[test]
    fn test_add_activity_validates_and_selects_when_empty() {
        let mut plan = plan_with(&[]);
        assert!(plan.add_activity("  ", RgbColor::FALLBACK, ActivityIcon::Generic).is_err());
        let id = plan
            .add_activity(" Reading ", RgbColor::FALLBACK, ActivityIcon::Study)
            .unwrap();
        assert_eq!(plan.activities().get(&id).unwrap().name, "Reading");
        assert_eq!(plan.selected_activity(), Some(&id));
    }
}
