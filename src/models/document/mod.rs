//! Exchange document: the whole planner state as persisted or exported.
//!
//! The wire shape is camelCase JSON:
//!
//! ```text
//! { version, activePlanId, plans: [ { id, name, activities, grid,
//!   selectedActivityId, tool } ] }
//! ```
//!
//! [`PlannerDocument::validate`] enforces the boundary contract before any of
//! it is adopted; conversion into [`Plan`] values only happens afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::activity::{
    Activity, ActivityIcon, ActivityId, ActivityValidationError, RgbColor,
};
use crate::models::grid::{TimeGrid, DAYS_PER_WEEK, SLOTS_PER_DAY};
use crate::models::plan::{Plan, PlanId, Tool};
use crate::models::registry::ActivityRegistry;

pub const DOCUMENT_VERSION: u32 = 3;

/// Reasons a document is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("document is not valid JSON: {0}")]
    Malformed(String),

    #[error("unsupported document version {0} (newest supported is 3)")]
    UnsupportedVersion(u32),

    #[error("document contains no plans")]
    NoPlans,

    #[error("plan '{plan}' has {found} grid columns, expected 7")]
    GridColumns { plan: String, found: usize },

    #[error("plan '{plan}' day {day} has {found} slots, expected 288")]
    GridSlots {
        plan: String,
        day: usize,
        found: usize,
    },

    #[error("plan '{plan}' lists activity id '{activity}' more than once")]
    DuplicateActivity { plan: String, activity: String },

    #[error("plan id '{0}' appears more than once")]
    DuplicatePlan(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerDocument {
    pub version: u32,
    #[serde(default)]
    pub active_plan_id: Option<String>,
    pub plans: Vec<PlanRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub activities: Vec<ActivityRecord>,
    pub grid: Vec<Vec<Option<String>>>,
    #[serde(default)]
    pub selected_activity_id: Option<String>,
    #[serde(default)]
    pub tool: Tool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub colour: String,
    #[serde(default)]
    pub icon: String,
}

impl PlannerDocument {
    /// Parse and validate in one step.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let document: PlannerDocument =
            serde_json::from_str(json).map_err(|e| DocumentError::Malformed(e.to_string()))?;
        document.validate()?;
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check the structural contract. Nothing about the document is adopted
    /// unless this passes.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.version > DOCUMENT_VERSION {
            return Err(DocumentError::UnsupportedVersion(self.version));
        }
        if self.plans.is_empty() {
            return Err(DocumentError::NoPlans);
        }

        let mut plan_ids = HashSet::new();
        for plan in &self.plans {
            if !plan_ids.insert(plan.id.as_str()) {
                return Err(DocumentError::DuplicatePlan(plan.id.clone()));
            }
            plan.validate()?;
        }
        Ok(())
    }

    pub fn from_plans(plans: &[Plan], active: Option<&PlanId>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            active_plan_id: active.map(|id| id.0.clone()),
            plans: plans.iter().map(PlanRecord::from).collect(),
        }
    }

    /// Convert a validated document into plans plus the resolved active id.
    /// An absent or unknown `activePlanId` resolves to the first plan.
    pub fn into_plans(self) -> Result<(Vec<Plan>, PlanId), DocumentError> {
        self.validate()?;
        let plans = self
            .plans
            .into_iter()
            .map(Plan::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let active = self
            .active_plan_id
            .map(PlanId)
            .filter(|id| plans.iter().any(|p| p.id() == id))
            .unwrap_or_else(|| plans[0].id().clone());

        Ok((plans, active))
    }
}

impl PlanRecord {
    fn validate(&self) -> Result<(), DocumentError> {
        if self.grid.len() != DAYS_PER_WEEK {
            return Err(DocumentError::GridColumns {
                plan: self.name.clone(),
                found: self.grid.len(),
            });
        }
        if let Some((day, column)) = self
            .grid
            .iter()
            .enumerate()
            .find(|(_, column)| column.len() != SLOTS_PER_DAY)
        {
            return Err(DocumentError::GridSlots {
                plan: self.name.clone(),
                day,
                found: column.len(),
            });
        }

        let mut seen = HashSet::new();
        for activity in &self.activities {
            if !seen.insert(activity.id.as_str()) {
                return Err(DocumentError::DuplicateActivity {
                    plan: self.name.clone(),
                    activity: activity.id.clone(),
                });
            }
        }
        Ok(())
    }
}

impl From<&Plan> for PlanRecord {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id().0.clone(),
            name: plan.name.clone(),
            activities: plan.activities().iter().map(ActivityRecord::from).collect(),
            grid: plan
                .grid()
                .to_columns()
                .into_iter()
                .map(|day| day.into_iter().map(|cell| cell.map(|id| id.0)).collect())
                .collect(),
            selected_activity_id: plan.selected_activity().map(|id| id.0.clone()),
            tool: plan.tool(),
        }
    }
}

impl TryFrom<PlanRecord> for Plan {
    type Error = DocumentError;

    fn try_from(record: PlanRecord) -> Result<Self, Self::Error> {
        record.validate()?;

        let PlanRecord {
            id,
            name,
            activities,
            grid,
            selected_activity_id,
            tool,
        } = record;

        let activities: Vec<Activity> = activities.into_iter().map(Activity::from).collect();
        let registry = ActivityRegistry::from_activities(activities).map_err(|err| {
            DocumentError::DuplicateActivity {
                plan: name.clone(),
                activity: match err {
                    ActivityValidationError::DuplicateId(id) => id.0,
                    other => other.to_string(),
                },
            }
        })?;

        let found = grid.len();
        let columns = grid
            .into_iter()
            .map(|day| day.into_iter().map(|cell| cell.map(ActivityId)).collect())
            .collect();
        let grid = TimeGrid::from_columns(columns).ok_or_else(|| DocumentError::GridColumns {
            plan: name.clone(),
            found,
        })?;

        Ok(Plan::from_parts(
            PlanId(id),
            name,
            registry,
            grid,
            selected_activity_id.map(ActivityId),
            tool,
        ))
    }
}

impl From<&Activity> for ActivityRecord {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id.0.clone(),
            name: activity.name.clone(),
            colour: activity.colour.to_hex_string(),
            icon: activity.icon.key().to_string(),
        }
    }
}

impl From<ActivityRecord> for Activity {
    fn from(record: ActivityRecord) -> Self {
        Activity::with_id(
            ActivityId(record.id),
            record.name,
            RgbColor::from_hex_str(&record.colour).unwrap_or(RgbColor::FALLBACK),
            ActivityIcon::from_key(&record.icon),
        )
    }
}
