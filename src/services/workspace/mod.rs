//! Workspace: every plan the person has, plus which one is active.
//!
//! Owns plan CRUD and whole-document import/export. Imports are
//! all-or-nothing: a document that fails validation leaves the workspace as
//! it was.

use thiserror::Error;

use crate::models::document::{DocumentError, PlannerDocument};
use crate::models::plan::{Plan, PlanId};

pub const DEFAULT_PLAN_NAME: &str = "My week";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("no plan with id '{0}'")]
    UnknownPlan(PlanId),

    #[error("plan name cannot be empty")]
    EmptyName,

    #[error("cannot delete the only plan")]
    LastPlan,

    #[error(transparent)]
    Document(#[from] DocumentError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    plans: Vec<Plan>,
    active: PlanId,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new_default()
    }
}

impl Workspace {
    /// A workspace holding one freshly seeded plan.
    pub fn new_default() -> Self {
        let plan = Plan::new(DEFAULT_PLAN_NAME);
        let active = plan.id().clone();
        Self {
            plans: vec![plan],
            active,
        }
    }

    /// Adopt a validated document.
    pub fn from_document(document: PlannerDocument) -> Result<Self, DocumentError> {
        let (plans, active) = document.into_plans()?;
        Ok(Self { plans, active })
    }

    pub fn to_document(&self) -> PlannerDocument {
        PlannerDocument::from_plans(&self.plans, Some(&self.active))
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn active_plan_id(&self) -> &PlanId {
        &self.active
    }

    pub fn plan(&self, id: &PlanId) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id() == id)
    }

    pub fn active_plan(&self) -> &Plan {
        // `active` always names a plan in `plans`; `plans` is never empty.
        self.plans
            .iter()
            .find(|p| p.id() == &self.active)
            .unwrap_or(&self.plans[0])
    }

    pub fn active_plan_mut(&mut self) -> &mut Plan {
        let index = self.index_of(&self.active).unwrap_or(0);
        &mut self.plans[index]
    }

    pub fn set_active(&mut self, id: &PlanId) -> Result<(), WorkspaceError> {
        self.index_of(id)
            .ok_or_else(|| WorkspaceError::UnknownPlan(id.clone()))?;
        self.active = id.clone();
        Ok(())
    }

    /// Create a new seeded plan and make it active.
    pub fn create_plan(&mut self, name: &str) -> Result<PlanId, WorkspaceError> {
        let name = checked_name(name)?;
        let plan = Plan::new(name);
        let id = plan.id().clone();
        log::info!("Created plan '{}' ({})", plan.name, id);
        self.plans.push(plan);
        self.active = id.clone();
        Ok(id)
    }

    pub fn rename_plan(&mut self, id: &PlanId, name: &str) -> Result<(), WorkspaceError> {
        let name = checked_name(name)?;
        let index = self
            .index_of(id)
            .ok_or_else(|| WorkspaceError::UnknownPlan(id.clone()))?;
        self.plans[index].name = name.to_string();
        log::info!("Renamed plan {} to '{}'", id, name);
        Ok(())
    }

    /// Copy a plan under a fresh id, keep its activity ids, and make the copy
    /// active. The copy is inserted right after the original.
    pub fn duplicate_plan(&mut self, id: &PlanId) -> Result<PlanId, WorkspaceError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| WorkspaceError::UnknownPlan(id.clone()))?;
        let mut copy = self.plans[index].clone();
        copy.set_id(PlanId::generate());
        copy.name = format!("{} (copy)", copy.name);
        let copy_id = copy.id().clone();
        log::info!("Duplicated plan {} as '{}'", id, copy.name);
        self.plans.insert(index + 1, copy);
        self.active = copy_id.clone();
        Ok(copy_id)
    }

    /// Delete a plan. The last remaining plan cannot be deleted. Deleting the
    /// active plan activates its neighbour.
    pub fn delete_plan(&mut self, id: &PlanId) -> Result<Plan, WorkspaceError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| WorkspaceError::UnknownPlan(id.clone()))?;
        if self.plans.len() == 1 {
            return Err(WorkspaceError::LastPlan);
        }
        let removed = self.plans.remove(index);
        if removed.id() == &self.active {
            let next = index.min(self.plans.len() - 1);
            self.active = self.plans[next].id().clone();
        }
        log::info!("Deleted plan '{}'", removed.name);
        Ok(removed)
    }

    /// Replace the whole workspace from exchange JSON. On any error the
    /// workspace is unchanged.
    pub fn import_json(&mut self, json: &str) -> Result<(), WorkspaceError> {
        let document = PlannerDocument::from_json(json).map_err(|err| {
            log::warn!("Rejected planner document: {}", err);
            err
        })?;
        let imported = Self::from_document(document)?;
        log::info!("Imported {} plan(s)", imported.plans.len());
        *self = imported;
        Ok(())
    }

    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        self.to_document().to_json()
    }

    fn index_of(&self, id: &PlanId) -> Option<usize> {
        self.plans.iter().position(|p| p.id() == id)
    }
}

fn checked_name(name: &str) -> Result<&str, WorkspaceError> {
    let name = name.trim();
    if name.is_empty() {
        Err(WorkspaceError::EmptyName)
    } else {
        Ok(name)
    }
}
