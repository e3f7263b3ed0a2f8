//! Ordered activity list owned by a plan.

use crate::models::activity::{Activity, ActivityEdit, ActivityId, ActivityValidationError};
use crate::models::grid::next_revision;

/// Ordered sequence of activities with unique ids.
///
/// Order only matters for list display and reordering; it has no bearing on
/// grid contents.
#[derive(Debug, Clone)]
pub struct ActivityRegistry {
    activities: Vec<Activity>,
    revision: u64,
}

impl PartialEq for ActivityRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.activities == other.activities
    }
}

impl Eq for ActivityRegistry {}

impl Default for ActivityRegistry {
    fn default() -> Self {
        Self {
            activities: Vec::new(),
            revision: next_revision(),
        }
    }
}

impl ActivityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, rejecting duplicate ids.
    pub fn from_activities(activities: Vec<Activity>) -> Result<Self, ActivityValidationError> {
        let mut registry = Self::new();
        for activity in activities {
            registry.push(activity)?;
        }
        registry.revision = next_revision();
        Ok(registry)
    }

    /// Bumped on every mutation; used to invalidate derived caches.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    pub fn as_slice(&self) -> &[Activity] {
        &self.activities
    }

    pub fn ids(&self) -> Vec<ActivityId> {
        self.activities.iter().map(|a| a.id.clone()).collect()
    }

    pub fn get(&self, id: &ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| &a.id == id)
    }

    pub fn contains(&self, id: &ActivityId) -> bool {
        self.get(id).is_some()
    }

    pub fn index_of(&self, id: &ActivityId) -> Option<usize> {
        self.activities.iter().position(|a| &a.id == id)
    }

    /// Append an activity.
    pub fn push(&mut self, activity: Activity) -> Result<(), ActivityValidationError> {
        if self.contains(&activity.id) {
            return Err(ActivityValidationError::DuplicateId(activity.id));
        }
        self.activities.push(activity);
        self.revision = next_revision();
        Ok(())
    }

    pub fn update(
        &mut self,
        id: &ActivityId,
        edit: ActivityEdit,
    ) -> Result<bool, ActivityValidationError> {
        let Some(activity) = self.activities.iter_mut().find(|a| &a.id == id) else {
            return Ok(false);
        };
        edit.apply_to(activity)?;
        self.revision = next_revision();
        Ok(true)
    }

    /// Remove an activity, returning it with its former index. Callers must
    /// clear grid references first.
    pub(crate) fn remove(&mut self, id: &ActivityId) -> Option<(usize, Activity)> {
        let index = self.index_of(id)?;
        let removed = self.activities.remove(index);
        self.revision = next_revision();
        Some((index, removed))
    }

    /// Single-item move: remove at `from`, insert at `to`.
    pub(crate) fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.activities.len() || to >= self.activities.len() {
            return false;
        }
        let activity = self.activities.remove(from);
        self.activities.insert(to, activity);
        self.revision = next_revision();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::{ActivityIcon, RgbColor};

    fn activity(id: &str) -> Activity {
        Activity::with_id(ActivityId::new(id), id.to_uppercase(), RgbColor::FALLBACK, ActivityIcon::Generic)
    }

    fn names(registry: &ActivityRegistry) -> Vec<String> {
        registry.iter().map(|a| a.id.to_string()).collect()
    }

    #[test]
    fn test_push_rejects_duplicate_id() {
        let mut registry = ActivityRegistry::new();
        registry.push(activity("a")).unwrap();
        let err = registry.push(activity("a")).unwrap_err();
        assert_eq!(err, ActivityValidationError::DuplicateId(ActivityId::new("a")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_from_activities_rejects_duplicates() {
        assert!(ActivityRegistry::from_activities(vec![activity("a"), activity("a")]).is_err());
    }

    #[test]
    fn test_move_item_forward_and_backward() {
        let mut registry =
            ActivityRegistry::from_activities(vec![activity("a"), activity("b"), activity("c")])
                .unwrap();
        assert!(registry.move_item(0, 2));
        assert_eq!(names(&registry), ["b", "c", "a"]);
        assert!(registry.move_item(2, 0));
        assert_eq!(names(&registry), ["a", "b", "c"]);
        assert!(!registry.move_item(1, 1));
        assert!(!registry.move_item(0, 3));
    }

    #[test]
    fn test_update_unknown_id_is_not_an_error() {
        let mut registry = ActivityRegistry::new();
        let updated = registry
            .update(&ActivityId::new("missing"), ActivityEdit::default())
            .unwrap();
        assert!(!updated);
    }

    #[test]
    fn test_remove_reports_index() {
        let mut registry =
            ActivityRegistry::from_activities(vec![activity("a"), activity("b")]).unwrap();
        let revision = registry.revision();
        let (index, removed) = registry.remove(&ActivityId::new("b")).unwrap();
        assert_eq!(index, 1);
        assert_eq!(removed.id, ActivityId::new("b"));
        assert!(registry.revision() > revision);
    }
}
