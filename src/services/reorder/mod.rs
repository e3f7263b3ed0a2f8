//! Drag-to-reorder for the activity list.
//!
//! Idle until a primary press lands on a row's drag handle; while dragging,
//! every pointer move recomputes where the row would drop; release applies a
//! single-item move to the registry, cancel discards the gesture.

use crate::models::activity::ActivityId;
use crate::models::plan::Plan;
use crate::services::paint::PointerButton;

/// Vertical extent of one list row in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowBounds {
    pub top: f32,
    pub bottom: f32,
}

impl RowBounds {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    pub fn midpoint(&self) -> f32 {
        (self.top + self.bottom) * 0.5
    }
}

/// Where the dragged row would land, relative to the list without it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsertionPoint {
    Before(ActivityId),
    AfterLast,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorPlacement {
    Above,
    Below,
}

/// Display hint for the drop indicator line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropIndicator {
    pub sibling: ActivityId,
    pub placement: IndicatorPlacement,
}

/// Gesture-scoped state of an active drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub activity: ActivityId,
    pub start_index: usize,
    /// Pointer distance from the dragged row's top edge
    pub grab_offset: f32,
    /// Measured row size, for the drag preview only
    pub row_width: f32,
    pub row_height: f32,
    pub pointer_y: f32,
    pub insertion: InsertionPoint,
}

impl DragSession {
    /// Top edge for a preview that stays anchored under the pointer.
    pub fn preview_top(&self) -> f32 {
        self.pointer_y - self.grab_offset
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
enum ReorderState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Result of a finished drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReorderOutcome {
    Moved { from: usize, to: usize },
    Unchanged,
}

#[derive(Debug, Default)]
pub struct ReorderEngine {
    state: ReorderState,
}

impl ReorderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ReorderState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            ReorderState::Dragging(session) => Some(session),
            ReorderState::Idle => None,
        }
    }

    /// Press on a drag handle. Only a primary press starts a drag, and only
    /// when no drag is running and `activity` is in `order`.
    #[allow(clippy::too_many_arguments)]
    pub fn begin(
        &mut self,
        button: PointerButton,
        order: &[ActivityId],
        activity: &ActivityId,
        pointer_y: f32,
        row_top: f32,
        row_width: f32,
        row_height: f32,
    ) -> bool {
        if button != PointerButton::Primary || self.is_dragging() {
            return false;
        }
        let Some(start_index) = order.iter().position(|id| id == activity) else {
            return false;
        };

        // Until the pointer moves the row drops back where it came from.
        let insertion = match order.get(start_index + 1) {
            Some(next) => InsertionPoint::Before(next.clone()),
            None => InsertionPoint::AfterLast,
        };

        log::debug!("Reorder drag started for {} at index {}", activity, start_index);
        self.state = ReorderState::Dragging(DragSession {
            activity: activity.clone(),
            start_index,
            grab_offset: pointer_y - row_top,
            row_width,
            row_height,
            pointer_y,
            insertion,
        });
        true
    }

    /// Pointer moved. `rows` lists every row in display order, the dragged one
    /// included. Returns the indicator hint, if there is a sibling to attach to.
    pub fn update(
        &mut self,
        pointer_y: f32,
        rows: &[(ActivityId, RowBounds)],
    ) -> Option<DropIndicator> {
        let ReorderState::Dragging(session) = &mut self.state else {
            return None;
        };

        let remaining: Vec<&(ActivityId, RowBounds)> = rows
            .iter()
            .filter(|(id, _)| id != &session.activity)
            .collect();

        session.pointer_y = pointer_y;
        session.insertion = remaining
            .iter()
            .find(|(_, bounds)| bounds.midpoint() > pointer_y)
            .map(|(id, _)| InsertionPoint::Before(id.clone()))
            .unwrap_or(InsertionPoint::AfterLast);

        Self::indicator_for(&session.insertion, &remaining)
    }

    /// Current indicator hint without a pointer update.
    pub fn indicator(&self, rows: &[(ActivityId, RowBounds)]) -> Option<DropIndicator> {
        let session = self.session()?;
        let remaining: Vec<&(ActivityId, RowBounds)> = rows
            .iter()
            .filter(|(id, _)| id != &session.activity)
            .collect();
        Self::indicator_for(&session.insertion, &remaining)
    }

    fn indicator_for(
        insertion: &InsertionPoint,
        remaining: &[&(ActivityId, RowBounds)],
    ) -> Option<DropIndicator> {
        match insertion {
            InsertionPoint::Before(sibling) => Some(DropIndicator {
                sibling: sibling.clone(),
                placement: IndicatorPlacement::Above,
            }),
            InsertionPoint::AfterLast => remaining.last().map(|(id, _)| DropIndicator {
                sibling: id.clone(),
                placement: IndicatorPlacement::Below,
            }),
        }
    }

    /// Release: apply the drop to the plan's activity order.
    pub fn finish(&mut self, plan: &mut Plan) -> Option<ReorderOutcome> {
        let ReorderState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };

        let order = plan.activities().ids();
        let Some(from) = order.iter().position(|id| id == &session.activity) else {
            log::warn!("Dragged activity {} vanished before drop", session.activity);
            return Some(ReorderOutcome::Unchanged);
        };

        let Some(to) = resolve_target(&order, from, &session.insertion) else {
            return Some(ReorderOutcome::Unchanged);
        };
        if to == from {
            return Some(ReorderOutcome::Unchanged);
        }

        plan.activities_mut().move_item(from, to);
        log::info!(
            "Moved activity {} from position {} to {}",
            session.activity,
            from,
            to
        );
        Some(ReorderOutcome::Moved { from, to })
    }

    /// Abort the drag without touching the order.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        if was_dragging {
            log::debug!("Reorder drag cancelled");
        }
        self.state = ReorderState::Idle;
        was_dragging
    }
}

/// Map an insertion point back to an index in the original order: the slot
/// the target sibling occupies once the dragged item has been lifted out.
pub fn resolve_target(order: &[ActivityId], from: usize, insertion: &InsertionPoint) -> Option<usize> {
    match insertion {
        InsertionPoint::AfterLast => order.len().checked_sub(1),
        InsertionPoint::Before(sibling) => {
            let index = order.iter().position(|id| id == sibling)?;
            Some(if index > from { index - 1 } else { index })
        }
    }
}
