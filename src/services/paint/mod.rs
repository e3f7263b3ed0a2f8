//! Paint strokes: turning a pointer gesture into grid range-writes.
//!
//! A stroke starts on press, continues as the pointer enters new cells and
//! ends on release or when the pointer leaves the grid. Every write covers a
//! whole aligned block of the current zoom level.

use crate::models::grid::Granularity;
use crate::models::plan::{Plan, Tool};

/// Pointer button that started a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// One aligned block of fine slots in a day column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CoarseCell {
    pub day: usize,
    pub block_start: usize,
    pub granularity: Granularity,
}

impl CoarseCell {
    pub fn containing(day: usize, slot: usize, granularity: Granularity) -> Self {
        Self {
            day,
            block_start: granularity.block_start(slot),
            granularity,
        }
    }
}

/// Gesture-scoped state of an active stroke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrokeContext {
    /// Tool resolved at press time; fixed for the whole stroke
    pub mode: Tool,
    pub button: PointerButton,
    pub last_cell: Option<CoarseCell>,
    pub writes: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum StrokeState {
    #[default]
    Idle,
    Active(StrokeContext),
}

#[derive(Debug, Default)]
pub struct PaintEngine {
    state: StrokeState,
}

impl PaintEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, StrokeState::Active(_))
    }

    pub fn active(&self) -> Option<&StrokeContext> {
        match &self.state {
            StrokeState::Active(ctx) => Some(ctx),
            StrokeState::Idle => None,
        }
    }

    /// Start a stroke and paint the cell under the pointer. The secondary
    /// button always erases for the duration of the stroke; the plan's own
    /// tool is left untouched. Starting while a stroke is active restarts it.
    pub fn begin_stroke(
        &mut self,
        plan: &mut Plan,
        day: usize,
        slot: usize,
        button: PointerButton,
        granularity: Granularity,
    ) {
        let mode = match button {
            PointerButton::Secondary => Tool::Erase,
            _ => plan.tool(),
        };
        log::debug!(
            "Stroke begin: day {} slot {} button {:?} mode {:?}",
            day,
            slot,
            button,
            mode
        );

        self.state = StrokeState::Active(StrokeContext {
            mode,
            button,
            last_cell: None,
            writes: 0,
        });
        self.paint_cell(plan, day, slot, granularity);
    }

    /// Paint the cell the pointer just entered. Re-entering the cell painted
    /// last is suppressed. Returns whether a write happened.
    pub fn continue_stroke(
        &mut self,
        plan: &mut Plan,
        day: usize,
        slot: usize,
        granularity: Granularity,
    ) -> bool {
        self.paint_cell(plan, day, slot, granularity)
    }

    /// Finish the stroke. Release and pointer-leave both land here.
    pub fn end_stroke(&mut self) -> Option<StrokeContext> {
        match std::mem::take(&mut self.state) {
            StrokeState::Active(ctx) => {
                log::debug!("Stroke end: {} writes", ctx.writes);
                Some(ctx)
            }
            StrokeState::Idle => None,
        }
    }

    fn paint_cell(
        &mut self,
        plan: &mut Plan,
        day: usize,
        slot: usize,
        granularity: Granularity,
    ) -> bool {
        let StrokeState::Active(ctx) = &mut self.state else {
            return false;
        };

        let cell = CoarseCell::containing(day, slot, granularity);
        if ctx.last_cell == Some(cell) {
            return false;
        }

        let value = match ctx.mode {
            Tool::Erase => None,
            Tool::Paint => plan.selected_activity().cloned(),
        };
        plan.grid_mut()
            .write_range(cell.day, cell.block_start, granularity.slots(), value.as_ref());

        ctx.last_cell = Some(cell);
        ctx.writes += 1;
        true
    }
}
