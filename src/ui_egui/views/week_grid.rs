//! Week grid rendering.
//!
//! Seven day columns of visual rows, each row drawn from the stripe cache.
//! Pointer presses and moves over the cells are forwarded to the paint
//! engine; the grid itself never writes cells.

use egui::{Align2, FontId, Painter, Pos2, Rect, Response, Sense, Stroke, Vec2};

use super::palette::{to_color32, GridPalette};
use crate::models::grid::{Granularity, DAYS_PER_WEEK, SLOT_MINUTES};
use crate::models::plan::Plan;
use crate::services::aggregation::{StripeCache, StripeCell, FREE_LABEL};
use crate::services::paint::PaintEngine;
use crate::ui_egui::input::pressed_button;
use crate::utils::time::{format_minutes, slot_range_label, weekday_label};

pub const TIME_LABEL_WIDTH: f32 = 48.0;
pub const HEADER_HEIGHT: f32 = 22.0;
pub const COLUMN_SPACING: f32 = 2.0;
const MIN_COLUMN_WIDTH: f32 = 40.0;
/// Hour labels closer than this are thinned out
const MIN_LABEL_SPACING: f32 = 14.0;

/// Screen geometry of the grid for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub origin: Pos2,
    pub col_width: f32,
    pub row_height: f32,
    pub granularity: Granularity,
}

impl GridLayout {
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            TIME_LABEL_WIDTH + DAYS_PER_WEEK as f32 * (self.col_width + COLUMN_SPACING),
            HEADER_HEIGHT + self.granularity.rows_per_day() as f32 * self.row_height,
        )
    }

    fn column_left(&self, day: usize) -> f32 {
        self.origin.x
            + TIME_LABEL_WIDTH
            + COLUMN_SPACING
            + day as f32 * (self.col_width + COLUMN_SPACING)
    }

    fn row_top(&self, row: usize) -> f32 {
        self.origin.y + HEADER_HEIGHT + row as f32 * self.row_height
    }

    pub fn cell_rect(&self, day: usize, row: usize) -> Rect {
        Rect::from_min_size(
            Pos2::new(self.column_left(day), self.row_top(row)),
            Vec2::new(self.col_width, self.row_height),
        )
    }

    /// Day column and visual row under `pos`. The gap right of a column
    /// belongs to that column so a stroke crossing days never drops out.
    pub fn hit(&self, pos: Pos2) -> Option<(usize, usize)> {
        let x = pos.x - self.column_left(0);
        let y = pos.y - self.row_top(0);
        if x < 0.0 || y < 0.0 {
            return None;
        }

        let day = (x / (self.col_width + COLUMN_SPACING)) as usize;
        let row = (y / self.row_height) as usize;
        if day >= DAYS_PER_WEEK || row >= self.granularity.rows_per_day() {
            return None;
        }
        Some((day, row))
    }

    /// First fine slot of a visual row.
    pub fn slot_for_row(&self, row: usize) -> usize {
        row * self.granularity.slots()
    }

    /// Visual rows intersecting `clip`, as a half-open range.
    fn visible_rows(&self, clip: Rect) -> std::ops::Range<usize> {
        let rows = self.granularity.rows_per_day();
        let first = ((clip.top() - self.row_top(0)) / self.row_height).floor().max(0.0) as usize;
        let last = ((clip.bottom() - self.row_top(0)) / self.row_height).ceil().max(0.0) as usize;
        first.min(rows)..last.min(rows)
    }
}

/// What the grid did with the pointer this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GridInteraction {
    pub wrote: bool,
    pub stroke_finished: bool,
}

pub fn render_week_grid(
    ui: &mut egui::Ui,
    plan: &mut Plan,
    stripes: &mut StripeCache,
    paint: &mut PaintEngine,
    granularity: Granularity,
    row_height: f32,
) -> GridInteraction {
    let palette = GridPalette::from_visuals(ui.visuals());
    let col_width = ((ui.available_width() - TIME_LABEL_WIDTH) / DAYS_PER_WEEK as f32
        - COLUMN_SPACING)
        .max(MIN_COLUMN_WIDTH);
    let mut interaction = GridInteraction::default();

    egui::ScrollArea::both()
        .id_source("week_grid_scroll")
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .show(ui, |ui| {
            let provisional = GridLayout {
                origin: Pos2::ZERO,
                col_width,
                row_height,
                granularity,
            };
            let (rect, response) =
                ui.allocate_exact_size(provisional.size(), Sense::click_and_drag());
            let layout = GridLayout {
                origin: rect.min,
                ..provisional
            };
            let clip = ui.clip_rect();

            interaction = handle_pointer(ui, &response, &layout, clip, plan, paint);

            let painter = ui.painter();
            draw_headers(painter, &layout, &palette);
            draw_time_labels(painter, &layout, clip, &palette);
            for day in 0..DAYS_PER_WEEK {
                for row in layout.visible_rows(clip) {
                    let cell = stripes.get(plan, day, row, granularity);
                    draw_stripe(painter, layout.cell_rect(day, row), cell, &palette);
                }
            }
            draw_row_lines(painter, &layout, clip, &palette);

            if !paint.is_active() {
                let hovered = ui
                    .input(|i| i.pointer.hover_pos())
                    .filter(|pos| clip.contains(*pos))
                    .and_then(|pos| layout.hit(pos));
                if let Some((day, row)) = hovered {
                    let text = hover_text(stripes.get(plan, day, row, granularity), day, row, granularity);
                    response.on_hover_text_at_pointer(text);
                }
            }
        });

    interaction
}

/// Route this frame's pointer state into the paint engine. A press over a
/// cell starts a stroke, entering cells continues it, and release or leaving
/// the grid ends it.
fn handle_pointer(
    ui: &egui::Ui,
    response: &Response,
    layout: &GridLayout,
    clip: Rect,
    plan: &mut Plan,
    paint: &mut PaintEngine,
) -> GridInteraction {
    let mut interaction = GridInteraction::default();
    let (pressed, released, hover) = ui.input(|i| {
        (
            pressed_button(i),
            i.pointer.any_released(),
            i.pointer.hover_pos(),
        )
    });
    let target = hover
        .filter(|pos| clip.contains(*pos))
        .and_then(|pos| layout.hit(pos));

    match (pressed, target) {
        (Some(button), Some((day, row))) if response.hovered() => {
            paint.begin_stroke(plan, day, layout.slot_for_row(row), button, layout.granularity);
            interaction.wrote = true;
        }
        (_, Some((day, row))) if paint.is_active() => {
            interaction.wrote =
                paint.continue_stroke(plan, day, layout.slot_for_row(row), layout.granularity);
        }
        _ => {}
    }

    if paint.is_active() && (released || target.is_none()) {
        paint.end_stroke();
        interaction.stroke_finished = true;
    }

    interaction
}

fn draw_headers(painter: &Painter, layout: &GridLayout, palette: &GridPalette) {
    for day in 0..DAYS_PER_WEEK {
        let center = Pos2::new(
            layout.column_left(day) + layout.col_width / 2.0,
            layout.origin.y + HEADER_HEIGHT / 2.0,
        );
        painter.text(
            center,
            Align2::CENTER_CENTER,
            weekday_label(day),
            FontId::proportional(13.0),
            palette.header,
        );
    }
}

fn draw_time_labels(painter: &Painter, layout: &GridLayout, clip: Rect, palette: &GridPalette) {
    let rows_per_hour = 60 / (layout.granularity.slots() as u32 * SLOT_MINUTES);
    let hour_height = rows_per_hour as f32 * layout.row_height;
    let every = (MIN_LABEL_SPACING / hour_height).ceil().max(1.0) as usize;

    for hour in (0..24).step_by(every) {
        let y = layout.row_top(hour * rows_per_hour as usize);
        if y < clip.top() - hour_height || y > clip.bottom() {
            continue;
        }
        painter.text(
            Pos2::new(layout.origin.x + TIME_LABEL_WIDTH - 5.0, y),
            Align2::RIGHT_TOP,
            format!("{:02}:00", hour),
            FontId::proportional(11.0),
            palette.label,
        );
    }
}

/// Thin lines between rows, stronger at each hour.
fn draw_row_lines(painter: &Painter, layout: &GridLayout, clip: Rect, palette: &GridPalette) {
    let rows_per_hour = 60 / (layout.granularity.slots() * SLOT_MINUTES as usize);
    let left = layout.column_left(0);
    let right = layout.column_left(DAYS_PER_WEEK - 1) + layout.col_width;

    for row in layout.visible_rows(clip) {
        let on_hour = row % rows_per_hour == 0;
        // Fine rows get too dense for per-row lines
        if !on_hour && layout.row_height < 8.0 {
            continue;
        }
        let color = if on_hour { palette.hour_line } else { palette.row_line };
        painter.hline(left..=right, layout.row_top(row), Stroke::new(0.5, color));
    }
}

fn draw_stripe(painter: &Painter, rect: Rect, cell: &StripeCell, palette: &GridPalette) {
    match cell {
        StripeCell::Free => {
            painter.rect_filled(rect, 0.0, palette.free);
        }
        StripeCell::Single { colour, .. } => {
            painter.rect_filled(rect, 0.0, to_color32(*colour));
        }
        StripeCell::Mixed { segments, .. } => {
            for segment in segments {
                let band = Rect::from_min_max(
                    Pos2::new(rect.left() + rect.width() * segment.start, rect.top()),
                    Pos2::new(rect.left() + rect.width() * segment.end, rect.bottom()),
                );
                painter.rect_filled(band, 0.0, palette.segment_fill(segment.colour));
            }
        }
    }
}

fn hover_text(cell: &StripeCell, day: usize, row: usize, granularity: Granularity) -> String {
    let slots = granularity.slots();
    let header = format!(
        "{} {}",
        weekday_label(day),
        slot_range_label(row * slots, slots)
    );
    let body = match cell {
        StripeCell::Free => format!(
            "{}: {}",
            FREE_LABEL,
            format_minutes(slots as u32 * SLOT_MINUTES)
        ),
        StripeCell::Single { name, icon, .. } => format!("{} {}", icon.glyph(), name),
        StripeCell::Mixed { tooltip, .. } => tooltip.clone(),
    };
    format!("{}\n{}", header, body)
}
