//! Activity list panel.
//!
//! Rows show a drag handle, a colour swatch and the activity name. Clicking
//! a row selects it, the pencil opens inline editing, and dragging the handle
//! reorders through the reorder engine. The view never mutates the plan; it
//! reports what the person asked for as [`ActivityListAction`]s.

use egui::{
    Align2, CursorIcon, FontId, Id, Key, LayerId, Order, Pos2, Rect, Sense, Stroke,
    TextEdit, Vec2,
};

use super::palette::{to_color32, with_alpha};
use crate::models::activity::{
    Activity, ActivityEdit, ActivityIcon, ActivityId, RgbColor, MAX_NAME_LEN,
};
use crate::models::plan::Plan;
use crate::services::reorder::{IndicatorPlacement, ReorderEngine, RowBounds};
use crate::ui_egui::input::held_button;

const HANDLE_WIDTH: f32 = 14.0;
const ROW_HEIGHT: f32 = 22.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityListAction {
    Select(ActivityId),
    Edit(ActivityId, ActivityEdit),
    Delete(ActivityId),
    Add { name: String },
    /// The pointer was released while a reorder drag was running
    DropReorder,
}

/// Inline edit buffer for one activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub activity: ActivityId,
    pub name: String,
    pub icon: ActivityIcon,
}

#[derive(Debug, Default)]
pub struct ActivityListState {
    pub new_name: String,
    pub editing: Option<EditBuffer>,
    /// Last validation failure, shown under the list
    pub error: Option<String>,
}

impl ActivityListState {
    pub fn start_editing(&mut self, activity: &Activity) {
        self.editing = Some(EditBuffer {
            activity: activity.id.clone(),
            name: activity.name.clone(),
            icon: activity.icon,
        });
        self.error = None;
    }
}

pub fn render_activity_list(
    ui: &mut egui::Ui,
    plan: &Plan,
    reorder: &mut ReorderEngine,
    state: &mut ActivityListState,
) -> Vec<ActivityListAction> {
    let mut actions = Vec::new();
    let order = plan.activities().ids();
    let dragged = reorder.session().map(|session| session.activity.clone());
    let mut row_rects: Vec<(ActivityId, Rect)> = Vec::with_capacity(order.len());
    let mut drag_request = None;

    ui.heading("Activities");
    ui.add_space(4.0);

    for activity in plan.activities().iter() {
        let is_selected = plan.selected_activity() == Some(&activity.id);
        let is_editing = state
            .editing
            .as_ref()
            .is_some_and(|buffer| buffer.activity == activity.id);

        let row = ui.horizontal(|ui| {
            ui.set_min_height(ROW_HEIGHT);

            let (handle_rect, handle) =
                ui.allocate_exact_size(Vec2::new(HANDLE_WIDTH, ROW_HEIGHT), Sense::drag());
            ui.painter().text(
                handle_rect.center(),
                Align2::CENTER_CENTER,
                "⠿",
                FontId::proportional(14.0),
                ui.visuals().weak_text_color(),
            );
            if handle.hovered() && dragged.is_none() {
                ui.ctx().set_cursor_icon(CursorIcon::Grab);
            }
            if handle.drag_started() {
                let (button, origin) = ui.input(|i| (held_button(i), i.pointer.press_origin()));
                if let (Some(button), Some(origin)) = (button, origin) {
                    drag_request = Some((activity.id.clone(), button, origin.y));
                }
            }

            let mut rgb = activity.colour.to_array();
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                actions.push(ActivityListAction::Edit(
                    activity.id.clone(),
                    ActivityEdit {
                        colour: Some(RgbColor::new(rgb[0], rgb[1], rgb[2])),
                        ..ActivityEdit::default()
                    },
                ));
            }

            if is_editing {
                render_edit_row(ui, state, &mut actions);
            } else {
                let label = ui.selectable_label(is_selected, activity.display_name());
                if label.clicked() {
                    actions.push(ActivityListAction::Select(activity.id.clone()));
                }
                if label.double_clicked() {
                    state.start_editing(activity);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("🗑").on_hover_text("Delete activity").clicked() {
                        actions.push(ActivityListAction::Delete(activity.id.clone()));
                    }
                    if ui.small_button("✏").on_hover_text("Edit activity").clicked() {
                        state.start_editing(activity);
                    }
                });
            }
        });

        let rect = row.response.rect;
        if dragged.as_ref() == Some(&activity.id) {
            ui.painter()
                .rect_filled(rect, 2.0, with_alpha(ui.visuals().panel_fill, 170));
        }
        row_rects.push((activity.id.clone(), rect));
    }

    let rows: Vec<(ActivityId, RowBounds)> = row_rects
        .iter()
        .map(|(id, rect)| (id.clone(), RowBounds::new(rect.top(), rect.bottom())))
        .collect();

    if let Some((id, button, pointer_y)) = drag_request {
        if let Some((_, rect)) = row_rects.iter().find(|(row_id, _)| row_id == &id) {
            reorder.begin(
                button,
                &order,
                &id,
                pointer_y,
                rect.top(),
                rect.width(),
                rect.height(),
            );
        }
    }

    if reorder.is_dragging() {
        render_drag_feedback(ui, plan, reorder, &rows, &row_rects);
        if ui.input(|i| i.pointer.any_released()) {
            actions.push(ActivityListAction::DropReorder);
        }
    }

    ui.add_space(8.0);
    render_add_row(ui, state, &mut actions);

    if let Some(error) = &state.error {
        ui.colored_label(ui.visuals().error_fg_color, error);
    }

    actions
}

fn render_edit_row(
    ui: &mut egui::Ui,
    state: &mut ActivityListState,
    actions: &mut Vec<ActivityListAction>,
) {
    let Some(buffer) = state.editing.as_mut() else {
        return;
    };

    let name_edit = ui.add(
        TextEdit::singleline(&mut buffer.name)
            .char_limit(MAX_NAME_LEN)
            .desired_width(110.0),
    );
    egui::ComboBox::from_id_source(("activity_icon", buffer.activity.as_str()))
        .width(36.0)
        .selected_text(buffer.icon.glyph())
        .show_ui(ui, |ui| {
            for icon in ActivityIcon::ALL {
                ui.selectable_value(&mut buffer.icon, icon, format!("{} {}", icon.glyph(), icon.key()));
            }
        });

    let submitted = name_edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
    if ui.small_button("✔").clicked() || submitted {
        actions.push(ActivityListAction::Edit(
            buffer.activity.clone(),
            ActivityEdit {
                name: Some(buffer.name.clone()),
                icon: Some(buffer.icon),
                ..ActivityEdit::default()
            },
        ));
        state.editing = None;
    } else if ui.small_button("✖").clicked() {
        state.editing = None;
    }
}

fn render_add_row(
    ui: &mut egui::Ui,
    state: &mut ActivityListState,
    actions: &mut Vec<ActivityListAction>,
) {
    ui.horizontal(|ui| {
        let edit = ui.add(
            TextEdit::singleline(&mut state.new_name)
                .hint_text("New activity")
                .char_limit(MAX_NAME_LEN)
                .desired_width(140.0),
        );
        let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        if ui.button("➕ Add").clicked() || submitted {
            actions.push(ActivityListAction::Add {
                name: std::mem::take(&mut state.new_name),
            });
        }
    });
}

/// Drop indicator line plus a floating copy of the dragged row.
fn render_drag_feedback(
    ui: &egui::Ui,
    plan: &Plan,
    reorder: &mut ReorderEngine,
    rows: &[(ActivityId, RowBounds)],
    row_rects: &[(ActivityId, Rect)],
) {
    ui.ctx().set_cursor_icon(CursorIcon::Grabbing);

    let indicator = match ui.input(|i| i.pointer.hover_pos()) {
        Some(pos) => reorder.update(pos.y, rows),
        None => reorder.indicator(rows),
    };
    let accent = ui.visuals().selection.stroke.color;

    if let Some(indicator) = indicator {
        if let Some((_, rect)) = row_rects.iter().find(|(id, _)| id == &indicator.sibling) {
            let y = match indicator.placement {
                IndicatorPlacement::Above => rect.top(),
                IndicatorPlacement::Below => rect.bottom(),
            };
            ui.painter()
                .hline(rect.x_range(), y, Stroke::new(2.0, accent));
        }
    }

    let Some(session) = reorder.session() else {
        return;
    };
    let Some(activity) = plan.activities().get(&session.activity) else {
        return;
    };
    let left = row_rects
        .first()
        .map(|(_, rect)| rect.left())
        .unwrap_or_else(|| ui.min_rect().left());
    let preview = Rect::from_min_size(
        Pos2::new(left, session.preview_top()),
        Vec2::new(session.row_width, session.row_height),
    );

    let painter = ui
        .ctx()
        .layer_painter(LayerId::new(Order::Tooltip, Id::new("activity_drag_preview")));
    painter.rect(
        preview,
        3.0,
        with_alpha(ui.visuals().panel_fill, 230),
        Stroke::new(1.0, accent),
    );
    let swatch = Rect::from_min_size(
        preview.left_center() + Vec2::new(HANDLE_WIDTH + 4.0, -6.0),
        Vec2::splat(12.0),
    );
    painter.rect_filled(swatch, 2.0, to_color32(activity.colour));
    painter.text(
        swatch.right_center() + Vec2::new(6.0, 0.0),
        Align2::LEFT_CENTER,
        activity.display_name(),
        FontId::proportional(13.0),
        ui.visuals().strong_text_color(),
    );
}
