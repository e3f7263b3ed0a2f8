mod lifecycle;
mod state;
mod status_bar;
mod toolbar;

use self::state::{AppState, StatusLevel};
use crate::models::activity::ActivityIcon;
use crate::models::grid::Granularity;
use crate::models::plan::PlanId;
use crate::models::settings::AppConfig;
use crate::services::aggregation::StripeCache;
use crate::services::allocation::AllocationSummary;
use crate::services::database::Database;
use crate::services::paint::PaintEngine;
use crate::services::reorder::{ReorderEngine, ReorderOutcome};
use crate::services::storage::PlannerRepository;
use crate::services::workspace::Workspace;
use crate::ui_egui::views::activity_list::{render_activity_list, ActivityListAction};
use crate::ui_egui::views::allocation_panel::render_allocation_panel;
use crate::ui_egui::views::palette::suggested_colour;
use crate::ui_egui::views::week_grid::render_week_grid;

const PANEL_MIN_WIDTH: f32 = 220.0;
const PANEL_DEFAULT_WIDTH: f32 = 280.0;

pub struct PlannerApp {
    config: AppConfig,
    /// `None` when the database could not be opened; edits then stay in memory
    repository: Option<PlannerRepository<Database>>,
    workspace: Workspace,
    /// Current zoom level of the grid
    granularity: Granularity,
    paint: PaintEngine,
    reorder: ReorderEngine,
    stripes: StripeCache,
    /// Changes not yet written to storage
    dirty: bool,
    state: AppState,
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_update(ctx);
    }

    fn on_exit(&mut self, gl: Option<&eframe::glow::Context>) {
        self.handle_exit(gl);
    }
}

impl PlannerApp {
    fn handle_update(&mut self, ctx: &egui::Context) {
        self.handle_keyboard_shortcuts(ctx);
        self.render_toolbar(ctx);
        self.render_status_bar(ctx);
        self.render_activity_panel(ctx);
        self.render_grid(ctx);
        self.save_if_idle();
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let (escape, focused, zoom_in, zoom_out) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.focused,
                i.modifiers.command && i.key_pressed(egui::Key::Plus),
                i.modifiers.command && i.key_pressed(egui::Key::Minus),
            )
        });

        if escape {
            if self.reorder.cancel() {
                self.set_status(StatusLevel::Info, "Reorder cancelled");
            }
            self.state.activity_list.editing = None;
            self.state.plan_rename = None;
        }
        // Losing focus mid-gesture means the release will never arrive
        if !focused {
            self.reorder.cancel();
            self.paint.end_stroke();
        }

        if zoom_in {
            self.set_granularity(finer(self.granularity));
        }
        if zoom_out {
            self.set_granularity(coarser(self.granularity));
        }
    }

    fn render_activity_panel(&mut self, ctx: &egui::Context) {
        let actions = egui::SidePanel::left("activity_panel")
            .default_width(PANEL_DEFAULT_WIDTH)
            .min_width(PANEL_MIN_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_source("activity_panel_scroll")
                    .show(ui, |ui| {
                        let plan = self.workspace.active_plan();
                        let actions = render_activity_list(
                            ui,
                            plan,
                            &mut self.reorder,
                            &mut self.state.activity_list,
                        );
                        ui.add_space(8.0);
                        ui.separator();
                        ui.add_space(8.0);
                        render_allocation_panel(ui, &AllocationSummary::compute(plan));
                        actions
                    })
                    .inner
            })
            .inner;

        self.apply_list_actions(actions);
    }

    fn render_grid(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let interaction = render_week_grid(
                ui,
                self.workspace.active_plan_mut(),
                &mut self.stripes,
                &mut self.paint,
                self.granularity,
                self.config.row_height,
            );
            if interaction.wrote {
                self.dirty = true;
            }
        });
    }

    fn apply_list_actions(&mut self, actions: Vec<ActivityListAction>) {
        for action in actions {
            let plan = self.workspace.active_plan_mut();
            match action {
                ActivityListAction::Select(id) => {
                    if plan.select_activity(Some(&id)) {
                        self.dirty = true;
                    }
                }
                ActivityListAction::Edit(id, edit) => match plan.update_activity(&id, edit) {
                    Ok(changed) => {
                        self.dirty |= changed;
                        self.state.activity_list.error = None;
                    }
                    Err(e) => self.state.activity_list.error = Some(e.to_string()),
                },
                ActivityListAction::Delete(id) => {
                    if let Some(removed) = plan.delete_activity(&id) {
                        self.dirty = true;
                        self.set_status(StatusLevel::Info, format!("Deleted '{}'", removed.name));
                    }
                }
                ActivityListAction::Add { name } => {
                    let colour = suggested_colour(plan.activities().len());
                    match plan.add_activity(&name, colour, ActivityIcon::Generic) {
                        Ok(_) => {
                            self.dirty = true;
                            self.state.activity_list.error = None;
                        }
                        Err(e) => self.state.activity_list.error = Some(e.to_string()),
                    }
                }
                ActivityListAction::DropReorder => {
                    if let Some(ReorderOutcome::Moved { .. }) = self.reorder.finish(plan) {
                        self.dirty = true;
                    }
                }
            }
        }
    }

    fn set_granularity(&mut self, granularity: Granularity) {
        if self.granularity != granularity {
            // A stroke is tied to the zoom level it started at
            self.paint.end_stroke();
            self.granularity = granularity;
            log::debug!("Zoom set to {}", granularity.label());
        }
    }

    fn switch_plan(&mut self, id: &PlanId) {
        self.paint.end_stroke();
        self.reorder.cancel();
        self.state.activity_list.editing = None;
        match self.workspace.set_active(id) {
            Ok(()) => {
                self.stripes.invalidate();
                self.dirty = true;
            }
            Err(e) => log::warn!("Failed to switch plan: {}", e),
        }
    }

    fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.state.set_status(level, text);
    }
}

fn finer(granularity: Granularity) -> Granularity {
    match granularity {
        Granularity::Hour => Granularity::FifteenMinutes,
        Granularity::FifteenMinutes | Granularity::FiveMinutes => Granularity::FiveMinutes,
    }
}

fn coarser(granularity: Granularity) -> Granularity {
    match granularity {
        Granularity::FiveMinutes => Granularity::FifteenMinutes,
        Granularity::FifteenMinutes | Granularity::Hour => Granularity::Hour,
    }
}
