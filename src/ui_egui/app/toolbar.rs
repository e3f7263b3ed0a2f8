//! Top toolbar: plan picker and plan management, paint tool, zoom level and
//! document import/export.

use egui::{Key, RichText, TextEdit};

use super::state::StatusLevel;
use super::PlannerApp;
use crate::models::grid::Granularity;
use crate::models::plan::Tool;
use crate::services::storage::{export_to_file, import_from_file};

impl PlannerApp {
    pub(super) fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(2.0);
            ui.horizontal(|ui| {
                self.render_plan_controls(ui);
                ui.separator();
                self.render_tool_picker(ui);
                ui.separator();
                self.render_zoom_picker(ui);
                ui.separator();
                self.render_file_buttons(ui);
            });
            ui.add_space(2.0);
        });
    }

    fn render_plan_controls(&mut self, ui: &mut egui::Ui) {
        if self.state.plan_rename.is_some() {
            self.render_plan_rename(ui);
            return;
        }

        let active_id = self.workspace.active_plan_id().clone();
        let mut chosen = None;
        egui::ComboBox::from_id_source("plan_picker")
            .width(160.0)
            .selected_text(RichText::new(&self.workspace.active_plan().name).strong())
            .show_ui(ui, |ui| {
                for plan in self.workspace.plans() {
                    if ui.selectable_label(plan.id() == &active_id, &plan.name).clicked() {
                        chosen = Some(plan.id().clone());
                    }
                }
            });
        if let Some(id) = chosen {
            if id != active_id {
                self.switch_plan(&id);
            }
        }

        if ui.button("➕").on_hover_text("New plan").clicked() {
            let name = format!("Week {}", self.workspace.plans().len() + 1);
            if let Ok(id) = self.workspace.create_plan(&name) {
                self.switch_plan(&id);
            }
        }
        if ui.button("⎘").on_hover_text("Duplicate plan").clicked() {
            match self.workspace.duplicate_plan(&active_id) {
                Ok(id) => self.switch_plan(&id),
                Err(e) => self.set_status(StatusLevel::Error, e.to_string()),
            }
        }
        if ui.button("✏").on_hover_text("Rename plan").clicked() {
            self.state.plan_rename = Some(self.workspace.active_plan().name.clone());
        }
        let can_delete = self.workspace.plans().len() > 1;
        if ui
            .add_enabled(can_delete, egui::Button::new("🗑"))
            .on_hover_text("Delete plan")
            .clicked()
        {
            match self.workspace.delete_plan(&active_id) {
                Ok(removed) => {
                    let next = self.workspace.active_plan_id().clone();
                    self.switch_plan(&next);
                    self.set_status(StatusLevel::Info, format!("Deleted plan '{}'", removed.name));
                }
                Err(e) => self.set_status(StatusLevel::Error, e.to_string()),
            }
        }
    }

    fn render_plan_rename(&mut self, ui: &mut egui::Ui) {
        let Some(buffer) = self.state.plan_rename.as_mut() else {
            return;
        };
        let edit = ui.add(TextEdit::singleline(buffer).desired_width(160.0));
        let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

        if ui.button("✔").clicked() || submitted {
            let name = buffer.clone();
            let id = self.workspace.active_plan_id().clone();
            match self.workspace.rename_plan(&id, &name) {
                Ok(()) => {
                    self.dirty = true;
                    self.state.plan_rename = None;
                }
                Err(e) => self.set_status(StatusLevel::Error, e.to_string()),
            }
        } else if ui.button("✖").clicked() {
            self.state.plan_rename = None;
        }
    }

    fn render_tool_picker(&mut self, ui: &mut egui::Ui) {
        let plan = self.workspace.active_plan_mut();
        let mut tool = plan.tool();
        ui.selectable_value(&mut tool, Tool::Paint, "🖌 Paint");
        ui.selectable_value(&mut tool, Tool::Erase, "⌫ Erase")
            .on_hover_text("Right-drag always erases");
        if tool != plan.tool() {
            plan.set_tool(tool);
            self.dirty = true;
        }
    }

    fn render_zoom_picker(&mut self, ui: &mut egui::Ui) {
        ui.label("Zoom");
        let mut granularity = self.granularity;
        for option in Granularity::ALL {
            ui.selectable_value(&mut granularity, option, option.label());
        }
        self.set_granularity(granularity);
    }

    fn render_file_buttons(&mut self, ui: &mut egui::Ui) {
        if ui.button("Import…").clicked() {
            self.import_document();
        }
        if ui.button("Export…").clicked() {
            self.export_document();
        }
    }

    fn import_document(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Import Planner")
            .add_filter("Planner JSON", &["json"])
            .pick_file()
        else {
            return;
        };

        self.paint.end_stroke();
        self.reorder.cancel();
        match import_from_file(&mut self.workspace, &path) {
            Ok(()) => {
                self.stripes.invalidate();
                self.state.activity_list.editing = None;
                self.dirty = true;
                self.set_status(
                    StatusLevel::Info,
                    format!("Imported {} plan(s)", self.workspace.plans().len()),
                );
            }
            Err(e) => self.set_status(StatusLevel::Error, format!("Import failed: {:#}", e)),
        }
    }

    fn export_document(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Export Planner")
            .set_file_name("weekly-planner.json")
            .add_filter("Planner JSON", &["json"])
            .save_file()
        else {
            return;
        };

        match export_to_file(&self.workspace, &path) {
            Ok(()) => self.set_status(StatusLevel::Info, format!("Exported to {}", path.display())),
            Err(e) => self.set_status(StatusLevel::Error, format!("Export failed: {:#}", e)),
        }
    }
}
