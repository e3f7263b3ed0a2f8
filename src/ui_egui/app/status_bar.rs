//! Status bar: zoom level, save state and the latest status message.

use egui::{Color32, RichText};

use super::state::StatusLevel;
use super::PlannerApp;
use crate::models::grid::SLOT_MINUTES;
use crate::utils::time::format_minutes;

impl PlannerApp {
    pub(super) fn render_status_bar(&mut self, ctx: &egui::Context) {
        let plan = self.workspace.active_plan();
        let free = plan.grid().free_count() as u32 * SLOT_MINUTES;
        let summary = format!(
            "{}  ·  Zoom {}  ·  {} free",
            plan.name,
            self.granularity.label(),
            format_minutes(free)
        );
        let save_state = match (&self.repository, self.dirty) {
            (None, _) => "Not saved (no database)",
            (Some(_), true) => "Unsaved changes",
            (Some(_), false) => "Saved",
        };

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(RichText::new(summary).small());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(save_state)
                                .small()
                                .color(ui.visuals().weak_text_color()),
                        );
                        if let Some(status) = self.state.status() {
                            let color = match status.level {
                                StatusLevel::Info => ui.visuals().text_color(),
                                StatusLevel::Error => Color32::from_rgb(220, 80, 80),
                            };
                            ui.add_space(12.0);
                            ui.label(RichText::new(&status.text).small().color(color));
                        }
                    });
                });
            });
    }
}
