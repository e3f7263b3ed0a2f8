//! Weekly allocation: minutes per activity, free time last.

use egui::{Color32, RichText, Sense, Vec2};

use super::palette::to_color32;
use crate::services::aggregation::FREE_LABEL;
use crate::services::allocation::AllocationSummary;
use crate::utils::time::format_minutes;

const SWATCH_SIZE: f32 = 10.0;

pub fn render_allocation_panel(ui: &mut egui::Ui, summary: &AllocationSummary) {
    ui.heading("This week");
    ui.add_space(4.0);

    egui::Grid::new("allocation_grid")
        .num_columns(3)
        .spacing([8.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            for entry in &summary.entries {
                allocation_row(
                    ui,
                    to_color32(entry.colour),
                    &entry.name,
                    entry.minutes,
                    summary.share(entry.minutes),
                );
            }
            allocation_row(
                ui,
                ui.visuals().faint_bg_color,
                FREE_LABEL,
                summary.free_minutes,
                summary.share(summary.free_minutes),
            );
        });

    ui.add_space(4.0);
    ui.label(
        RichText::new(format!(
            "{} of {} planned",
            format_minutes(summary.allocated_minutes()),
            format_minutes(summary.total_minutes)
        ))
        .small()
        .color(ui.visuals().weak_text_color()),
    );
}

fn allocation_row(ui: &mut egui::Ui, colour: Color32, name: &str, minutes: u32, share: f32) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(SWATCH_SIZE), Sense::hover());
        ui.painter().rect_filled(rect, 2.0, colour);
        ui.label(name);
    });
    ui.label(format_minutes(minutes));
    ui.label(
        RichText::new(format!("{:.1}%", share * 100.0)).color(ui.visuals().weak_text_color()),
    );
    ui.end_row();
}
