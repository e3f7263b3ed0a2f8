// Weekly Planner Application
// Main entry point

use weekly_planner::services::settings::ConfigService;
use weekly_planner::ui_egui::PlannerApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Weekly Planner");

    let config_path = ConfigService::default_path();
    let config = ConfigService::load_or_default(&config_path);
    if !config_path.exists() {
        // Write defaults so there is a file to edit
        if let Err(e) = ConfigService::save(&config_path, &config) {
            log::warn!("Failed to write default config: {:#}", e);
        }
    }
    log::info!("Using config at {}", config_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Weekly Planner")
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Weekly Planner",
        options,
        Box::new(move |cc| Ok(Box::new(PlannerApp::new(cc, config)))),
    )
}
