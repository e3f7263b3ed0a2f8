use super::state::{AppState, StatusLevel};
use super::PlannerApp;
use crate::models::settings::AppConfig;
use crate::services::aggregation::StripeCache;
use crate::services::database::Database;
use crate::services::paint::PaintEngine;
use crate::services::reorder::ReorderEngine;
use crate::services::settings::ConfigService;
use crate::services::storage::PlannerRepository;
use crate::services::workspace::Workspace;

impl PlannerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let repository = open_repository(&config);
        let workspace = match &repository {
            Some(repository) => repository.load_or_default(),
            None => Workspace::new_default(),
        };
        log::info!(
            "Planner ready with {} plan(s), active '{}'",
            workspace.plans().len(),
            workspace.active_plan().name
        );

        Self {
            granularity: config.default_granularity,
            config,
            repository,
            workspace,
            paint: PaintEngine::new(),
            reorder: ReorderEngine::new(),
            stripes: StripeCache::new(),
            dirty: false,
            state: AppState::default(),
        }
    }

    /// Persist pending changes once no gesture is in flight.
    pub(super) fn save_if_idle(&mut self) {
        if self.dirty && !self.paint.is_active() && !self.reorder.is_dragging() {
            self.save();
        }
    }

    pub(super) fn save(&mut self) {
        let Some(repository) = &self.repository else {
            return;
        };
        let result = repository.save(&self.workspace);
        // A failed save is retried on the next change, not every frame
        self.dirty = false;
        if let Err(e) = result {
            self.state
                .set_status(StatusLevel::Error, format!("Failed to save planner: {:#}", e));
        }
    }

    pub(super) fn handle_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.paint.end_stroke();
        self.reorder.cancel();
        if self.dirty {
            self.save();
        }
        log::info!("Planner closed");
    }
}

fn open_repository(config: &AppConfig) -> Option<PlannerRepository<Database>> {
    let path = ConfigService::resolve_database_path(config);
    let path_str = path.to_string_lossy();
    let database = match Database::new(&path_str) {
        Ok(database) => database,
        Err(e) => {
            log::error!("Failed to open database at {}: {:#}", path.display(), e);
            return None;
        }
    };
    if let Err(e) = database.initialize_schema() {
        log::error!("Failed to initialize database schema: {:#}", e);
        return None;
    }
    log::info!("Using database at {}", path.display());
    Some(PlannerRepository::new(database))
}
