use std::time::{Duration, Instant};

use crate::ui_egui::views::activity_list::ActivityListState;

/// How long a status message stays visible
const STATUS_TTL: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
    pub shown_at: Instant,
}

/// UI-only state that is never persisted.
#[derive(Debug, Default)]
pub struct AppState {
    pub activity_list: ActivityListState,
    /// Rename buffer while the active plan's name is being edited
    pub plan_rename: Option<String>,
    status: Option<StatusMessage>,
}

impl AppState {
    pub fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        let text = text.into();
        match level {
            StatusLevel::Info => log::info!("{}", text),
            StatusLevel::Error => log::error!("{}", text),
        }
        self.status = Some(StatusMessage {
            level,
            text,
            shown_at: Instant::now(),
        });
    }

    /// Current status message, dropping it once it has expired.
    pub fn status(&mut self) -> Option<&StatusMessage> {
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.shown_at.elapsed() > STATUS_TTL)
        {
            self.status = None;
        }
        self.status.as_ref()
    }
}
