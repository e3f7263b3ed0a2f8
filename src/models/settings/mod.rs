// Settings module
// Application configuration persisted as TOML

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::grid::Granularity;

pub const MIN_ROW_HEIGHT: f32 = 4.0;
pub const MAX_ROW_HEIGHT: f32 = 40.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the planner database lives; `None` uses the platform data dir.
    pub database_path: Option<PathBuf>,
    /// Zoom level the grid opens at
    pub default_granularity: Granularity,
    /// Height in points of one visual row
    pub row_height: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            default_granularity: Granularity::FifteenMinutes,
            row_height: 14.0,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl AppConfig {
    /// Clamp values a hand-edited file may have pushed out of range.
    pub fn sanitized(mut self) -> Self {
        if !self.row_height.is_finite() {
            self.row_height = Self::default().row_height;
        }
        self.row_height = self.row_height.clamp(MIN_ROW_HEIGHT, MAX_ROW_HEIGHT);

        let defaults = Self::default();
        if !self.window_width.is_finite() || self.window_width < 320.0 {
            self.window_width = defaults.window_width;
        }
        if !self.window_height.is_finite() || self.window_height < 220.0 {
            self.window_height = defaults.window_height;
        }
        self
    }
}
