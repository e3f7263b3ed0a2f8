use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::AppConfig;

const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "planner.db";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "KenBoyle", "WeeklyPlanner")
}

pub struct ConfigService;

impl ConfigService {
    /// Platform config location, falling back to the working directory.
    pub fn default_path() -> PathBuf {
        match project_dirs() {
            Some(dirs) => dirs.config_dir().join(CONFIG_FILE),
            None => {
                log::warn!("Unable to resolve project directory; using current dir for config");
                PathBuf::from(CONFIG_FILE)
            }
        }
    }

    /// Read the config file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config: AppConfig = toml::from_str(&data)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Load, logging and falling back to defaults on any error.
    pub fn load_or_default(path: &Path) -> AppConfig {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {:#}, using defaults", e);
                AppConfig::default()
            }
        }
    }

    pub fn save(path: &Path, config: &AppConfig) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(config).context("failed to serialize config")?;
        fs::write(path, data)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Database location: the configured path, else the platform data dir.
    pub fn resolve_database_path(config: &AppConfig) -> PathBuf {
        if let Some(path) = &config.database_path {
            return path.clone();
        }

        match project_dirs() {
            Some(dirs) => {
                let dir = dirs.data_dir();
                if let Err(e) = fs::create_dir_all(dir) {
                    log::warn!("Failed to create data directory {}: {}", dir.display(), e);
                }
                dir.join(DATABASE_FILE)
            }
            None => PathBuf::from(DATABASE_FILE),
        }
    }
}
