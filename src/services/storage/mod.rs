//! Durable storage for the planner document.
//!
//! The whole workspace is written as one JSON document under a single key,
//! so a save is atomic from the planner's point of view.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::document::PlannerDocument;
use crate::services::workspace::Workspace;

pub const DOCUMENT_KEY: &str = "planner.document";

/// Minimal key-value persistence seam.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
}

pub struct PlannerRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PlannerRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the stored workspace. `Ok(None)` when nothing has been saved yet.
    /// A stored document that fails validation is an error.
    pub fn load(&self) -> Result<Option<Workspace>> {
        let Some(json) = self.store.get(DOCUMENT_KEY)? else {
            return Ok(None);
        };

        let document = PlannerDocument::from_json(&json)
            .context("Stored planner document is invalid")?;
        let workspace =
            Workspace::from_document(document).context("Failed to restore plans")?;
        log::info!("Loaded {} plan(s) from storage", workspace.plans().len());
        Ok(Some(workspace))
    }

    /// Load, falling back to a fresh default workspace when nothing is stored
    /// or the stored document cannot be read.
    pub fn load_or_default(&self) -> Workspace {
        match self.load() {
            Ok(Some(workspace)) => workspace,
            Ok(None) => {
                log::info!("No saved plans found, starting with a default plan");
                Workspace::new_default()
            }
            Err(e) => {
                log::warn!("Failed to load plans: {:#}, using defaults", e);
                Workspace::new_default()
            }
        }
    }

    pub fn save(&self, workspace: &Workspace) -> Result<()> {
        let json = workspace
            .export_json()
            .context("Failed to serialize planner document")?;
        self.store.put(DOCUMENT_KEY, &json)?;
        log::debug!("Saved {} plan(s)", workspace.plans().len());
        Ok(())
    }
}

/// Write the whole workspace as exchange JSON to `path`.
pub fn export_to_file(workspace: &Workspace, path: &Path) -> Result<()> {
    let json = workspace
        .export_json()
        .context("Failed to serialize planner document")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Exported {} plan(s) to {}", workspace.plans().len(), path.display());
    Ok(())
}

/// Replace `workspace` with the document stored at `path`. Any read or
/// validation failure leaves `workspace` untouched.
pub fn import_from_file(workspace: &mut Workspace, path: &Path) -> Result<()> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    workspace
        .import_json(&json)
        .with_context(|| format!("{} is not a valid planner document", path.display()))?;
    Ok(())
}
