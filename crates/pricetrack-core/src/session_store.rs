//! Per-site browser session persistence.

use std::path::{Path, PathBuf};

use pricetrack_browser::StorageState;
use tracing::info;

use crate::error::PipelineError;

/// Reads and writes one site's session state JSON file.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved state; `None` when no file exists yet.
    pub fn load(&self) -> Result<Option<StorageState>, PipelineError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            PipelineError::SessionIo {
                path: self.path.clone(),
                source,
            }
        })?;
        let state = serde_json::from_str(&content).map_err(|source| {
            PipelineError::SessionFormat {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(Some(state))
    }

    /// Write the state, replacing any previous file.
    pub fn save(&self, state: &StorageState) -> Result<(), PipelineError> {
        let io_err = |source| PipelineError::SessionIo {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(state).map_err(|source| {
            PipelineError::SessionFormat {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(io_err)?;

        info!(
            "Session state written to {} ({} cookies)",
            self.path.display(),
            state.cookies.len()
        );
        Ok(())
    }
}
