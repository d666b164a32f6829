//! Persisted zoom state: one JSON record per user, rewritten whole.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZoomError};

pub const STATE_FILE: &str = "state.json";


/// Whether zoom is on, which window it belongs to, and the layout to restore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomState {
    pub enabled: bool,
    pub session: String,
    pub window: String,
    /// Layout text captured before zooming.
    pub snapshot: String,
}


/// Whole-file access to the state record. There is no locking; concurrent
/// writers simply overwrite each other.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(config_dir: &Path) -> StateStore {
        StateStore {
            path: config_dir.join(STATE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record. A missing file is the disabled default state.
    pub fn load(&self) -> Result<ZoomState> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ZoomState::default()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    pub fn save(&self, state: &ZoomState) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| ZoomError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        log::debug!("saved state to {}", self.path.display());
        Ok(())
    }

    /// Remove the record. Removing a missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> ZoomError {
        ZoomError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
