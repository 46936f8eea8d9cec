//! Session snapshot storage - single JSON slot, valid for one calendar day

use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::get_app_dir;
use crate::interview::{Interview, SessionState};

const SNAPSHOT_FILE: &str = "session.json";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Inconsistent snapshot: {0}")]
    Inconsistent(String),
}

pub type Result<T> = std::result::Result<T, SnapshotError>;

pub struct Storage {
    snapshot_path: PathBuf,
}

impl Storage {
    /// Storage in the default app directory
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::in_dir(&get_app_dir()?))
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            snapshot_path: dir.join(SNAPSHOT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Read the snapshot, whatever its date. Snapshots that break the
    /// selection or per-category invariants are rejected.
    pub fn load(&self) -> Result<Option<SessionState>> {
        if !self.snapshot_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.snapshot_path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let state: SessionState = serde_json::from_str(&content)?;
        if let Some(problem) = state.inconsistency() {
            return Err(SnapshotError::Inconsistent(problem));
        }
        Ok(Some(state))
    }

    /// Snapshot for `today`, or `None` when missing, stale or malformed.
    /// Stale and malformed files are left on disk.
    pub fn load_for(&self, today: NaiveDate) -> Option<SessionState> {
        let state = match self.load() {
            Ok(Some(state)) => state,
            Ok(None) => return None,
            Err(e) => {
                warn!(
                    "Discarding snapshot {}: {}",
                    self.snapshot_path.display(),
                    e
                );
                return None;
            }
        };

        match state.started_on() {
            Some(day) if day == today => Some(state),
            Some(day) => {
                info!("Ignoring snapshot from {}", day);
                None
            }
            None => None,
        }
    }

    pub fn load_today(&self) -> Option<SessionState> {
        self.load_for(Local::now().date_naive())
    }

    /// Resume today's interview, or start a fresh one
    pub fn open_interview(&self) -> Interview {
        self.load_today()
            .map(Interview::resume)
            .unwrap_or_else(Interview::start)
    }

    pub fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.snapshot_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if self.snapshot_path.exists() {
            let backup_path = self.snapshot_path.with_extension("json.bak");
            if let Err(e) = fs::copy(&self.snapshot_path, &backup_path) {
                warn!("Failed to create backup: {}", e);
            }
        }

        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.snapshot_path, content)?;
        Ok(())
    }
}
