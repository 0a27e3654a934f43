//! Single-slot persistence for the active study plan.
//!
//! A store holds at most one [`StudyPlan`]. Saving overwrites whatever was
//! there, clearing removes it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::models::StudyPlan;

/// Errors raised by plan stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("stored plan at {path} is not valid: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize plan {plan_id}: {source}")]
    Serialize {
        plan_id: Uuid,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value slot holding the serialized active plan.
pub trait PlanStore {
    /// Read the stored plan, or `None` when the slot is empty.
    fn load(&self) -> Result<Option<StudyPlan>, StoreError>;

    /// Overwrite the slot with `plan`.
    fn save(&mut self, plan: &StudyPlan) -> Result<(), StoreError>;

    /// Empty the slot. Clearing an empty slot succeeds.
    fn clear(&mut self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// JSON file
// ---------------------------------------------------------------------------

/// Stores the plan as pretty-printed JSON in one file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.plan_file.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PlanStore for JsonFileStore {
    fn load(&self) -> Result<Option<StudyPlan>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_err(e)),
        };
        let plan = serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(plan))
    }

    fn save(&mut self, plan: &StudyPlan) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_err(e))?;
        }

        let json = serde_json::to_string_pretty(plan).map_err(|source| StoreError::Serialize {
            plan_id: plan.id,
            source,
        })?;

        // Sibling temp file, then rename into place.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;

        debug!(path = %self.path.display(), plan_id = %plan.id, "plan saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "plan file removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_err(e)),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// In-memory slot. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Option<StudyPlan>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save` calls, for asserting persistence happened.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PlanStore for MemoryStore {
    fn load(&self) -> Result<Option<StudyPlan>, StoreError> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, plan: &StudyPlan) -> Result<(), StoreError> {
        self.slot = Some(plan.clone());
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.slot = None;
        Ok(())
    }
}
