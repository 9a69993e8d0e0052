//! Baseline persistence: save and load snapshots across restarts.
//!
//! Provides the `BaselinePersistence` trait, a `JsonFileBaseline`
//! implementation storing the snapshot as one JSON file, and an
//! `InMemoryBaseline` for tests and embedded use.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{BaselineError, BaselineResult};
use crate::types::BaselineSnapshot;

/// File name of the persisted snapshot inside the model directory.
pub const BASELINE_FILE_NAME: &str = "baseline.json";

/// Storage for the current baseline snapshot.
pub trait BaselinePersistence: Send + Sync {
    /// Persist the snapshot, replacing any previous one.
    fn save(&self, snapshot: &BaselineSnapshot) -> BaselineResult<()>;

    /// Load the persisted snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> BaselineResult<Option<BaselineSnapshot>>;
}

impl<P: BaselinePersistence + ?Sized> BaselinePersistence for Box<P> {
    fn save(&self, snapshot: &BaselineSnapshot) -> BaselineResult<()> {
        (**self).save(snapshot)
    }

    fn load(&self) -> BaselineResult<Option<BaselineSnapshot>> {
        (**self).load()
    }
}

/// JSON-file based persistence.
///
/// Writes are atomic (write to `.tmp`, then rename) so an interrupted save
/// leaves the previous file intact.
pub struct JsonFileBaseline {
    path: PathBuf,
}

impl JsonFileBaseline {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persistence at `<dir>/baseline.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(BASELINE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BaselinePersistence for JsonFileBaseline {
    fn save(&self, snapshot: &BaselineSnapshot) -> BaselineResult<()> {
        let json = serde_json::to_string_pretty(snapshot)?;

        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;

        debug!(path = %self.path.display(), version = snapshot.version, "baseline saved");
        Ok(())
    }

    fn load(&self) -> BaselineResult<Option<BaselineSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let snapshot: BaselineSnapshot = serde_json::from_str(&contents).map_err(|e| {
            BaselineError::SerializationError(format!(
                "{}: deserialization failed: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(Some(snapshot))
    }
}

/// In-memory persistence.
#[derive(Default)]
pub struct InMemoryBaseline {
    data: Mutex<Option<BaselineSnapshot>>,
}

impl InMemoryBaseline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already-persisted snapshot.
    pub fn with_snapshot(snapshot: BaselineSnapshot) -> Self {
        Self {
            data: Mutex::new(Some(snapshot)),
        }
    }
}

impl BaselinePersistence for InMemoryBaseline {
    fn save(&self, snapshot: &BaselineSnapshot) -> BaselineResult<()> {
        let mut data = self.data.lock().map_err(|_| BaselineError::LockError)?;
        *data = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> BaselineResult<Option<BaselineSnapshot>> {
        let data = self.data.lock().map_err(|_| BaselineError::LockError)?;
        Ok(data.clone())
    }
}
