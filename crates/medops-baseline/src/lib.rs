//! # medops-baseline
//!
//! The Baseline Store: the one piece of shared state the analytics engines read.
//!
//! ## Architecture
//!
//! ```text
//!   init_model_dir(dir) ──► JsonFileBaseline(dir/baseline.json)
//!                                  │
//!                                  ▼
//!                           BaselineStore::open ──► Arc<BaselineSnapshot>
//!                                  │                  ├── normal_ranges      (anomaly reference)
//!                                  │                  ├── seasonal_profiles  (outbreak heuristic)
//!                                  │                  └── forecast_models    (fitted, optional)
//!                                  ▼
//!                           publish(next)  (training only)
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod model;
pub mod persistence;
pub mod store;
pub mod types;

use std::path::{Path, PathBuf};

use tracing::debug;

pub use error::{BaselineError, BaselineResult};
pub use model::{parse_day, TrendSeasonalModel};
pub use persistence::{BaselinePersistence, InMemoryBaseline, JsonFileBaseline, BASELINE_FILE_NAME};
pub use store::BaselineStore;
pub use types::{
    category, default_normal_ranges, default_seasonal_profiles, metric, BaselineSnapshot,
    NormalRange, Period, SeasonalProfile,
};

/// Default model directory, relative to the working directory.
pub const DEFAULT_MODEL_DIR: &str = "./models/saved";

/// Create the model directory. Called once by the process bootstrap.
pub fn init_model_dir(path: impl AsRef<Path>) -> BaselineResult<PathBuf> {
    let path = path.as_ref();
    std::fs::create_dir_all(path)?;
    debug!(path = %path.display(), "model directory ready");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_model_dir_creates_nested_dirs() {
        let root = std::env::temp_dir().join(format!("medops_init_{}", uuid::Uuid::new_v4()));
        let nested = root.join("models").join("saved");
        let created = init_model_dir(&nested).unwrap();
        assert!(created.is_dir());
        // Idempotent.
        assert!(init_model_dir(&nested).is_ok());
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn store_opens_in_initialized_dir() {
        let root = std::env::temp_dir().join(format!("medops_init_{}", uuid::Uuid::new_v4()));
        let dir = init_model_dir(&root).unwrap();
        let store = BaselineStore::open(JsonFileBaseline::in_dir(&dir)).unwrap();
        assert_eq!(store.version(), 0);
        assert!(dir.join(BASELINE_FILE_NAME).exists());
        let _ = std::fs::remove_dir_all(&root);
    }
}
