//! # medops-engine
//!
//! Facade over the three analytics engines and the baseline they share.
//!
//! ```text
//!                  ┌────────────────────── AnalyticsEngine ──────────────────────┐
//!   optimize ────► │ medops-optimizer     (fixed utilization policies)           │
//!   detect   ────► │ medops-anomaly    ─┐                                        │
//!   predict  ────► │ medops-outbreak   ─┼─► Arc<BaselineSnapshot> ◄── BaselineStore
//!   train    ────► │ training::retrain ─┘         publish(next) ───────┘         │
//!                  └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`EngineConfig`] is loaded from defaults, an optional file, and `MEDOPS_*`
//! environment variables. [`SyntheticSource`] supplies baseline-consistent
//! data when a caller has none.

#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod synthetic;
pub mod training;

pub use config::{EngineConfig, JitterConfig, JitterKind, LoggingConfig};
pub use engine::{AnalyticsEngine, SYNTHETIC_TRAINING_SEED};
pub use error::{EngineError, EngineResult};
pub use synthetic::{
    sample_beds, sample_equipment, sample_staff, CaseCounts, OperationalSeries, SyntheticSource,
};
pub use training::{population_range, retrain, RetrainSummary, TrainingData, TrainingStatus};
