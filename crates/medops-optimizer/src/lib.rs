//! # medops-optimizer
//!
//! Resource optimization engine. Each group (bed ward, staff role, equipment
//! category) is judged independently against its type's policy:
//!
//! ```text
//!   type        high   low    up     down
//!   beds        85%    40%    ×1.10  ×0.90
//!   staff       90%    50%    ×1.15  ×0.90
//!   equipment   80%    45%    ×1.10  ×0.85
//! ```
//!
//! Over the high threshold the group grows to `ceil(total × up)`; under the low
//! threshold it shrinks to `max(floor(total × down), 1)`; otherwise it keeps
//! its size. Equipment additionally always receives the scheduling-system
//! recommendation when at least one category is present.
//!
//! The engine has no trained state and never fails.

#![deny(unsafe_code)]

pub mod optimizer;
pub mod policy;
pub mod report;

pub use optimizer::{optimize, optimize_kind};
pub use policy::{UtilizationBand, UtilizationPolicy};
pub use report::{ChartRecord, OptimizationReport, ResourceSummaries, ResourceSummary};
