//! # medops-outbreak
//!
//! Outbreak prediction engine. Each disease is forecast `horizon_days` ahead,
//! classified into a risk tier, and ranked:
//!
//! ```text
//!   current ──► ForecastStrategy ──► predicted ──► change % ──► risk tier
//!               ├── Trained   (fitted model, floored at 0.8·current)
//!               └── Seasonal  (month multiplier × jitter, clamped to
//!                              [0.5·current, 3·current])
//!
//!   ranked predictions ──► highest-risk disease ──► monthly trend
//!                                               └─► preparedness table
//! ```
//!
//! Randomness is confined to [`Jitter`]. With [`JitterMode::Disabled`] every
//! draw is the midpoint of its range and reports are reproducible.

#![deny(unsafe_code)]

pub mod jitter;
pub mod predictor;
pub mod recommend;
pub mod risk;
pub mod strategy;
pub mod trend;

pub use jitter::{Jitter, JitterMode};
pub use predictor::{OutbreakConfig, OutbreakPredictor, OutbreakReport};
pub use recommend::recommendations;
pub use risk::{change_percentage, classify, rank, ConfidenceBand, ConfidenceBands};
pub use strategy::ForecastStrategy;
pub use trend::{chart_months, monthly_trend};
