//! Bounded perturbation source for forecasts, confidence scores and trend charts.
//!
//! `Disabled` returns the midpoint of every requested range, so output is a
//! pure function of the input. `Seeded` creates a fresh `StdRng` per
//! prediction call, so repeated calls with the same seed are identical.
//! `Entropy` is for simulation only.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How the jitter source draws values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "seed")]
pub enum JitterMode {
    #[default]
    Disabled,
    Seeded(u64),
    Entropy,
}

/// Per-call jitter state.
pub struct Jitter {
    rng: Option<StdRng>,
}

impl Jitter {
    pub fn new(mode: JitterMode) -> Self {
        let rng = match mode {
            JitterMode::Disabled => None,
            JitterMode::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
            JitterMode::Entropy => Some(StdRng::from_entropy()),
        };
        Self { rng }
    }

    pub fn disabled() -> Self {
        Self { rng: None }
    }

    pub fn is_disabled(&self) -> bool {
        self.rng.is_none()
    }

    /// A value in `[low, high]`; the midpoint when disabled.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        match self.rng.as_mut() {
            Some(rng) if high > low => rng.gen_range(low..=high),
            _ => (low + high) / 2.0,
        }
    }

    /// An integer in `[low, high]`; the lower midpoint when disabled.
    pub fn integer(&mut self, low: u32, high: u32) -> u32 {
        match self.rng.as_mut() {
            Some(rng) if high > low => rng.gen_range(low..=high),
            _ => low + high.saturating_sub(low) / 2,
        }
    }
}

impl std::fmt::Debug for Jitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Jitter")
            .field("disabled", &self.is_disabled())
            .finish()
    }
}
