//! Per-disease forecast strategies.
//!
//! `Trained` is used when the baseline holds a fitted model for the disease;
//! `Seasonal` otherwise. The seasonal variant needs nothing beyond a profile,
//! and a neutral profile always exists, so every disease gets a forecast.

use chrono::{Datelike, NaiveDate};
use medops_baseline::{BaselineSnapshot, SeasonalProfile, TrendSeasonalModel};

use crate::jitter::Jitter;

/// Lower bound of a trained forecast, as a fraction of current cases.
pub const TRAINED_FLOOR: f64 = 0.8;

/// Seasonal forecast perturbation range.
pub const SEASONAL_JITTER: (f64, f64) = (0.8, 1.2);

/// Seasonal forecast clamp, as fractions of current cases.
pub const SEASONAL_MIN: f64 = 0.5;
pub const SEASONAL_MAX: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ForecastStrategy {
    Trained(TrendSeasonalModel),
    Seasonal(SeasonalProfile),
}

impl ForecastStrategy {
    /// The fitted model if the snapshot has one, else the disease's profile
    /// (or a neutral profile centred on `current`).
    pub fn select(baseline: &BaselineSnapshot, disease: &str, current: u64) -> Self {
        if let Some(model) = baseline.model(disease) {
            return Self::Trained(model.clone());
        }
        Self::Seasonal(
            baseline
                .profile(disease)
                .cloned()
                .unwrap_or_else(|| SeasonalProfile::neutral(current as f64)),
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Trained(_) => "trained",
            Self::Seasonal(_) => "seasonal",
        }
    }

    /// Predicted case count at `target` given `current` cases today.
    pub fn forecast(&self, current: u64, target: NaiveDate, jitter: &mut Jitter) -> u64 {
        let current_f = current as f64;
        match self {
            Self::Trained(model) => model.forecast(target).max(current_f * TRAINED_FLOOR) as u64,
            Self::Seasonal(profile) => {
                let multiplier = profile.multiplier_for(target.month());
                let factor = jitter.uniform(SEASONAL_JITTER.0, SEASONAL_JITTER.1);
                let predicted = (current_f * multiplier * factor) as u64;
                let min = (current_f * SEASONAL_MIN) as u64;
                let max = (current_f * SEASONAL_MAX) as u64;
                predicted.clamp(min, max)
            }
        }
    }
}
