//! Risk classification and confidence bands.

use medops_types::{Prediction, RiskLevel};
use serde::{Deserialize, Serialize};

use crate::jitter::Jitter;

/// `round(100 · (predicted − current) / current)`, with `current` raised to at least 1.
pub fn change_percentage(current: u64, predicted: u64) -> i64 {
    let current = current.max(1) as f64;
    (100.0 * (predicted as f64 - current) / current).round() as i64
}

/// High: change > 50 and predicted > 30. Medium: change > 25 or predicted > 50. Else Low.
pub fn classify(change_percentage: i64, predicted: u64) -> RiskLevel {
    if change_percentage > 50 && predicted > 30 {
        RiskLevel::High
    } else if change_percentage > 25 || predicted > 50 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Inclusive confidence range in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub min: u32,
    pub max: u32,
}

impl ConfidenceBand {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Confidence range per risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceBands {
    pub high: ConfidenceBand,
    pub medium: ConfidenceBand,
    pub low: ConfidenceBand,
}

impl Default for ConfidenceBands {
    fn default() -> Self {
        Self {
            high: ConfidenceBand::new(75, 90),
            medium: ConfidenceBand::new(65, 80),
            low: ConfidenceBand::new(55, 70),
        }
    }
}

impl ConfidenceBands {
    pub fn band(&self, risk: RiskLevel) -> ConfidenceBand {
        match risk {
            RiskLevel::High => self.high,
            RiskLevel::Medium => self.medium,
            RiskLevel::Low => self.low,
        }
    }

    /// Draw a confidence score for `risk`; the band midpoint when jitter is disabled.
    pub fn confidence(&self, risk: RiskLevel, jitter: &mut Jitter) -> u32 {
        let band = self.band(risk);
        jitter.integer(band.min, band.max.max(band.min))
    }
}

/// Sort by tier (High first), then by descending change. Stable.
pub fn rank(predictions: &mut [Prediction]) {
    predictions.sort_by(|a, b| {
        a.risk_level
            .rank()
            .cmp(&b.risk_level.rank())
            .then(b.change_percentage.cmp(&a.change_percentage))
    });
}
