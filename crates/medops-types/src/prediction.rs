//! Outbreak predictions and monthly trend points.

use serde::{Deserialize, Serialize};

/// Short-term outbreak risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Sort rank: High first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Forecast for one disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub disease: String,
    pub risk_level: RiskLevel,
    pub current_cases: u64,
    pub predicted_cases: u64,
    pub change_percentage: i64,
    pub confidence: u32,
}

impl Prediction {
    /// `change_percentage × confidence / 100`, used to pick the highest-risk disease.
    pub fn risk_score(&self) -> f64 {
        self.change_percentage as f64 * f64::from(self.confidence) / 100.0
    }
}

/// One month of the highest-risk disease's trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: String,
    pub last_year: u64,
    pub current_year: u64,
    pub is_prediction: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_rank_orders_high_first() {
        assert!(RiskLevel::High.rank() < RiskLevel::Medium.rank());
        assert!(RiskLevel::Medium.rank() < RiskLevel::Low.rank());
    }

    #[test]
    fn prediction_wire_format() {
        let p = Prediction {
            disease: "Influenza".into(),
            risk_level: RiskLevel::High,
            current_cases: 20,
            predicted_cases: 60,
            change_percentage: 200,
            confidence: 82,
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["riskLevel"], "High");
        assert_eq!(v["predictedCases"], 60);
        assert_eq!(v["changePercentage"], 200);
        assert!((p.risk_score() - 164.0).abs() < 1e-9);
    }

    #[test]
    fn trend_point_wire_format() {
        let t = TrendPoint {
            month: "Jan".into(),
            last_year: 10,
            current_year: 12,
            is_prediction: false,
        };
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["lastYear"], 10);
        assert_eq!(v["isPrediction"], false);
    }
}
