//! Optimization report shapes.

use medops_types::{Recommendation, ResourceKind};
use serde::{Deserialize, Serialize};

/// Current vs proposed capacity for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRecord {
    pub group_name: String,
    pub current: u64,
    pub optimal: u64,
}

/// Aggregate view of one resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    /// Σ total over all groups.
    pub current: u64,
    /// Σ optimal over all groups.
    pub optimal: u64,
    /// Overall utilization in percent, one decimal.
    pub utilization: f64,
    /// Titles of this type's recommendations.
    pub recommendations: Vec<String>,
    /// `|optimal utilization - utilization|`, e.g. `"8.6%"`.
    pub utilization_improvement: String,
    pub chart_data: Vec<ChartRecord>,
}

impl ResourceSummary {
    /// Zero-valued summary for an unselected or empty resource type.
    pub fn placeholder() -> Self {
        Self {
            current: 0,
            optimal: 0,
            utilization: 0.0,
            recommendations: Vec::new(),
            utilization_improvement: "0%".to_string(),
            chart_data: Vec::new(),
        }
    }
}

impl Default for ResourceSummary {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// One summary per resource type. All three keys are always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSummaries {
    pub beds: ResourceSummary,
    pub staff: ResourceSummary,
    pub equipment: ResourceSummary,
}

impl ResourceSummaries {
    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut ResourceSummary {
        match kind {
            ResourceKind::Beds => &mut self.beds,
            ResourceKind::Staff => &mut self.staff,
            ResourceKind::Equipment => &mut self.equipment,
        }
    }
}

/// Result of one `optimize` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub resources: ResourceSummaries,
    /// Recommendations across all analyzed types, beds then staff then equipment.
    pub recommendations: Vec<Recommendation>,
}
