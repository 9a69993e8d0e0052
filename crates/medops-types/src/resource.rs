//! Resource snapshots: one record per bed ward, staff role or equipment category.

use serde::{Deserialize, Serialize};

use crate::lenient::{count_or_zero, string_or_empty};

/// The three resource types the optimizer reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Beds,
    Staff,
    Equipment,
}

impl ResourceKind {
    /// All kinds in report order.
    pub const ALL: [ResourceKind; 3] = [Self::Beds, Self::Staff, Self::Equipment];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beds => "beds",
            Self::Staff => "staff",
            Self::Equipment => "equipment",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current counts for one group within a resource type.
///
/// Accepts the field names produced by each fetch source: a bed ward
/// (`ward`/`occupied`), a staff role (`type`/`onDuty`) or an equipment
/// category (`category`/`inUse`). `used + available <= total` is expected
/// but not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    #[serde(
        default,
        alias = "ward",
        alias = "type",
        alias = "role",
        alias = "category",
        alias = "groupName",
        deserialize_with = "string_or_empty"
    )]
    pub group_name: String,

    #[serde(
        default,
        alias = "total",
        alias = "totalCount",
        deserialize_with = "count_or_zero"
    )]
    pub total_count: u64,

    #[serde(
        default,
        alias = "occupied",
        alias = "onDuty",
        alias = "inUse",
        alias = "used",
        alias = "usedCount",
        deserialize_with = "count_or_zero"
    )]
    pub used_count: u64,

    #[serde(
        default,
        alias = "available",
        alias = "availableCount",
        deserialize_with = "count_or_zero"
    )]
    pub available_count: u64,
}

impl ResourceSnapshot {
    pub fn new(group_name: impl Into<String>, total: u64, used: u64, available: u64) -> Self {
        Self {
            group_name: group_name.into(),
            total_count: total,
            used_count: used,
            available_count: available,
        }
    }

    /// `used / total`, or 0 when the group has no capacity.
    pub fn utilization(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.used_count as f64 / self.total_count as f64
        }
    }
}
