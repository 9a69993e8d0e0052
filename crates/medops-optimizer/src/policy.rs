//! Per-resource-type utilization policies.

use medops_types::ResourceKind;

/// Where a group's utilization falls relative to its policy thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilizationBand {
    /// Above the high threshold: grow capacity.
    Over,
    /// Below the low threshold: release capacity.
    Under,
    Normal,
}

/// Thresholds (as fractions) and scaling factors for one resource type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilizationPolicy {
    pub high_threshold: f64,
    pub low_threshold: f64,
    pub scale_up: f64,
    pub scale_down: f64,
}

impl UtilizationPolicy {
    pub const BEDS: Self = Self {
        high_threshold: 0.85,
        low_threshold: 0.40,
        scale_up: 1.10,
        scale_down: 0.90,
    };

    pub const STAFF: Self = Self {
        high_threshold: 0.90,
        low_threshold: 0.50,
        scale_up: 1.15,
        scale_down: 0.90,
    };

    pub const EQUIPMENT: Self = Self {
        high_threshold: 0.80,
        low_threshold: 0.45,
        scale_up: 1.10,
        scale_down: 0.85,
    };

    pub fn for_kind(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Beds => Self::BEDS,
            ResourceKind::Staff => Self::STAFF,
            ResourceKind::Equipment => Self::EQUIPMENT,
        }
    }

    /// Classify an unrounded utilization fraction.
    pub fn band(&self, utilization: f64) -> UtilizationBand {
        if utilization > self.high_threshold {
            UtilizationBand::Over
        } else if utilization < self.low_threshold {
            UtilizationBand::Under
        } else {
            UtilizationBand::Normal
        }
    }

    /// Proposed capacity for a group of `total` units in `band`.
    ///
    /// The under branch never proposes fewer than one unit, so a group with
    /// no capacity (utilization 0) comes out at 1.
    pub fn optimal(&self, total: u64, band: UtilizationBand) -> u64 {
        match band {
            UtilizationBand::Over => scaled(total, self.scale_up).ceil() as u64,
            UtilizationBand::Under => (scaled(total, self.scale_down).floor() as u64).max(1),
            UtilizationBand::Normal => total,
        }
    }
}

/// `total * factor`, rounded to 6 decimals so representation error
/// (20 * 1.1 = 22.000000000000004) cannot move a ceil or floor.
fn scaled(total: u64, factor: f64) -> f64 {
    (total as f64 * factor * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bands_use_strict_thresholds() {
        let p = UtilizationPolicy::BEDS;
        assert_eq!(p.band(0.95), UtilizationBand::Over);
        assert_eq!(p.band(0.85), UtilizationBand::Normal);
        assert_eq!(p.band(0.40), UtilizationBand::Normal);
        assert_eq!(p.band(0.30), UtilizationBand::Under);
    }

    #[test]
    fn scaling_ignores_representation_error() {
        let p = UtilizationPolicy::BEDS;
        assert_eq!(p.optimal(20, UtilizationBand::Over), 22);
        assert_eq!(p.optimal(25, UtilizationBand::Over), 28);
        assert_eq!(UtilizationPolicy::STAFF.optimal(10, UtilizationBand::Under), 9);
        assert_eq!(UtilizationPolicy::STAFF.optimal(20, UtilizationBand::Over), 23);
        assert_eq!(UtilizationPolicy::EQUIPMENT.optimal(18, UtilizationBand::Under), 15);
    }

    #[test]
    fn under_branch_keeps_at_least_one() {
        assert_eq!(UtilizationPolicy::EQUIPMENT.optimal(1, UtilizationBand::Under), 1);
        assert_eq!(UtilizationPolicy::BEDS.optimal(0, UtilizationBand::Under), 1);
    }

    fn policies() -> impl Strategy<Value = UtilizationPolicy> {
        prop_oneof![
            Just(UtilizationPolicy::BEDS),
            Just(UtilizationPolicy::STAFF),
            Just(UtilizationPolicy::EQUIPMENT),
        ]
    }

    proptest! {
        #[test]
        fn property_optimal_monotone_in_utilization(
            policy in policies(),
            total in 1u64..300,
            a in 0u64..300,
            b in 0u64..300,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let u_lo = lo as f64 / total as f64;
            let u_hi = hi as f64 / total as f64;
            let opt_lo = policy.optimal(total, policy.band(u_lo));
            let opt_hi = policy.optimal(total, policy.band(u_hi));
            prop_assert!(opt_lo <= opt_hi);
        }

        #[test]
        fn property_branch_direction(policy in policies(), total in 1u64..300) {
            prop_assert!(policy.optimal(total, UtilizationBand::Over) > total);
            prop_assert!(policy.optimal(total, UtilizationBand::Under) <= total);
            prop_assert_eq!(policy.optimal(total, UtilizationBand::Normal), total);
        }
    }
}
