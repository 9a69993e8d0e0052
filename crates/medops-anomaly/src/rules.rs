//! Per-metric detection rules.
//!
//! Each metric flags on one side of its mean only. Severity is decided by the
//! metric's absolute value against a fixed cut line, not by the deviation.

use medops_baseline::{category, metric};
use medops_types::{AnomalyCategory, Severity};

/// Which side of the mean counts as anomalous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Above,
    Below,
}

impl Direction {
    /// Whether `deviation = value - mean` lies on the flagged side.
    pub fn matches(&self, deviation: f64) -> bool {
        match self {
            Self::Above => deviation > 0.0,
            Self::Below => deviation < 0.0,
        }
    }
}

/// Severity assignment for a flagged value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeverityRule {
    /// `Critical` when the value exceeds the cut line, otherwise the fallback.
    CriticalAbove { cut: f64, otherwise: Severity },
    Always(Severity),
}

impl SeverityRule {
    pub fn assign(&self, value: f64) -> Severity {
        match *self {
            Self::CriticalAbove { cut, otherwise } => {
                if value > cut {
                    Severity::Critical
                } else {
                    otherwise
                }
            }
            Self::Always(severity) => severity,
        }
    }
}

/// How one metric is checked and reported.
#[derive(Debug, Clone, Copy)]
pub struct MetricRule {
    pub metric: &'static str,
    pub id_prefix: &'static str,
    pub title: &'static str,
    pub related_metric: &'static str,
    pub direction: Direction,
    pub severity: SeverityRule,
    /// Description from `(value, mean)`.
    pub describe: fn(f64, f64) -> String,
}

/// The rules and chart definition of one category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRules {
    pub category: AnomalyCategory,
    /// Key into the baseline's normal-range table.
    pub baseline_key: &'static str,
    pub rules: &'static [MetricRule],
    /// Metrics averaged into the chart's actual and normal values.
    pub chart_metrics: &'static [&'static str],
}

pub const RESOURCE_RULES: CategoryRules = CategoryRules {
    category: AnomalyCategory::Resource,
    baseline_key: category::RESOURCE,
    rules: &[
        MetricRule {
            metric: metric::BED_OCCUPANCY,
            id_prefix: "bed",
            title: "Abnormal Bed Occupancy",
            related_metric: "Bed Allocation",
            direction: Direction::Above,
            severity: SeverityRule::CriticalAbove {
                cut: 95.0,
                otherwise: Severity::Warning,
            },
            describe: describe_bed,
        },
        MetricRule {
            metric: metric::STAFF_UTILIZATION,
            id_prefix: "staff",
            title: "Staff Utilization Spike",
            related_metric: "Staff Scheduling",
            direction: Direction::Above,
            severity: SeverityRule::CriticalAbove {
                cut: 95.0,
                otherwise: Severity::Warning,
            },
            describe: describe_staff,
        },
        MetricRule {
            metric: metric::EQUIPMENT_USAGE,
            id_prefix: "equip",
            title: "Abnormal Equipment Usage",
            related_metric: "Equipment Usage",
            direction: Direction::Above,
            severity: SeverityRule::CriticalAbove {
                cut: 90.0,
                otherwise: Severity::Medium,
            },
            describe: describe_equipment,
        },
    ],
    chart_metrics: &[
        metric::BED_OCCUPANCY,
        metric::STAFF_UTILIZATION,
        metric::EQUIPMENT_USAGE,
    ],
};

pub const PATIENT_RULES: CategoryRules = CategoryRules {
    category: AnomalyCategory::Patient,
    baseline_key: category::PATIENT,
    rules: &[
        MetricRule {
            metric: metric::READMISSION_RATE,
            id_prefix: "readm",
            title: "Readmission Rate Increase",
            related_metric: "Patient Outcomes",
            direction: Direction::Above,
            severity: SeverityRule::Always(Severity::Warning),
            describe: describe_readmission,
        },
        MetricRule {
            metric: metric::LENGTH_OF_STAY,
            id_prefix: "los",
            title: "Length of Stay Increase",
            related_metric: "Patient Flow",
            direction: Direction::Above,
            severity: SeverityRule::Always(Severity::Medium),
            describe: describe_length_of_stay,
        },
        MetricRule {
            metric: metric::MEDICATION_ERRORS,
            id_prefix: "med",
            title: "Medication Error Rate Spike",
            related_metric: "Medication",
            direction: Direction::Above,
            severity: SeverityRule::CriticalAbove {
                cut: 5.0,
                otherwise: Severity::Warning,
            },
            describe: describe_medication,
        },
    ],
    chart_metrics: &[metric::READMISSION_RATE],
};

pub const FINANCIAL_RULES: CategoryRules = CategoryRules {
    category: AnomalyCategory::Financial,
    baseline_key: category::FINANCIAL,
    rules: &[
        MetricRule {
            metric: metric::DAILY_EXPENSES,
            id_prefix: "exp",
            title: "Daily Expense Spike",
            related_metric: "Expenses",
            direction: Direction::Above,
            severity: SeverityRule::Always(Severity::Warning),
            describe: describe_expenses,
        },
        MetricRule {
            metric: metric::REVENUE_PER_BED,
            id_prefix: "rev",
            title: "Revenue Per Bed Decrease",
            related_metric: "Revenue",
            direction: Direction::Below,
            severity: SeverityRule::Always(Severity::Medium),
            describe: describe_revenue,
        },
        MetricRule {
            metric: metric::SUPPLY_COSTS,
            id_prefix: "sup",
            title: "Supply Cost Variation",
            related_metric: "Supply Chain",
            direction: Direction::Above,
            severity: SeverityRule::Always(Severity::Warning),
            describe: describe_supply,
        },
    ],
    chart_metrics: &[metric::DAILY_EXPENSES],
};

// ── Descriptions ────────────────────────────────────────────────────────

fn describe_bed(v: f64, mean: f64) -> String {
    format!("Bed occupancy reached {}%, {:.1}% above normal pattern", v, v - mean)
}

fn describe_staff(v: f64, mean: f64) -> String {
    format!("Staff utilization reached {}%, {:.1}% above normal pattern", v, v - mean)
}

fn describe_equipment(v: f64, mean: f64) -> String {
    format!("Equipment usage increased to {}%, {:.1}% above normal pattern", v, v - mean)
}

fn describe_readmission(v: f64, mean: f64) -> String {
    format!("30-day readmission rate increased to {}% ({:.1}% above baseline)", v, v - mean)
}

fn describe_length_of_stay(v: f64, mean: f64) -> String {
    format!("Average length of stay increased to {} days ({:.1} days above normal)", v, v - mean)
}

fn describe_medication(v: f64, mean: f64) -> String {
    format!("Medication errors increased to {} per 100 patients ({:.1} above baseline)", v, v - mean)
}

fn describe_expenses(v: f64, mean: f64) -> String {
    format!("Daily expenses reached ${}, ${:.0} above average", v, v - mean)
}

fn describe_revenue(v: f64, mean: f64) -> String {
    format!("Revenue per bed fell to ${}, ${:.0} below average", v, mean - v)
}

fn describe_supply(v: f64, mean: f64) -> String {
    format!("Supply costs increased to ${}, ${:.0} above normal", v, v - mean)
}

pub fn rules_for(category: AnomalyCategory) -> &'static CategoryRules {
    match category {
        AnomalyCategory::Resource => &RESOURCE_RULES,
        AnomalyCategory::Patient => &PATIENT_RULES,
        AnomalyCategory::Financial => &FINANCIAL_RULES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_table() {
        let sev = |cat: AnomalyCategory, metric: &str, v: f64| {
            rules_for(cat)
                .rules
                .iter()
                .find(|r| r.metric == metric)
                .unwrap()
                .severity
                .assign(v)
        };
        use AnomalyCategory::*;
        assert_eq!(sev(Resource, metric::BED_OCCUPANCY, 98.0), Severity::Critical);
        assert_eq!(sev(Resource, metric::BED_OCCUPANCY, 95.0), Severity::Warning);
        assert_eq!(sev(Resource, metric::STAFF_UTILIZATION, 96.0), Severity::Critical);
        assert_eq!(sev(Resource, metric::EQUIPMENT_USAGE, 91.0), Severity::Critical);
        assert_eq!(sev(Resource, metric::EQUIPMENT_USAGE, 90.0), Severity::Medium);
        assert_eq!(sev(Patient, metric::READMISSION_RATE, 50.0), Severity::Warning);
        assert_eq!(sev(Patient, metric::LENGTH_OF_STAY, 50.0), Severity::Medium);
        assert_eq!(sev(Patient, metric::MEDICATION_ERRORS, 5.5), Severity::Critical);
        assert_eq!(sev(Patient, metric::MEDICATION_ERRORS, 4.9), Severity::Warning);
        assert_eq!(sev(Financial, metric::DAILY_EXPENSES, 1e6), Severity::Warning);
        assert_eq!(sev(Financial, metric::REVENUE_PER_BED, 0.0), Severity::Medium);
        assert_eq!(sev(Financial, metric::SUPPLY_COSTS, 1e6), Severity::Warning);
    }

    #[test]
    fn only_revenue_flags_below() {
        let below: Vec<_> = AnomalyCategory::ALL
            .iter()
            .flat_map(|c| rules_for(*c).rules.iter())
            .filter(|r| r.direction == Direction::Below)
            .map(|r| r.metric)
            .collect();
        assert_eq!(below, vec![metric::REVENUE_PER_BED]);
    }

    #[test]
    fn description_texts() {
        let bed = &RESOURCE_RULES.rules[0];
        assert_eq!(
            (bed.describe)(98.0, 75.0),
            "Bed occupancy reached 98%, 23.0% above normal pattern"
        );
        let rev = &FINANCIAL_RULES.rules[1];
        assert_eq!(
            (rev.describe)(2000.0, 3200.0),
            "Revenue per bed fell to $2000, $1200 below average"
        );
        let los = &PATIENT_RULES.rules[1];
        assert_eq!(
            (los.describe)(6.5, 4.2),
            "Average length of stay increased to 6.5 days (2.3 days above normal)"
        );
    }
}
