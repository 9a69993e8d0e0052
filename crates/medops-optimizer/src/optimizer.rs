//! Resource optimization: per-group policy, aggregation, recommendation texts.

use medops_types::recommendation::slug;
use medops_types::{round1, Impact, Recommendation, ResourceKind, ResourceScope, ResourceSnapshot};
use tracing::debug;

use crate::policy::{UtilizationBand, UtilizationPolicy};
use crate::report::{ChartRecord, OptimizationReport, ResourceSummary};

/// Summaries and recommendations for every selected resource type.
///
/// Unselected types, and selected types with no groups, get the zero-valued
/// placeholder summary.
pub fn optimize(
    beds: &[ResourceSnapshot],
    staff: &[ResourceSnapshot],
    equipment: &[ResourceSnapshot],
    scope: ResourceScope,
) -> OptimizationReport {
    let mut report = OptimizationReport::default();

    for (kind, groups) in [
        (ResourceKind::Beds, beds),
        (ResourceKind::Staff, staff),
        (ResourceKind::Equipment, equipment),
    ] {
        if !scope.includes(kind) || groups.is_empty() {
            continue;
        }
        let (summary, recommendations) = optimize_kind(kind, groups);
        *report.resources.get_mut(kind) = summary;
        report.recommendations.extend(recommendations);
    }

    debug!(
        scope = ?scope,
        recommendations = report.recommendations.len(),
        "resource optimization complete"
    );
    report
}

/// Optimize the groups of one resource type.
pub fn optimize_kind(
    kind: ResourceKind,
    groups: &[ResourceSnapshot],
) -> (ResourceSummary, Vec<Recommendation>) {
    if groups.is_empty() {
        return (ResourceSummary::placeholder(), Vec::new());
    }

    let policy = UtilizationPolicy::for_kind(kind);
    let mut recommendations = Vec::new();
    let mut chart_data = Vec::with_capacity(groups.len());

    for group in groups {
        let utilization = group.utilization();
        let band = policy.band(utilization);
        let optimal = policy.optimal(group.total_count, band);

        if band != UtilizationBand::Normal {
            debug!(
                kind = %kind,
                group = %group.group_name,
                utilization = utilization,
                optimal = optimal,
                "group outside utilization band"
            );
            recommendations.push(group_recommendation(kind, band, group, optimal));
        }

        chart_data.push(ChartRecord {
            group_name: group.group_name.clone(),
            current: group.total_count,
            optimal,
        });
    }

    if kind == ResourceKind::Equipment {
        recommendations.push(scheduling_recommendation());
    }

    let current: u64 = groups.iter().map(|g| g.total_count).sum();
    let used: u64 = groups.iter().map(|g| g.used_count).sum();
    let optimal: u64 = chart_data.iter().map(|c| c.optimal).sum();

    let utilization = round1(percent(used, current));
    let optimal_utilization = round1(percent(used, optimal));

    let summary = ResourceSummary {
        current,
        optimal,
        utilization,
        recommendations: recommendations.iter().map(|r| r.title.clone()).collect(),
        utilization_improvement: format!("{:.1}%", (optimal_utilization - utilization).abs()),
        chart_data,
    };
    (summary, recommendations)
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

// ── Recommendation texts ────────────────────────────────────────────────

fn group_recommendation(
    kind: ResourceKind,
    band: UtilizationBand,
    group: &ResourceSnapshot,
    optimal: u64,
) -> Recommendation {
    let name = group.group_name.as_str();
    let util = format!("{:.1}", group.utilization() * 100.0);
    let delta = optimal.abs_diff(group.total_count);
    let over = band == UtilizationBand::Over;

    let (id, title, description, action) = match (kind, over) {
        (ResourceKind::Beds, true) => (
            format!("bed-{}", slug(name)),
            format!("Increase bed capacity in {} ward", name),
            format!(
                "{} is at {}% capacity. Consider adding {} beds or redistributing patients.",
                name, util, delta
            ),
            format!("Add {} beds to improve patient flow", delta),
        ),
        (ResourceKind::Beds, false) => (
            format!("bed-realloc-{}", slug(name)),
            format!("Reallocate beds from {} ward", name),
            format!(
                "{} is at only {}% capacity. Consider reallocating {} beds to high-demand areas.",
                name, util, delta
            ),
            format!("Reallocate {} beds to optimize resource use", delta),
        ),
        (ResourceKind::Staff, true) => (
            format!("staff-{}", slug(name)),
            format!("Increase {} staffing", name),
            format!(
                "{}s are currently overutilized at {}%. Increase staffing to reduce burnout and improve care quality.",
                name, util
            ),
            format!("Hire {} additional {}s", delta, name),
        ),
        (ResourceKind::Staff, false) => (
            format!("staff-realloc-{}", slug(name)),
            format!("Optimize {} scheduling", name),
            format!(
                "{}s are currently underutilized at {}%. Consider schedule optimization or cross-training.",
                name, util
            ),
            format!("Redistribute {} schedules or reassign to high-demand areas", name),
        ),
        (ResourceKind::Equipment, true) => (
            format!("equip-{}", slug(name)),
            format!("Increase {} availability", name),
            format!(
                "{} equipment is highly utilized at {}%. Consider acquiring additional units to reduce bottlenecks.",
                name, util
            ),
            format!("Acquire {} additional {} units", delta, name),
        ),
        (ResourceKind::Equipment, false) => (
            format!("equip-realloc-{}", slug(name)),
            format!("Reduce {} equipment count", name),
            format!(
                "{} equipment is underutilized at {}%. Consider reallocating or replacing with multi-purpose units.",
                name, util
            ),
            format!("Reallocate {} {} units to high-demand areas", delta, name),
        ),
    };

    Recommendation::builder(id)
        .resource(resource_label(kind))
        .area(name)
        .title(title)
        .impact(if over { Impact::High } else { Impact::Medium })
        .description(description)
        .action_required(action)
        .build()
}

fn scheduling_recommendation() -> Recommendation {
    Recommendation::builder("equip-scheduling")
        .resource(resource_label(ResourceKind::Equipment))
        .area("Scheduling")
        .title("Implement equipment scheduling system")
        .impact(Impact::High)
        .description(
            "A centralized equipment scheduling system could increase utilization by 15-20% across all categories.",
        )
        .action_required("Deploy scheduling system to improve resource tracking and utilization")
        .build()
}

fn resource_label(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Beds => "Beds",
        ResourceKind::Staff => "Staff",
        ResourceKind::Equipment => "Equipment",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bed(name: &str, total: u64, used: u64) -> ResourceSnapshot {
        ResourceSnapshot::new(name, total, used, total.saturating_sub(used))
    }

    #[test]
    fn icu_over_capacity() {
        let report = optimize(&[bed("ICU", 20, 19)], &[], &[], ResourceScope::All);
        let beds = &report.resources.beds;
        assert_eq!(beds.current, 20);
        assert_eq!(beds.optimal, 22);
        assert_eq!(beds.utilization, 95.0);
        assert_eq!(beds.chart_data[0].optimal, 22);

        assert_eq!(report.recommendations.len(), 1);
        let rec = &report.recommendations[0];
        assert_eq!(rec.id, "bed-icu");
        assert_eq!(rec.impact, Impact::High);
        assert_eq!(rec.title, "Increase bed capacity in ICU ward");
        assert_eq!(
            rec.description,
            "ICU is at 95.0% capacity. Consider adding 2 beds or redistributing patients."
        );
        assert_eq!(rec.action_required, "Add 2 beds to improve patient flow");
        // 19/22 = 86.4%, 95.0 - 86.4
        assert_eq!(beds.utilization_improvement, "8.6%");
    }

    #[test]
    fn admin_staff_underused() {
        let report = optimize(
            &[],
            &[ResourceSnapshot::new("Admin", 10, 3, 7)],
            &[],
            ResourceScope::Staff,
        );
        let staff = &report.resources.staff;
        assert_eq!(staff.utilization, 30.0);
        assert_eq!(staff.optimal, 9);
        assert_eq!(report.recommendations.len(), 1);
        let rec = &report.recommendations[0];
        assert_eq!(rec.id, "staff-realloc-admin");
        assert_eq!(rec.impact, Impact::Medium);
        assert_eq!(rec.resource, "Staff");
        assert_eq!(staff.recommendations, vec!["Optimize Admin scheduling".to_string()]);
    }

    #[test]
    fn empty_equipment_yields_placeholder() {
        let report = optimize(&[], &[], &[], ResourceScope::Equipment);
        assert_eq!(report.resources.equipment, ResourceSummary::placeholder());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn unselected_types_are_placeholders() {
        let report = optimize(
            &[bed("ICU", 20, 19)],
            &[ResourceSnapshot::new("Nurse", 35, 34, 1)],
            &[],
            ResourceScope::Beds,
        );
        assert_eq!(report.resources.staff, ResourceSummary::placeholder());
        assert_eq!(report.resources.equipment, ResourceSummary::placeholder());
        assert!(report.recommendations.iter().all(|r| r.resource == "Beds"));
    }

    #[test]
    fn equipment_always_gets_scheduling() {
        let equipment = [ResourceSnapshot::new("Ultrasound", 10, 7, 3)];
        let report = optimize(&[], &[], &equipment, ResourceScope::All);
        assert_eq!(report.recommendations.len(), 1);
        let rec = &report.recommendations[0];
        assert_eq!(rec.id, "equip-scheduling");
        assert_eq!(rec.area, "Scheduling");
        assert_eq!(rec.impact, Impact::High);
        assert_eq!(report.resources.equipment.optimal, 10);
        assert_eq!(report.resources.equipment.utilization_improvement, "0.0%");
    }

    #[test]
    fn equipment_ids_slug_names() {
        let equipment = [
            ResourceSnapshot::new("X-ray", 18, 2, 16),
            ResourceSnapshot::new("CT Scan", 4, 4, 0),
        ];
        let report = optimize(&[], &[], &equipment, ResourceScope::Equipment);
        let ids: Vec<_> = report.recommendations.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["equip-realloc-x-ray", "equip-ct-scan", "equip-scheduling"]);
        assert_eq!(
            report.recommendations[0].action_required,
            "Reallocate 3 X-ray units to high-demand areas"
        );
        assert_eq!(
            report.recommendations[1].action_required,
            "Acquire 1 additional CT Scan units"
        );
    }

    #[test]
    fn chart_lists_every_group() {
        let beds = [bed("ICU", 25, 22), bed("General", 60, 45), bed("Pediatric", 20, 8)];
        let report = optimize(&beds, &[], &[], ResourceScope::All);
        let chart = &report.resources.beds.chart_data;
        assert_eq!(chart.len(), 3);
        assert_eq!(chart[1].group_name, "General");
        assert_eq!(chart[1].current, chart[1].optimal);
        // ICU 88% -> 28, General 75% -> 60, Pediatric 40% stays (strict threshold).
        assert_eq!(report.resources.beds.optimal, 28 + 60 + 20);
    }

    #[test]
    fn zero_capacity_group_falls_in_low_band() {
        let report = optimize(&[bed("Closed", 0, 0)], &[], &[], ResourceScope::All);
        let beds = &report.resources.beds;
        assert_eq!(beds.utilization, 0.0);
        assert_eq!(beds.optimal, 1);
        assert_eq!(beds.chart_data[0].optimal, 1);

        assert_eq!(report.recommendations.len(), 1);
        let rec = &report.recommendations[0];
        assert_eq!(rec.id, "bed-realloc-closed");
        assert_eq!(rec.impact, Impact::Medium);
    }

    #[test]
    fn identical_input_identical_output() {
        let beds = [bed("ICU", 20, 19), bed("ER", 15, 4)];
        let a = serde_json::to_string(&optimize(&beds, &[], &[], ResourceScope::All)).unwrap();
        let b = serde_json::to_string(&optimize(&beds, &[], &[], ResourceScope::All)).unwrap();
        assert_eq!(a, b);
    }
}
