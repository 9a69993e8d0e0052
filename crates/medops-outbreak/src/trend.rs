//! Monthly trend chart for the highest-risk disease.
//!
//! Eighteen points: the twelve months before the current month, then six
//! forecast months starting at the current month. Built in two passes:
//!
//! ```text
//!   pass 1  every month: last_year = base · mult · rf / trend
//!           past months: current_year = base · mult · trend · rf
//!   pass 2  forecast months: current_year = last_year · trend · bump
//! ```
//!
//! `rf` is drawn from [0.9, 1.1] and `bump` from [1.1, 1.5].

use medops_baseline::SeasonalProfile;
use medops_types::TrendPoint;

use crate::jitter::Jitter;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const PAST_MONTHS: u32 = 12;
pub const FORECAST_MONTHS: u32 = 6;

const VARIATION: (f64, f64) = (0.9, 1.1);
const FORECAST_BUMP: (f64, f64) = (1.1, 1.5);

/// Calendar months (1..=12) of the chart, oldest first.
pub fn chart_months(current_month: u32) -> Vec<(u32, bool)> {
    let past = (0..PAST_MONTHS).map(|i| (wrap(current_month + i), false));
    let forecast = (0..FORECAST_MONTHS).map(|i| (wrap(current_month + i), true));
    past.chain(forecast).collect()
}

/// Month number 1..=12 for an offset that may exceed 12.
fn wrap(month: u32) -> u32 {
    (month.saturating_sub(1) % 12) + 1
}

pub fn monthly_trend(profile: &SeasonalProfile, current_month: u32, jitter: &mut Jitter) -> Vec<TrendPoint> {
    let base = profile.baseline_value;
    let trend = if profile.year_trend > 0.0 { profile.year_trend } else { 1.0 };

    let mut points: Vec<TrendPoint> = chart_months(current_month)
        .into_iter()
        .map(|(month, is_prediction)| {
            let multiplier = profile.multiplier_for(month);
            let rf = jitter.uniform(VARIATION.0, VARIATION.1);
            let last_year = (base * multiplier * rf / trend) as u64;
            let current_year = if is_prediction {
                0
            } else {
                (base * multiplier * trend * rf) as u64
            };
            TrendPoint {
                month: MONTH_NAMES[(month - 1) as usize].to_string(),
                last_year,
                current_year,
                is_prediction,
            }
        })
        .collect();

    for point in points.iter_mut().filter(|p| p.is_prediction) {
        let bump = jitter.uniform(FORECAST_BUMP.0, FORECAST_BUMP.1);
        point.current_year = (point.last_year as f64 * trend * bump) as u64;
    }

    points
}
