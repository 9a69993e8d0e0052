//! Fitted case-count forecast model.
//!
//! A least-squares linear trend over days since the first observation,
//! scaled by a multiplicative index per calendar month:
//!
//! ```text
//!   forecast(d) = max(0, (intercept + slope * days(d)) * index[month(d)])
//! ```
//!
//! Months without observations keep an index of 1.0.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Parse the day portion of an ISO-8601 date or date-time string.
pub fn parse_day(date: &str) -> Option<NaiveDate> {
    let day = date.split('T').next().unwrap_or(date).trim();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendSeasonalModel {
    pub origin: NaiveDate,
    pub intercept: f64,
    pub slope_per_day: f64,
    pub monthly_index: [f64; 12],
    pub last_observed: NaiveDate,
    pub observations: usize,
}

impl TrendSeasonalModel {
    /// Fit to `(date, cases)` observations.
    ///
    /// Returns `None` unless there are at least two distinct dates.
    pub fn fit(points: &[(NaiveDate, f64)]) -> Option<Self> {
        let origin = points.iter().map(|(d, _)| *d).min()?;
        let last_observed = points.iter().map(|(d, _)| *d).max()?;
        if origin == last_observed {
            return None;
        }

        let n = points.len() as f64;
        let xs: Vec<f64> = points
            .iter()
            .map(|(d, _)| (*d - origin).num_days() as f64)
            .collect();
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| *y).sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (x, (_, y)) in xs.iter().zip(points) {
            sxx += (x - mean_x).powi(2);
            sxy += (x - mean_x) * (y - mean_y);
        }
        if sxx <= 0.0 {
            return None;
        }
        let slope_per_day = sxy / sxx;
        let intercept = mean_y - slope_per_day * mean_x;

        let mut sums = [0.0_f64; 12];
        let mut counts = [0_u32; 12];
        for (x, (date, y)) in xs.iter().zip(points) {
            let trend = intercept + slope_per_day * x;
            if trend > f64::EPSILON {
                let slot = date.month0() as usize;
                sums[slot] += y / trend;
                counts[slot] += 1;
            }
        }
        let mut monthly_index = [1.0_f64; 12];
        for (slot, index) in monthly_index.iter_mut().enumerate() {
            if counts[slot] > 0 {
                *index = sums[slot] / f64::from(counts[slot]);
            }
        }

        Some(Self {
            origin,
            intercept,
            slope_per_day,
            monthly_index,
            last_observed,
            observations: points.len(),
        })
    }

    /// Linear trend component at `date`.
    pub fn trend_at(&self, date: NaiveDate) -> f64 {
        let x = (date - self.origin).num_days() as f64;
        self.intercept + self.slope_per_day * x
    }

    /// Point estimate of cases at `date`, never negative.
    pub fn forecast(&self, date: NaiveDate) -> f64 {
        let index = self.monthly_index[date.month0() as usize];
        (self.trend_at(date) * index).max(0.0)
    }
}
