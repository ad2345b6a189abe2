//! Aggregation, comparison and accuracy scoring for multi-provider forecasts.
//!
//! This crate turns normalized provider entries into per-day aggregates,
//! lines providers up against each other, and scores daily forecasts
//! against observed weather.
//!
//! ```
//! use chrono::NaiveDate;
//! use std::collections::BTreeMap;
//! use wxc_data::error_rate::compute_error_rates;
//! use wxc_providers::{daily_summary::DailySummary, date_range::DateRange, provider::Provider};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let mut actual = DailySummary::new(day);
//! actual.avg_temp = Some(5.0);
//! actual.precip_prob = Some(60.0);
//! let mut forecast = DailySummary::new(day);
//! forecast.avg_temp = Some(7.0);
//! forecast.precip_prob = Some(80.0);
//!
//! let forecasts = BTreeMap::from([(Provider::Kma, vec![forecast])]);
//! let report = compute_error_rates(&[actual], &forecasts, DateRange(day, day));
//! assert_eq!(report.average(Provider::Kma).temp_error, Some(2.0));
//! assert_eq!(report.average(Provider::Kma).precip_error, Some(20.0));
//! ```

pub mod aggregate;
pub mod dataset;
pub mod error_rate;
pub mod unify;

/// Linear interpolation for filling gaps in daily summary series.
pub mod interpolation {
    use chrono::NaiveDate;
    use wxc_providers::{daily_summary::DailySummary, date_range::DateRange};

    fn lerp(start: Option<f64>, end: Option<f64>, factor: f64) -> Option<f64> {
        match (start, end) {
            (Some(a), Some(b)) => Some(a + (b - a) * factor),
            _ => None,
        }
    }

    /// Interpolate every numeric field between two summaries for `date`.
    ///
    /// `date` should lie between the two; a zero-day span returns `start`'s values.
    pub fn interpolate_between(
        start: &DailySummary,
        end: &DailySummary,
        date: NaiveDate,
    ) -> DailySummary {
        let days = (end.date - start.date).num_days();
        if days <= 0 {
            return DailySummary { date, ..start.clone() };
        }
        let factor = (date - start.date).num_days() as f64 / days as f64;
        DailySummary {
            date,
            avg_temp: lerp(start.avg_temp, end.avg_temp, factor),
            min_temp: lerp(start.min_temp, end.min_temp, factor),
            max_temp: lerp(start.max_temp, end.max_temp, factor),
            precip_prob: lerp(start.precip_prob, end.precip_prob, factor),
        }
    }

    /// One summary per date in `start..=end`.
    ///
    /// Exact matches are kept; gaps with data on both sides are linearly
    /// interpolated; gaps at either edge copy the nearest available day.
    /// An empty series yields nothing.
    pub fn fill_range(
        series: &[DailySummary],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<DailySummary> {
        if series.is_empty() {
            return Vec::new();
        }
        let mut sorted: Vec<&DailySummary> = series.iter().collect();
        sorted.sort_by_key(|summary| summary.date);

        DateRange(start, end)
            .map(|date| {
                if let Some(exact) = sorted.iter().find(|s| s.date == date) {
                    return (*exact).clone();
                }
                let previous = sorted.iter().rev().find(|s| s.date < date);
                let next = sorted.iter().find(|s| s.date > date);
                match (previous, next) {
                    (Some(p), Some(n)) => interpolate_between(p, n, date),
                    (Some(nearest), None) | (None, Some(nearest)) => DailySummary {
                        date,
                        ..(*nearest).clone()
                    },
                    // series is non-empty, so one side always exists
                    (None, None) => DailySummary::new(date),
                }
            })
            .collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn day(d: u32) -> NaiveDate {
            NaiveDate::from_ymd_opt(2024, 12, d).unwrap()
        }

        fn summary(d: u32, avg: f64, precip: f64) -> DailySummary {
            DailySummary {
                date: day(d),
                avg_temp: Some(avg),
                min_temp: Some(avg - 3.0),
                max_temp: Some(avg + 3.0),
                precip_prob: Some(precip),
            }
        }

        #[test]
        fn test_interpolate_between() {
            let start = summary(10, 2.0, 0.0);
            let end = summary(14, 10.0, 80.0);
            let mid = interpolate_between(&start, &end, day(11));
            assert_eq!(mid.avg_temp, Some(4.0));
            assert_eq!(mid.precip_prob, Some(20.0));
            assert_eq!(mid.max_temp, Some(7.0));
        }

        #[test]
        fn test_fill_range_gaps_and_edges() {
            let series = vec![summary(12, 4.0, 0.0), summary(10, 2.0, 20.0)];
            let filled = fill_range(&series, day(9), day(13));
            assert_eq!(filled.len(), 5);
            // before the first day: nearest copy
            assert_eq!(filled[0].date, day(9));
            assert_eq!(filled[0].avg_temp, Some(2.0));
            // exact
            assert_eq!(filled[1], series[1]);
            // interpolated
            assert_eq!(filled[2].avg_temp, Some(3.0));
            assert_eq!(filled[2].precip_prob, Some(10.0));
            // after the last day: nearest copy
            assert_eq!(filled[4].date, day(13));
            assert_eq!(filled[4].avg_temp, Some(4.0));
        }

        #[test]
        fn test_missing_field_stays_missing() {
            let mut start = summary(10, 2.0, 20.0);
            start.precip_prob = None;
            let end = summary(12, 4.0, 0.0);
            let filled = fill_range(&[start, end], day(10), day(12));
            assert_eq!(filled[1].avg_temp, Some(3.0));
            assert_eq!(filled[1].precip_prob, None);
        }

        #[test]
        fn test_fill_range_empty_series() {
            assert!(fill_range(&[], day(1), day(5)).is_empty());
        }
    }
}
