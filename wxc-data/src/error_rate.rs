//! Forecast accuracy: per-date absolute errors and their averages.

use chrono::NaiveDate;
use serde::{ser::SerializeMap, Serialize, Serializer};
use std::collections::BTreeMap;
use wxc_providers::{daily_summary::DailySummary, date_range::DateRange, provider::Provider};

/// Observed precipitation above this value counts as "it rained".
pub const PRECIPITATION_THRESHOLD: f64 = 50.0;

/// Map an observed precipitation value onto 0 or 100.
pub fn binarize_precipitation(value: f64) -> f64 {
    if value > PRECIPITATION_THRESHOLD {
        100.0
    } else {
        0.0
    }
}

/// Temperature and precipitation error for one provider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProviderError {
    pub temp_error: Option<f64>,
    pub precip_error: Option<f64>,
}

/// Errors of every scored provider on one observed date.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRateEntry {
    pub date: NaiveDate,
    pub errors: BTreeMap<Provider, ProviderError>,
}

/// Mean error per provider over the requested range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorAverages(pub BTreeMap<Provider, ProviderError>);

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRateReport {
    pub per_date: Vec<ErrorRateEntry>,
    pub averages: ErrorAverages,
}

impl ErrorRateReport {
    pub fn average(&self, provider: Provider) -> ProviderError {
        self.averages.0.get(&provider).copied().unwrap_or_default()
    }
}

fn serialize_flat<M: SerializeMap>(
    map: &mut M,
    errors: &BTreeMap<Provider, ProviderError>,
) -> Result<(), M::Error> {
    for (provider, error) in errors {
        map.serialize_entry(&format!("{}TempError", provider.key()), &error.temp_error)?;
        map.serialize_entry(&format!("{}PrecipError", provider.key()), &error.precip_error)?;
    }
    Ok(())
}

/// Serialized flat, e.g. `{"date": "2024-01-01", "kmaTempError": 2.0, ...}`.
impl Serialize for ErrorRateEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.errors.len() * 2))?;
        map.serialize_entry("date", &self.date)?;
        serialize_flat(&mut map, &self.errors)?;
        map.end()
    }
}

impl Serialize for ErrorAverages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len() * 2))?;
        serialize_flat(&mut map, &self.0)?;
        map.end()
    }
}

fn within<'a>(series: &'a [DailySummary], range: &DateRange) -> Vec<&'a DailySummary> {
    series.iter().filter(|s| range.contains(&s.date)).collect()
}

fn error_for(actual: &DailySummary, forecast: Option<&&DailySummary>) -> ProviderError {
    let Some(forecast) = forecast else {
        return ProviderError::default();
    };
    ProviderError {
        temp_error: match (forecast.avg_temp, actual.avg_temp) {
            (Some(f), Some(a)) => Some((f - a).abs()),
            _ => None,
        },
        precip_error: match (forecast.precip_prob, actual.precip_prob) {
            (Some(f), Some(a)) => Some((f - binarize_precipitation(a)).abs()),
            _ => None,
        },
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Score every forecast series against the observations inside `range`.
///
/// One entry per observed date in range; each provider is joined on the
/// first forecast with the same date. A missing side gives `None`, and
/// averages skip `None`.
pub fn compute_error_rates(
    actual: &[DailySummary],
    forecasts: &BTreeMap<Provider, Vec<DailySummary>>,
    range: DateRange,
) -> ErrorRateReport {
    let observed = within(actual, &range);
    let filtered: BTreeMap<Provider, Vec<&DailySummary>> = forecasts
        .iter()
        .map(|(provider, series)| (*provider, within(series, &range)))
        .collect();

    let per_date: Vec<ErrorRateEntry> = observed
        .iter()
        .map(|day| ErrorRateEntry {
            date: day.date,
            errors: filtered
                .iter()
                .map(|(provider, series)| {
                    let forecast = series.iter().find(|f| f.date == day.date);
                    (*provider, error_for(day, forecast))
                })
                .collect(),
        })
        .collect();

    let averages = filtered
        .keys()
        .map(|provider| {
            let column = || per_date.iter().filter_map(|entry| entry.errors.get(provider));
            let average = ProviderError {
                temp_error: mean(column().filter_map(|e| e.temp_error)),
                precip_error: mean(column().filter_map(|e| e.precip_error)),
            };
            (*provider, average)
        })
        .collect();

    log::debug!(
        "[WXC Debug] error_rate: scored {} observed days from {} to {}",
        per_date.len(),
        range.start(),
        range.end()
    );
    ErrorRateReport {
        per_date,
        averages: ErrorAverages(averages),
    }
}
