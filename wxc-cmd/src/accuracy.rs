//! Forecast accuracy report and daily-summary series export.

use crate::render::{self, pad};
use chrono::NaiveDate;
use std::fmt::Write;
use wxc_data::{
    dataset::WeatherDataSet,
    error_rate::{compute_error_rates, ErrorRateReport, ProviderError},
    interpolation::fill_range,
};
use wxc_providers::{daily_summary::DailySummary, date_range::DateRange, provider::Provider};

fn error_cells(error: ProviderError) -> String {
    format!(
        "{}{}",
        pad(&render::temperature(error.temp_error), 9),
        pad(&render::percent(error.precip_error), 6)
    )
}

fn text_report(report: &ErrorRateReport, providers: &[Provider]) -> String {
    let mut out = String::new();
    let mut header = pad("date", 12);
    for provider in providers {
        header.push_str(&pad(provider.label(), 15));
    }
    let _ = writeln!(out, "{}", header.trim_end());
    for entry in &report.per_date {
        let mut line = pad(&entry.date.to_string(), 12);
        for provider in providers {
            let error = entry.errors.get(provider).copied().unwrap_or_default();
            line.push_str(&error_cells(error));
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
    let mut line = pad("average", 12);
    for provider in providers {
        line.push_str(&error_cells(report.average(*provider)));
    }
    let _ = writeln!(out, "{}", line.trim_end());
    out
}

/// Error rates of every scored provider between `from` and `to` inclusive.
pub fn render_errors(
    data: &WeatherDataSet,
    from: NaiveDate,
    to: NaiveDate,
    json: bool,
) -> anyhow::Result<String> {
    if from > to {
        anyhow::bail!("--from {} is after --to {}", from, to);
    }
    let report = compute_error_rates(
        &data.accuracy.actual,
        &data.accuracy.forecasts,
        DateRange(from, to),
    );
    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    if report.per_date.is_empty() {
        return Ok(format!("{}\n", render::DATA_UNAVAILABLE));
    }
    let providers: Vec<Provider> = Provider::SCORED
        .into_iter()
        .filter(|p| data.accuracy.forecasts.contains_key(p))
        .collect();
    Ok(text_report(&report, &providers))
}

/// Which daily-summary series to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesSource {
    Actual,
    Forecast(Provider),
}

/// A daily-summary series as CSV, optionally gap-filled over the range.
pub fn render_series(
    data: &WeatherDataSet,
    source: SeriesSource,
    from: NaiveDate,
    to: NaiveDate,
    fill_gaps: bool,
) -> anyhow::Result<String> {
    if from > to {
        anyhow::bail!("--from {} is after --to {}", from, to);
    }
    let series = match source {
        SeriesSource::Actual => data.accuracy.actual.as_slice(),
        SeriesSource::Forecast(provider) => data.forecast_series(provider),
    };
    let range = DateRange(from, to);
    let rows: Vec<DailySummary> = if fill_gaps {
        fill_range(series, from, to)
    } else {
        series.iter().filter(|s| range.contains(&s.date)).cloned().collect()
    };
    log::debug!("[WXC Debug] series: {} rows for {:?}", rows.len(), source);

    let mut writer = csv::Writer::from_writer(vec![]);
    for row in &rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}
