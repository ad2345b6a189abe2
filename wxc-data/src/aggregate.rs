//! Group normalized entries into one aggregate per (provider, date).

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use wxc_providers::{
    entry::{NormalizedEntry, SummaryFields},
    provider::Provider,
    sky::SkyCondition,
};

/// First hour (inclusive) treated as daytime.
pub const DAYTIME_START: u32 = 6;
/// Last hour (inclusive) treated as daytime.
pub const DAYTIME_END: u32 = 18;

/// Whether an hour of day falls in the 06:00-18:00 daytime band.
pub fn is_daytime(hour: u32) -> bool {
    (DAYTIME_START..=DAYTIME_END).contains(&hour)
}

/// Everything one provider forecast for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub provider: Provider,
    pub date: NaiveDate,
    /// Hourly entries in arrival order, duplicates included
    pub hourly_entries: Vec<NormalizedEntry>,
    /// The daily block (long-range outlook or model summary), if any
    pub summary_entry: Option<NormalizedEntry>,
    pub high_temp: Option<f64>,
    pub low_temp: Option<f64>,
    pub summary: SummaryFields,
    /// Representative daytime sky
    pub sky_condition: Option<SkyCondition>,
    pub night_sky_condition: Option<SkyCondition>,
    pub precipitation_probability_percent: Option<f64>,
    pub prevailing_wind_direction: Option<String>,
    pub precipitation_type: Option<String>,
    pub average_wind_speed: Option<f64>,
    pub average_humidity: Option<f64>,
}

impl DailyAggregate {
    /// First hourly entry whose two-digit hour matches `hour` ("03" or "0300").
    pub fn hourly_at(&self, hour: &str) -> Option<&NormalizedEntry> {
        let key = hour.get(0..2)?;
        self.hourly_entries
            .iter()
            .find(|entry| entry.timestamp.hour_key() == Some(key))
    }

    /// Hourly entry closest to `hour`; on a tie the earlier entry is kept.
    pub fn nearest_hourly(&self, hour: u32) -> Option<&NormalizedEntry> {
        let distance = |entry: &NormalizedEntry| {
            entry
                .timestamp
                .hour_of_day()
                .map(|h| h.abs_diff(hour))
                .unwrap_or(u32::MAX)
        };
        self.hourly_entries.iter().fold(None, |best, entry| match best {
            Some(prev) if distance(prev) <= distance(entry) => Some(prev),
            _ => Some(entry),
        })
    }
}

/// Running extrema, seeded at ±∞ so the first value always wins.
struct Extrema {
    high: f64,
    low: f64,
}

impl Extrema {
    fn new() -> Self {
        Extrema {
            high: f64::NEG_INFINITY,
            low: f64::INFINITY,
        }
    }

    fn push(&mut self, value: f64) {
        self.high = self.high.max(value);
        self.low = self.low.min(value);
    }

    fn high(&self) -> Option<f64> {
        Some(self.high).filter(|v| v.is_finite())
    }

    fn low(&self) -> Option<f64> {
        Some(self.low).filter(|v| v.is_finite())
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Group entries by calendar date (per provider) and derive daily values.
///
/// Output is sorted by date, then provider.
pub fn aggregate_by_day(entries: &[NormalizedEntry]) -> Vec<DailyAggregate> {
    type Group = (Vec<NormalizedEntry>, Option<NormalizedEntry>);
    let mut groups: BTreeMap<(NaiveDate, Provider), Group> = BTreeMap::new();
    for entry in entries {
        let (hourly, summary) = groups.entry((entry.date(), entry.provider)).or_default();
        if entry.is_hourly() {
            hourly.push(entry.clone());
        } else if summary.is_none() {
            *summary = Some(entry.clone());
        } else {
            log::debug!(
                "[WXC Debug] aggregate: extra {} daily block for {} ignored",
                entry.provider,
                entry.date()
            );
        }
    }

    let aggregates: Vec<DailyAggregate> = groups
        .into_iter()
        .map(|((date, provider), (hourly, summary))| build(provider, date, hourly, summary))
        .collect();
    log::debug!(
        "[WXC Debug] aggregate: {} entries grouped into {} days",
        entries.len(),
        aggregates.len()
    );
    aggregates
}

fn build(
    provider: Provider,
    date: NaiveDate,
    hourly_entries: Vec<NormalizedEntry>,
    summary_entry: Option<NormalizedEntry>,
) -> DailyAggregate {
    let mut computed = Extrema::new();
    for temp in hourly_entries.iter().filter_map(|e| e.temperature_celsius) {
        computed.push(temp);
    }
    // several short-range reports on one day: the last non-empty one holds
    let reported = (
        hourly_entries.iter().rev().find_map(|e| e.reported_high_celsius),
        hourly_entries.iter().rev().find_map(|e| e.reported_low_celsius),
    );
    let summary_pair = (
        summary_entry.as_ref().and_then(|e| e.reported_high_celsius),
        summary_entry.as_ref().and_then(|e| e.reported_low_celsius),
    );
    // a model block carries its own daily values; its hourly points only add detail
    let model_block = summary_entry
        .as_ref()
        .filter(|entry| entry.provider == Provider::DeepLearning);
    let (high_temp, low_temp) = match model_block {
        Some(_) => choose_extremes(summary_pair, (computed.high(), computed.low()), (None, None)),
        None => choose_extremes(reported, (computed.high(), computed.low()), summary_pair),
    };

    let representative = model_block
        .or_else(|| {
            hourly_entries
                .iter()
                .find(|entry| entry.timestamp.hour_of_day().is_some_and(is_daytime))
        })
        .or_else(|| hourly_entries.first())
        .or(summary_entry.as_ref());
    let averaged = |field: fn(&NormalizedEntry) -> Option<f64>| {
        model_block
            .and_then(field)
            .or_else(|| mean(hourly_entries.iter().filter_map(field)))
    };
    let mut aggregate = DailyAggregate {
        provider,
        date,
        high_temp,
        low_temp,
        summary: summary_entry
            .as_ref()
            .map(|entry| entry.summary.clone())
            .unwrap_or_default(),
        sky_condition: representative.map(|entry| entry.sky_condition),
        night_sky_condition: None,
        precipitation_probability_percent: representative
            .and_then(|entry| entry.precipitation_probability_percent),
        prevailing_wind_direction: None,
        precipitation_type: None,
        average_wind_speed: averaged(|e| e.wind_speed_meters_per_second),
        average_humidity: averaged(|e| e.humidity_percent),
        hourly_entries: Vec::new(),
        summary_entry: None,
    };

    if aggregate.summary.sky_label.is_none() {
        aggregate.summary.sky_label = representative.and_then(|e| e.summary.sky_label.clone());
    }

    match model_block.or(hourly_entries.last()) {
        Some(last) => {
            aggregate.night_sky_condition = Some(last.night_or_day_sky());
            aggregate.prevailing_wind_direction = last.wind_direction.clone();
            aggregate.precipitation_type = last.summary.precipitation_type.clone();
            aggregate.summary.night_sky_label = last
                .summary
                .night_sky_label
                .clone()
                .or_else(|| last.summary.sky_label.clone());
            aggregate.summary.precipitation_type = aggregate.precipitation_type.clone();
        }
        None => {
            if let Some(entry) = &summary_entry {
                aggregate.night_sky_condition = Some(entry.night_or_day_sky());
                aggregate.prevailing_wind_direction = entry.wind_direction.clone();
                aggregate.precipitation_type = entry.summary.precipitation_type.clone();
            }
            if aggregate.average_wind_speed.is_none() {
                aggregate.average_wind_speed = summary_entry
                    .as_ref()
                    .and_then(|e| e.wind_speed_meters_per_second);
            }
            if aggregate.average_humidity.is_none() {
                aggregate.average_humidity =
                    summary_entry.as_ref().and_then(|e| e.humidity_percent);
            }
        }
    }

    aggregate.hourly_entries = hourly_entries;
    aggregate.summary_entry = summary_entry;
    aggregate
}

type Pair = (Option<f64>, Option<f64>);

/// Short-range reported values first, then computed-from-hourly, then the
/// long-range summary. An inverted result falls back to the computed pair,
/// or is swapped when nothing was computed.
fn choose_extremes(reported: Pair, computed: Pair, long_range: Pair) -> Pair {
    let high = reported.0.or(computed.0).or(long_range.0);
    let low = reported.1.or(computed.1).or(long_range.1);
    match (high, low) {
        (Some(h), Some(l)) if h < l => match computed {
            (Some(ch), Some(cl)) => (Some(ch), Some(cl)),
            _ => (Some(l), Some(h)),
        },
        pair => pair,
    }
}
