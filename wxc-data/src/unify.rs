//! Cross-provider comparison views built from per-day aggregates.

use crate::aggregate::{is_daytime, DailyAggregate};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;
use wxc_providers::{
    date_range::DateRange, entry::NormalizedEntry, provider::Provider, sky::SkyCondition,
};

/// Days shown after the start date in the daily comparison.
pub const COMPARISON_WINDOW_DAYS: i64 = 5;

/// Longest daily comparison accepted, in days after the start date.
pub const MAX_WINDOW_DAYS: i64 = 31;

/// Synoptic hours compared in the hourly view.
pub const SYNOPTIC_HOURS: [&str; 7] = ["0300", "0600", "0900", "1200", "1500", "1800", "2100"];

/// Daily aggregates for every provider, each sorted by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderAggregates {
    by_provider: BTreeMap<Provider, Vec<DailyAggregate>>,
}

impl ProviderAggregates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append aggregates for a provider, keeping the series date-sorted.
    pub fn insert(&mut self, provider: Provider, aggregates: Vec<DailyAggregate>) {
        let series = self.by_provider.entry(provider).or_default();
        series.extend(aggregates);
        series.sort_by_key(|aggregate| aggregate.date);
    }

    pub fn get(&self, provider: Provider) -> &[DailyAggregate] {
        self.by_provider
            .get(&provider)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn for_date(&self, provider: Provider, date: NaiveDate) -> Option<&DailyAggregate> {
        self.get(provider).iter().find(|aggregate| aggregate.date == date)
    }

    pub fn is_empty(&self) -> bool {
        self.by_provider.values().all(Vec::is_empty)
    }
}

/// An inclusive window `start..=start+days`, `days` clamped to
/// `0..=MAX_WINDOW_DAYS` and the end to the last representable date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub days: i64,
}

impl DateWindow {
    pub fn new(start: NaiveDate, days: i64) -> Self {
        DateWindow {
            start,
            days: days.clamp(0, MAX_WINDOW_DAYS),
        }
    }

    /// The default comparison window starting at `start`.
    pub fn comparison(start: NaiveDate) -> Self {
        DateWindow::new(start, COMPARISON_WINDOW_DAYS)
    }

    pub fn end(&self) -> NaiveDate {
        wxc_utils::dates::add_days(&self.start, self.days).unwrap_or(NaiveDate::MAX)
    }

    pub fn dates(&self) -> DateRange {
        DateRange(self.start, self.end())
    }
}

/// One provider's figures for one date in the daily comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCell {
    pub high_temp: Option<f64>,
    pub low_temp: Option<f64>,
    pub day_sky: Option<SkyCondition>,
    pub night_sky: Option<SkyCondition>,
    pub precipitation_probability: Option<f64>,
}

impl From<&DailyAggregate> for DailyCell {
    fn from(aggregate: &DailyAggregate) -> Self {
        DailyCell {
            high_temp: aggregate.high_temp,
            low_temp: aggregate.low_temp,
            day_sky: aggregate.sky_condition,
            night_sky: aggregate.night_sky_condition,
            precipitation_probability: aggregate.precipitation_probability_percent,
        }
    }
}

/// A date row; every provider is present, `None` meaning "no data".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub cells: BTreeMap<Provider, Option<DailyCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyComparison {
    pub rows: Vec<DailyRow>,
}

/// Build a row for every date in the window and every provider.
pub fn unify_daily(aggregates: &ProviderAggregates, window: DateWindow) -> DailyComparison {
    let rows = window
        .dates()
        .map(|date| DailyRow {
            date,
            cells: Provider::ALL
                .iter()
                .map(|provider| {
                    let cell = aggregates.for_date(*provider, date).map(DailyCell::from);
                    (*provider, cell)
                })
                .collect(),
        })
        .collect();
    DailyComparison { rows }
}

/// One provider's figures at one synoptic hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyCell {
    pub temperature: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub wind_speed: Option<f64>,
    pub sky: SkyCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRow {
    pub hour: String,
    pub cells: BTreeMap<Provider, Option<HourlyCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyComparison {
    pub date: NaiveDate,
    pub rows: Vec<HourlyRow>,
    /// Synoptic hour nearest to now, only when `date` is today
    pub highlighted_hour: Option<String>,
}

fn hourly_cell(provider: Provider, hour: &str, entry: &NormalizedEntry) -> HourlyCell {
    let sky = match provider {
        Provider::AccuWeather => {
            let daytime = hour
                .get(0..2)
                .and_then(|h| h.parse::<u32>().ok())
                .is_some_and(is_daytime);
            if daytime {
                entry.sky_condition
            } else {
                entry.night_or_day_sky()
            }
        }
        _ => entry.sky_condition,
    };
    HourlyCell {
        temperature: entry.temperature_celsius,
        precipitation_probability: entry.precipitation_probability_percent,
        wind_speed: entry.wind_speed_meters_per_second,
        sky,
    }
}

/// The synoptic hour closest to `hour`; on a tie the later one wins.
pub fn nearest_synoptic_hour<'a>(hours: &[&'a str], hour: u32) -> Option<&'a str> {
    hours
        .iter()
        .filter_map(|h| h.get(0..2)?.parse::<u32>().ok().map(|n| (*h, n)))
        .fold(None::<(&'a str, u32)>, |best, (label, n)| match best {
            Some((_, b)) if b.abs_diff(hour) < n.abs_diff(hour) => best,
            _ => Some((label, n)),
        })
        .map(|(label, _)| label)
}

/// Compare providers at each synoptic hour of `date` by exact two-digit hour.
pub fn unify_hourly(
    aggregates: &ProviderAggregates,
    date: NaiveDate,
    hours: &[&str],
    now: NaiveDateTime,
) -> HourlyComparison {
    let rows = hours
        .iter()
        .map(|hour| HourlyRow {
            hour: hour.to_string(),
            cells: Provider::ALL
                .iter()
                .map(|provider| {
                    let cell = aggregates
                        .for_date(*provider, date)
                        .and_then(|aggregate| aggregate.hourly_at(hour))
                        .map(|entry| hourly_cell(*provider, hour, entry));
                    (*provider, cell)
                })
                .collect(),
        })
        .collect();
    let highlighted_hour = (now.date() == date)
        .then(|| nearest_synoptic_hour(hours, now.hour()))
        .flatten()
        .map(str::to_string);
    HourlyComparison {
        date,
        rows,
        highlighted_hour,
    }
}

/// The "current weather" tile for one provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub provider: Provider,
    pub date: NaiveDate,
    pub hour: Option<String>,
    pub temperature: Option<f64>,
    pub high_temp: Option<f64>,
    pub low_temp: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<String>,
    pub sky: SkyCondition,
    pub sky_label: Option<String>,
}

/// Current conditions for `provider` on `date` at `hour`.
///
/// Falls back to the provider's earliest day when `date` has no data. KMA
/// picks its nearest hourly entry; the others use their first entry.
/// OpenWeather reports no daily extremes, and AccuWeather shows its high as
/// the current temperature without a precipitation figure.
pub fn current_conditions(
    aggregates: &ProviderAggregates,
    provider: Provider,
    date: NaiveDate,
    hour: u32,
) -> Option<CurrentConditions> {
    let aggregate = aggregates
        .for_date(provider, date)
        .or_else(|| aggregates.get(provider).first())?;
    let entry = match provider {
        Provider::Kma => aggregate.nearest_hourly(hour),
        _ => aggregate.hourly_entries.first(),
    }
    .or(aggregate.summary_entry.as_ref())?;

    let mut current = CurrentConditions {
        provider,
        date: aggregate.date,
        hour: entry.timestamp.hour.clone(),
        temperature: entry.temperature_celsius,
        high_temp: aggregate.high_temp,
        low_temp: aggregate.low_temp,
        precipitation_probability: entry.precipitation_probability_percent,
        humidity: entry.humidity_percent,
        wind_speed: entry.wind_speed_meters_per_second,
        wind_direction: entry.wind_direction.clone(),
        sky: entry.sky_condition,
        sky_label: entry.summary.sky_label.clone(),
    };
    match provider {
        Provider::OpenWeather => {
            current.high_temp = None;
            current.low_temp = None;
        }
        Provider::AccuWeather => {
            current.temperature = entry.reported_high_celsius.or(aggregate.high_temp);
            current.precipitation_probability = None;
        }
        _ => {}
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_by_day;
    use chrono::NaiveTime;
    use wxc_providers::provider::{RawRecords, RecordKind};

    const KMA: &str = r#"[
        {"날짜 시간": "20241210 0300", "기온": "2°C", "하늘 상태": "맑음", "강수확률": "0%"},
        {"날짜 시간": "20241210 0600", "기온": "3°C", "하늘 상태": "맑음", "강수확률": "10%"},
        {"날짜 시간": "20241210 1200", "기온": "8°C", "하늘 상태": "구름 많음", "강수확률": "20%"},
        {"날짜 시간": "20241211 0300", "기온": "1°C", "하늘 상태": "흐림", "강수확률": "30%"}
    ]"#;

    const ACCU: &str = r#"[
        {"날짜": "20241210 0700", "최저기온": "1°C", "최고기온": "9°C", "낮 날씨": "맑음",
         "밤 날씨": "눈", "강수 형태": "없음", "습도": "55%"},
        {"날짜": "20241210 2100", "최저기온": "1°C", "최고기온": "9°C", "낮 날씨": "맑음",
         "밤 날씨": "눈", "강수 형태": "없음"}
    ]"#;

    const OPEN: &str = r#"[
        {"날짜 시간": "20241210 0300", "기온": "3°C", "하늘 상태": "맑음", "강수 확률": "0%"},
        {"날짜 시간": "20241210 0300", "기온": "4°C", "하늘 상태": "흐림", "강수 확률": "5%"}
    ]"#;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, day).unwrap()
    }

    fn aggregates() -> ProviderAggregates {
        let mut all = ProviderAggregates::new();
        for (kind, body) in [
            (RecordKind::KmaShortTerm, KMA),
            (RecordKind::AccuWeather, ACCU),
            (RecordKind::OpenWeather, OPEN),
        ] {
            let raw = RawRecords::from_json(kind, body).unwrap();
            all.insert(raw.provider(), aggregate_by_day(&raw.parse()));
        }
        all
    }

    #[test]
    fn test_unify_daily_covers_window() {
        let comparison = unify_daily(&aggregates(), DateWindow::comparison(date(10)));
        assert_eq!(comparison.rows.len(), 6);
        assert_eq!(comparison.rows[5].date, date(15));

        let first = &comparison.rows[0];
        assert_eq!(first.cells.len(), 4);
        let order: Vec<Provider> = first.cells.keys().copied().collect();
        assert_eq!(order, Provider::ALL.to_vec());
        let kma = first.cells[&Provider::Kma].as_ref().unwrap();
        assert_eq!(kma.high_temp, Some(8.0));
        assert_eq!(kma.low_temp, Some(2.0));
        assert!(first.cells[&Provider::DeepLearning].is_none());
        assert!(comparison.rows[3].cells.values().all(Option::is_none));
    }

    #[test]
    fn test_date_window_is_bounded() {
        let wide = DateWindow::new(date(10), i64::from(u32::MAX));
        assert_eq!(wide.days, MAX_WINDOW_DAYS);
        assert_eq!(wide.end(), NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert_eq!(DateWindow::new(date(10), -3).end(), date(10));

        let edge = DateWindow::new(NaiveDate::MAX, 5);
        assert_eq!(edge.end(), NaiveDate::MAX);
        assert_eq!(edge.dates().count(), 1);
    }

    #[test]
    fn test_unify_hourly_exact_hour_only() {
        let now = date(12).and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        let view = unify_hourly(&aggregates(), date(10), &SYNOPTIC_HOURS, now);
        assert_eq!(view.rows.len(), 7);
        assert_eq!(view.highlighted_hour, None);

        let at_0300 = &view.rows[0];
        let kma = at_0300.cells[&Provider::Kma].as_ref().unwrap();
        assert_eq!(kma.temperature, Some(2.0));
        // duplicate OpenWeather 0300 entries: the first one is shown
        let open = at_0300.cells[&Provider::OpenWeather].as_ref().unwrap();
        assert_eq!(open.temperature, Some(3.0));

        // KMA has no 0900 entry and there is no nearest-hour fallback
        assert!(view.rows[2].cells[&Provider::Kma].is_none());
        // AccuWeather 0700 does not match 0600
        assert!(view.rows[1].cells[&Provider::AccuWeather].is_none());
    }

    #[test]
    fn test_accu_weather_night_sky_after_dark() {
        let now = date(12).and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        let view = unify_hourly(&aggregates(), date(10), &SYNOPTIC_HOURS, now);
        let at_2100 = view.rows.iter().find(|row| row.hour == "2100").unwrap();
        let accu = at_2100.cells[&Provider::AccuWeather].as_ref().unwrap();
        assert_eq!(accu.sky, SkyCondition::Snow);
    }

    #[test]
    fn test_highlighted_hour_today() {
        let now = date(10).and_time(NaiveTime::from_hms_opt(13, 30, 0).unwrap());
        let view = unify_hourly(&aggregates(), date(10), &SYNOPTIC_HOURS, now);
        assert_eq!(view.highlighted_hour.as_deref(), Some("1200"));
    }

    #[test]
    fn test_nearest_synoptic_hour_ties_go_later() {
        assert_eq!(nearest_synoptic_hour(&SYNOPTIC_HOURS, 1), Some("0300"));
        assert_eq!(nearest_synoptic_hour(&SYNOPTIC_HOURS, 12), Some("1200"));
        // 13 is between 12 and 15 but closer to 12
        assert_eq!(nearest_synoptic_hour(&SYNOPTIC_HOURS, 13), Some("1200"));
        // past the last synoptic hour
        assert_eq!(nearest_synoptic_hour(&SYNOPTIC_HOURS, 23), Some("2100"));
        // exact tie between 0300 and 0500 resolves later
        assert_eq!(nearest_synoptic_hour(&["0300", "0500"], 4), Some("0500"));
        assert_eq!(nearest_synoptic_hour(&[], 4), None);
    }

    #[test]
    fn test_current_conditions_kma_nearest_hour() {
        let current = current_conditions(&aggregates(), Provider::Kma, date(10), 10).unwrap();
        assert_eq!(current.hour.as_deref(), Some("1200"));
        assert_eq!(current.temperature, Some(8.0));
        assert_eq!(current.high_temp, Some(8.0));

        // 9 is equidistant from 0600 and 1200: keep the earlier one
        let tie = current_conditions(&aggregates(), Provider::Kma, date(10), 9).unwrap();
        assert_eq!(tie.hour.as_deref(), Some("0600"));
    }

    #[test]
    fn test_current_conditions_other_providers() {
        let all = aggregates();
        let open = current_conditions(&all, Provider::OpenWeather, date(10), 15).unwrap();
        assert_eq!(open.temperature, Some(3.0));
        assert_eq!(open.high_temp, None);
        assert_eq!(open.low_temp, None);

        let accu = current_conditions(&all, Provider::AccuWeather, date(10), 15).unwrap();
        assert_eq!(accu.temperature, Some(9.0));
        assert_eq!(accu.precipitation_probability, None);
        assert_eq!(accu.humidity, Some(55.0));

        assert!(current_conditions(&all, Provider::DeepLearning, date(10), 15).is_none());
    }

    #[test]
    fn test_current_conditions_falls_back_to_first_day() {
        let current = current_conditions(&aggregates(), Provider::Kma, date(20), 3).unwrap();
        assert_eq!(current.date, date(10));
    }

    #[test]
    fn test_unifier_does_not_mutate() {
        let all = aggregates();
        let before = all.clone();
        let now = date(10).and_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        let _ = unify_daily(&all, DateWindow::comparison(date(10)));
        let _ = unify_hourly(&all, date(10), &SYNOPTIC_HOURS, now);
        assert_eq!(all, before);
    }
}
