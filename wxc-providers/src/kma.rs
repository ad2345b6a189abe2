//! Korea Meteorological Administration records.
//!
//! Short-term forecasts arrive hourly ("날짜 시간" = "YYYYMMDD HHMM"); the
//! long-term outlook arrives per day with morning/afternoon halves packed
//! into one string, e.g. "오전: 맑음 / 오후: 흐림".

use crate::{
    entry::{NormalizedEntry, RecordError, SummaryFields},
    provider::Provider,
    sky::SkyCondition,
    timestamp::Timestamp,
    units::{clean_label, loose_string, parse_number},
};
use serde::Deserialize;

/// KMA short-term (3-day) hourly forecast record.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct KmaShortTermRecord {
    #[serde(rename = "날짜 시간", default, deserialize_with = "loose_string")]
    pub date_time: Option<String>,
    #[serde(rename = "기온", default, deserialize_with = "loose_string")]
    pub temperature: Option<String>,
    #[serde(rename = "풍향", default, deserialize_with = "loose_string")]
    pub wind_direction: Option<String>,
    #[serde(rename = "풍속", default, deserialize_with = "loose_string")]
    pub wind_speed: Option<String>,
    #[serde(rename = "하늘 상태", default, deserialize_with = "loose_string")]
    pub sky: Option<String>,
    #[serde(rename = "강수 형태", default, deserialize_with = "loose_string")]
    pub precipitation_type: Option<String>,
    #[serde(rename = "강수확률", default, deserialize_with = "loose_string")]
    pub precipitation_probability: Option<String>,
    #[serde(rename = "습도", default, deserialize_with = "loose_string")]
    pub humidity: Option<String>,
    #[serde(rename = "최고기온", default, deserialize_with = "loose_string")]
    pub high: Option<String>,
    #[serde(rename = "최저기온", default, deserialize_with = "loose_string")]
    pub low: Option<String>,
}

/// KMA long-term (mid-range) daily outlook record.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct KmaLongTermRecord {
    #[serde(rename = "날짜", default, deserialize_with = "loose_string")]
    pub date: Option<String>,
    #[serde(rename = "강수확률", default, deserialize_with = "loose_string")]
    pub precipitation_outlook: Option<String>,
    #[serde(rename = "하늘상태", default, deserialize_with = "loose_string")]
    pub sky_outlook: Option<String>,
    #[serde(rename = "최저기온", default, deserialize_with = "loose_string")]
    pub low: Option<String>,
    #[serde(rename = "최고기온", default, deserialize_with = "loose_string")]
    pub high: Option<String>,
}

/// Split "오전: X / 오후: Y" into its morning and afternoon values.
///
/// A value without an afternoon half is treated as morning-only. Labels
/// that contain a slash themselves ("비/눈") stay intact.
pub fn split_outlook(raw: &str) -> (Option<String>, Option<String>) {
    let (morning, afternoon) = match raw.find("오후") {
        Some(idx) => {
            let head = raw[..idx].trim_end();
            (head.strip_suffix('/').unwrap_or(head), Some(&raw[idx..]))
        }
        None => match raw.split_once(" / ") {
            Some((morning, afternoon)) => (morning, Some(afternoon)),
            None => (raw, None),
        },
    };
    let value = |half: &str| {
        let half = half.split_once(':').map_or(half, |(_, value)| value);
        clean_label(Some(half))
    };
    (value(morning), afternoon.and_then(value))
}

impl TryFrom<&KmaShortTermRecord> for NormalizedEntry {
    type Error = RecordError;

    fn try_from(record: &KmaShortTermRecord) -> Result<Self, Self::Error> {
        let timestamp = Timestamp::from_field(record.date_time.as_deref())?;
        let sky_label = clean_label(record.sky.as_deref());
        let mut entry = NormalizedEntry::new(Provider::Kma, timestamp);
        entry.temperature_celsius = parse_number(record.temperature.as_deref());
        entry.precipitation_probability_percent =
            parse_number(record.precipitation_probability.as_deref());
        entry.wind_speed_meters_per_second = parse_number(record.wind_speed.as_deref());
        entry.wind_direction = clean_label(record.wind_direction.as_deref());
        entry.humidity_percent = parse_number(record.humidity.as_deref());
        entry.sky_condition = sky_label
            .as_deref()
            .map(|label| SkyCondition::classify(Provider::Kma, label))
            .unwrap_or_default();
        entry.reported_high_celsius = parse_number(record.high.as_deref());
        entry.reported_low_celsius = parse_number(record.low.as_deref());
        entry.summary = SummaryFields {
            sky_label,
            precipitation_type: clean_label(record.precipitation_type.as_deref()),
            ..SummaryFields::default()
        };
        Ok(entry)
    }
}

impl TryFrom<&KmaLongTermRecord> for NormalizedEntry {
    type Error = RecordError;

    fn try_from(record: &KmaLongTermRecord) -> Result<Self, Self::Error> {
        let timestamp = Timestamp::from_field(record.date.as_deref())?;
        let (morning_precip, _) = record
            .precipitation_outlook
            .as_deref()
            .map(split_outlook)
            .unwrap_or_default();
        let (morning_sky, afternoon_sky) = record
            .sky_outlook
            .as_deref()
            .map(split_outlook)
            .unwrap_or_default();

        let mut entry = NormalizedEntry::new(Provider::Kma, timestamp);
        entry.precipitation_probability_percent = parse_number(morning_precip.as_deref());
        entry.sky_condition = morning_sky
            .as_deref()
            .map(|label| SkyCondition::classify(Provider::Kma, label))
            .unwrap_or_default();
        entry.night_sky_condition = afternoon_sky
            .as_deref()
            .map(|label| SkyCondition::classify(Provider::Kma, label));
        entry.reported_high_celsius = parse_number(record.high.as_deref());
        entry.reported_low_celsius = parse_number(record.low.as_deref());
        entry.summary = SummaryFields {
            sky_label: morning_sky,
            night_sky_label: afternoon_sky,
            precipitation_type: None,
            precipitation_outlook: clean_label(record.precipitation_outlook.as_deref()),
            sky_outlook: clean_label(record.sky_outlook.as_deref()),
        };
        Ok(entry)
    }
}
