use crate::{provider::Provider, sky::SkyCondition, timestamp::Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Reasons a single provider record is rejected during parsing.
#[derive(Debug, PartialEq, Clone, Copy, Hash)]
pub enum RecordError {
    MissingTimestamp,
    MalformedTimestamp,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingTimestamp => write!(f, "record has no timestamp"),
            RecordError::MalformedTimestamp => write!(f, "record timestamp is malformed"),
        }
    }
}

impl std::error::Error for RecordError {}

/// Source-locale display strings carried through unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SummaryFields {
    /// Sky label as published, e.g. "구름 많음"
    pub sky_label: Option<String>,
    /// Night sky label (AccuWeather "밤 날씨", KMA long-term afternoon)
    pub night_sky_label: Option<String>,
    /// Precipitation type, e.g. "없음", "비"
    pub precipitation_type: Option<String>,
    /// Raw long-term precipitation outlook, e.g. "오전: 20% / 오후: 30%"
    pub precipitation_outlook: Option<String>,
    /// Raw long-term sky outlook, e.g. "오전: 맑음 / 오후: 흐림"
    pub sky_outlook: Option<String>,
}

/// One provider record with units stripped and fields typed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedEntry {
    pub provider: Provider,
    pub timestamp: Timestamp,
    pub temperature_celsius: Option<f64>,
    pub precipitation_probability_percent: Option<f64>,
    pub wind_speed_meters_per_second: Option<f64>,
    pub wind_direction: Option<String>,
    pub humidity_percent: Option<f64>,
    pub sky_condition: SkyCondition,
    pub night_sky_condition: Option<SkyCondition>,
    /// Provider-reported daily high, when the record carries one
    pub reported_high_celsius: Option<f64>,
    /// Provider-reported daily low, when the record carries one
    pub reported_low_celsius: Option<f64>,
    pub summary: SummaryFields,
}

impl NormalizedEntry {
    /// An entry with every measurement absent.
    pub fn new(provider: Provider, timestamp: Timestamp) -> Self {
        NormalizedEntry {
            provider,
            timestamp,
            temperature_celsius: None,
            precipitation_probability_percent: None,
            wind_speed_meters_per_second: None,
            wind_direction: None,
            humidity_percent: None,
            sky_condition: SkyCondition::default(),
            night_sky_condition: None,
            reported_high_celsius: None,
            reported_low_celsius: None,
            summary: SummaryFields::default(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date
    }

    /// Hourly entries carry an `HHMM` hour; daily blocks do not.
    pub fn is_hourly(&self) -> bool {
        self.timestamp.hour.is_some()
    }

    /// The sky to show after dark: the night condition when present.
    pub fn night_or_day_sky(&self) -> SkyCondition {
        self.night_sky_condition.unwrap_or(self.sky_condition)
    }
}
