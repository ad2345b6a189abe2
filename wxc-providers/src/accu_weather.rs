use crate::{
    entry::{NormalizedEntry, RecordError, SummaryFields},
    provider::Provider,
    sky::SkyCondition,
    timestamp::Timestamp,
    units::{clean_label, loose_string, parse_number},
};
use serde::Deserialize;

/// Precipitation type AccuWeather reports when no precipitation is expected.
pub const NO_PRECIPITATION: &str = "없음";

/// AccuWeather 5-day daily forecast record.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AccuWeatherRecord {
    /// "YYYYMMDD HHMM"
    #[serde(rename = "날짜", default, deserialize_with = "loose_string")]
    pub date_time: Option<String>,
    #[serde(rename = "최저기온", default, deserialize_with = "loose_string")]
    pub low: Option<String>,
    #[serde(rename = "최고기온", default, deserialize_with = "loose_string")]
    pub high: Option<String>,
    #[serde(rename = "낮 날씨", default, deserialize_with = "loose_string")]
    pub day_sky: Option<String>,
    #[serde(rename = "밤 날씨", default, deserialize_with = "loose_string")]
    pub night_sky: Option<String>,
    #[serde(rename = "풍속", default, deserialize_with = "loose_string")]
    pub wind_speed: Option<String>,
    #[serde(rename = "풍향", default, deserialize_with = "loose_string")]
    pub wind_direction: Option<String>,
    #[serde(rename = "습도", default, deserialize_with = "loose_string")]
    pub humidity: Option<String>,
    #[serde(rename = "강수 형태", default, deserialize_with = "loose_string")]
    pub precipitation_type: Option<String>,
}

/// AccuWeather publishes no probability, only a type: "없음" is 0%, anything else 100%.
pub fn precipitation_from_type(precipitation_type: Option<&str>) -> Option<f64> {
    match precipitation_type.map(str::trim) {
        None | Some("") => None,
        Some(NO_PRECIPITATION) => Some(0.0),
        Some(_) => Some(100.0),
    }
}

impl TryFrom<&AccuWeatherRecord> for NormalizedEntry {
    type Error = RecordError;

    fn try_from(record: &AccuWeatherRecord) -> Result<Self, Self::Error> {
        let timestamp = Timestamp::from_field(record.date_time.as_deref())?;
        let high = parse_number(record.high.as_deref());
        let low = parse_number(record.low.as_deref());
        let day_label = clean_label(record.day_sky.as_deref());
        let night_label = clean_label(record.night_sky.as_deref());

        let mut entry = NormalizedEntry::new(Provider::AccuWeather, timestamp);
        entry.temperature_celsius = match (low, high) {
            (Some(low), Some(high)) => Some((low + high) / 2.0),
            _ => None,
        };
        entry.reported_high_celsius = high;
        entry.reported_low_celsius = low;
        entry.precipitation_probability_percent =
            precipitation_from_type(record.precipitation_type.as_deref());
        entry.wind_speed_meters_per_second = parse_number(record.wind_speed.as_deref());
        entry.wind_direction = clean_label(record.wind_direction.as_deref());
        entry.humidity_percent = parse_number(record.humidity.as_deref());
        entry.sky_condition = day_label
            .as_deref()
            .map(|label| SkyCondition::classify(Provider::AccuWeather, label))
            .unwrap_or_default();
        entry.night_sky_condition = night_label
            .as_deref()
            .map(|label| SkyCondition::classify(Provider::AccuWeather, label));
        entry.summary = SummaryFields {
            sky_label: day_label,
            night_sky_label: night_label,
            precipitation_type: clean_label(record.precipitation_type.as_deref()),
            ..SummaryFields::default()
        };
        Ok(entry)
    }
}
