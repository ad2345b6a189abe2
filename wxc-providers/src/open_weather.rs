use crate::{
    entry::{NormalizedEntry, RecordError, SummaryFields},
    provider::Provider,
    sky::SkyCondition,
    timestamp::Timestamp,
    units::{clean_label, loose_string, parse_number},
};
use serde::Deserialize;

/// OpenWeather 5-day / 3-hour forecast record, already translated to Korean keys.
///
/// Note the precipitation probability key is "강수 확률" (with a space),
/// unlike KMA's "강수확률".
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct OpenWeatherRecord {
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
    #[serde(rename = "강수 확률", default, deserialize_with = "loose_string")]
    pub precipitation_probability: Option<String>,
    #[serde(rename = "습도", default, deserialize_with = "loose_string")]
    pub humidity: Option<String>,
}

impl TryFrom<&OpenWeatherRecord> for NormalizedEntry {
    type Error = RecordError;

    fn try_from(record: &OpenWeatherRecord) -> Result<Self, Self::Error> {
        let timestamp = Timestamp::from_field(record.date_time.as_deref())?;
        let sky_label = clean_label(record.sky.as_deref());
        let mut entry = NormalizedEntry::new(Provider::OpenWeather, timestamp);
        entry.temperature_celsius = parse_number(record.temperature.as_deref());
        entry.precipitation_probability_percent =
            parse_number(record.precipitation_probability.as_deref());
        entry.wind_speed_meters_per_second = parse_number(record.wind_speed.as_deref());
        entry.wind_direction = clean_label(record.wind_direction.as_deref());
        entry.humidity_percent = parse_number(record.humidity.as_deref());
        entry.sky_condition = sky_label
            .as_deref()
            .map(|label| SkyCondition::classify(Provider::OpenWeather, label))
            .unwrap_or_default();
        entry.summary = SummaryFields {
            sky_label,
            precipitation_type: clean_label(record.precipitation_type.as_deref()),
            ..SummaryFields::default()
        };
        Ok(entry)
    }
}
