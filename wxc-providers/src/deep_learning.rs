use crate::{
    entry::{NormalizedEntry, RecordError, SummaryFields},
    provider::Provider,
    sky::SkyCondition,
    timestamp::Timestamp,
    units::{clean_label, loose_string, parse_number},
};
use serde::Deserialize;

/// One hourly point inside a DeepLearning daily block.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DeepLearningHour {
    #[serde(default, deserialize_with = "loose_string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub temperature: Option<String>,
    #[serde(rename = "precipProbability", default, deserialize_with = "loose_string")]
    pub precip_probability: Option<String>,
}

/// A daily block produced by the in-house forecast model.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepLearningRecord {
    #[serde(default, deserialize_with = "loose_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub weather_condition: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub low_temp: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub high_temp: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub precip_probability: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub avg_humidity: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub avg_wind_speed: Option<String>,
    #[serde(default)]
    pub hourly_data: Vec<DeepLearningHour>,
}

impl DeepLearningRecord {
    /// Expand the block into its daily summary entry followed by one entry
    /// per hourly point. Hourly points with an unusable time are skipped.
    pub fn to_entries(&self) -> Result<Vec<NormalizedEntry>, RecordError> {
        let timestamp = Timestamp::from_field(self.date.as_deref())?;
        let date = timestamp.date;
        let sky_label = clean_label(self.weather_condition.as_deref());
        let sky_condition = sky_label
            .as_deref()
            .map(|label| SkyCondition::classify(Provider::DeepLearning, label))
            .unwrap_or_default();

        let mut daily = NormalizedEntry::new(Provider::DeepLearning, Timestamp::daily(date));
        daily.reported_high_celsius = parse_number(self.high_temp.as_deref());
        daily.reported_low_celsius = parse_number(self.low_temp.as_deref());
        daily.precipitation_probability_percent = parse_number(self.precip_probability.as_deref());
        daily.humidity_percent = parse_number(self.avg_humidity.as_deref());
        daily.wind_speed_meters_per_second = parse_number(self.avg_wind_speed.as_deref());
        daily.sky_condition = sky_condition;
        daily.summary = SummaryFields {
            sky_label: sky_label.clone(),
            ..SummaryFields::default()
        };

        let mut entries = Vec::with_capacity(self.hourly_data.len() + 1);
        entries.push(daily);
        for point in &self.hourly_data {
            let stamp = match point.time.as_deref() {
                Some(time) => Timestamp::hourly(date, time.trim()),
                None => Err(RecordError::MissingTimestamp),
            };
            let stamp = match stamp {
                Ok(stamp) => stamp,
                Err(err) => {
                    log::warn!(
                        "[WXC Debug] parser: skipping deepLearning hour {:?} on {}: {}",
                        point.time,
                        date,
                        err
                    );
                    continue;
                }
            };
            let mut hourly = NormalizedEntry::new(Provider::DeepLearning, stamp);
            hourly.temperature_celsius = parse_number(point.temperature.as_deref());
            hourly.precipitation_probability_percent =
                parse_number(point.precip_probability.as_deref());
            hourly.sky_condition = sky_condition;
            hourly.summary.sky_label = sky_label.clone();
            entries.push(hourly);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: &str = r#"{
        "date": "2024-12-11",
        "weatherCondition": "맑음",
        "lowTemp": 1,
        "highTemp": 9,
        "precipProbability": 10,
        "avgHumidity": 58,
        "avgWindSpeed": 2.4,
        "hourlyData": [
            {"time": "03:00", "temperature": 2, "precipProbability": 10},
            {"time": "1500", "temperature": 8.5, "precipProbability": 0},
            {"time": "bad", "temperature": 5}
        ]
    }"#;

    #[test]
    fn test_expands_daily_and_hourly_entries() {
        let record: DeepLearningRecord = serde_json::from_str(BLOCK).unwrap();
        let entries = record.to_entries().unwrap();
        assert_eq!(entries.len(), 3);

        let daily = &entries[0];
        assert!(!daily.is_hourly());
        assert_eq!(daily.reported_high_celsius, Some(9.0));
        assert_eq!(daily.reported_low_celsius, Some(1.0));
        assert_eq!(daily.humidity_percent, Some(58.0));
        assert_eq!(daily.wind_speed_meters_per_second, Some(2.4));
        assert_eq!(daily.sky_condition, SkyCondition::Clear);

        assert_eq!(entries[1].timestamp.hour.as_deref(), Some("0300"));
        assert_eq!(entries[1].temperature_celsius, Some(2.0));
        assert_eq!(entries[2].timestamp.hour.as_deref(), Some("1500"));
        assert_eq!(entries[2].precipitation_probability_percent, Some(0.0));
        assert_eq!(entries[2].sky_condition, SkyCondition::Clear);
    }

    #[test]
    fn test_missing_date_rejects_block() {
        let record: DeepLearningRecord =
            serde_json::from_str(r#"{"weatherCondition": "비", "hourlyData": []}"#).unwrap();
        assert_eq!(record.to_entries(), Err(RecordError::MissingTimestamp));
    }
}
