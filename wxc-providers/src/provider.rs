use crate::{
    accu_weather::AccuWeatherRecord,
    deep_learning::DeepLearningRecord,
    entry::{NormalizedEntry, RecordError},
    kma::{KmaLongTermRecord, KmaShortTermRecord},
    open_weather::OpenWeatherRecord,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A forecast source. Declaration order is the comparison-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Provider {
    Kma,
    AccuWeather,
    OpenWeather,
    DeepLearning,
}

impl Provider {
    /// All providers in comparison-table order.
    pub const ALL: [Provider; 4] = [
        Provider::Kma,
        Provider::AccuWeather,
        Provider::OpenWeather,
        Provider::DeepLearning,
    ];

    /// Providers whose daily summaries are scored against observations.
    pub const SCORED: [Provider; 3] = [Provider::Kma, Provider::OpenWeather, Provider::AccuWeather];

    /// Key used in serialized reports, e.g. `kmaTempError`.
    pub fn key(&self) -> &'static str {
        match self {
            Provider::Kma => "kma",
            Provider::AccuWeather => "accuWeather",
            Provider::OpenWeather => "openWeather",
            Provider::DeepLearning => "deepLearning",
        }
    }

    /// Korean display label.
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Kma => "기상청",
            Provider::AccuWeather => "아큐웨더",
            Provider::OpenWeather => "오픈웨더",
            Provider::DeepLearning => "딥러닝모델",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Which raw record shape a JSON document holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    KmaShortTerm,
    KmaLongTerm,
    OpenWeather,
    AccuWeather,
    DeepLearning,
}

/// A batch of raw provider records, one variant per source shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecords {
    KmaShortTerm(Vec<KmaShortTermRecord>),
    KmaLongTerm(Vec<KmaLongTermRecord>),
    OpenWeather(Vec<OpenWeatherRecord>),
    AccuWeather(Vec<AccuWeatherRecord>),
    DeepLearning(Vec<DeepLearningRecord>),
}

impl RawRecords {
    /// Deserialize a JSON array of records of the given kind.
    pub fn from_json(kind: RecordKind, body: &str) -> serde_json::Result<Self> {
        Ok(match kind {
            RecordKind::KmaShortTerm => RawRecords::KmaShortTerm(serde_json::from_str(body)?),
            RecordKind::KmaLongTerm => RawRecords::KmaLongTerm(serde_json::from_str(body)?),
            RecordKind::OpenWeather => RawRecords::OpenWeather(serde_json::from_str(body)?),
            RecordKind::AccuWeather => RawRecords::AccuWeather(serde_json::from_str(body)?),
            RecordKind::DeepLearning => RawRecords::DeepLearning(serde_json::from_str(body)?),
        })
    }

    pub fn provider(&self) -> Provider {
        match self {
            RawRecords::KmaShortTerm(_) | RawRecords::KmaLongTerm(_) => Provider::Kma,
            RawRecords::OpenWeather(_) => Provider::OpenWeather,
            RawRecords::AccuWeather(_) => Provider::AccuWeather,
            RawRecords::DeepLearning(_) => Provider::DeepLearning,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RawRecords::KmaShortTerm(records) => records.len(),
            RawRecords::KmaLongTerm(records) => records.len(),
            RawRecords::OpenWeather(records) => records.len(),
            RawRecords::AccuWeather(records) => records.len(),
            RawRecords::DeepLearning(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalize every record. Records with an unusable timestamp are logged
    /// and skipped; the rest keep their arrival order, duplicates included.
    pub fn parse(&self) -> Vec<NormalizedEntry> {
        let provider = self.provider();
        match self {
            RawRecords::KmaShortTerm(records) => normalize_each(provider, records),
            RawRecords::KmaLongTerm(records) => normalize_each(provider, records),
            RawRecords::OpenWeather(records) => normalize_each(provider, records),
            RawRecords::AccuWeather(records) => normalize_each(provider, records),
            RawRecords::DeepLearning(records) => records
                .iter()
                .enumerate()
                .filter_map(|(index, record)| {
                    keep_or_warn(provider, index, record.to_entries())
                })
                .flatten()
                .collect(),
        }
    }
}

fn normalize_each<'a, R>(provider: Provider, records: &'a [R]) -> Vec<NormalizedEntry>
where
    NormalizedEntry: TryFrom<&'a R, Error = RecordError>,
{
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            keep_or_warn(provider, index, NormalizedEntry::try_from(record))
        })
        .collect()
}

fn keep_or_warn<T>(provider: Provider, index: usize, result: Result<T, RecordError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!(
                "[WXC Debug] parser: skipping {} record #{}: {}",
                provider,
                index,
                err
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sky::SkyCondition;

    const OPEN_WEATHER: &str = r#"[
        {"날짜 시간": "20241210 0300", "기온": "3°C", "하늘 상태": "맑음", "강수 확률": "0%"},
        {"날짜 시간": "20241210 0300", "기온": "4°C", "하늘 상태": "흐림", "강수 확률": "10%"},
        {"날짜 시간": "", "기온": "6°C"},
        {"날짜 시간": "20241210 0600", "기온": "5°C", "하늘 상태": "흐림", "강수 확률": "N/A"}
    ]"#;

    #[test]
    fn test_parse_skips_bad_records_and_keeps_duplicates() {
        let raw = RawRecords::from_json(RecordKind::OpenWeather, OPEN_WEATHER).unwrap();
        assert_eq!(raw.len(), 4);
        assert_eq!(raw.provider(), Provider::OpenWeather);
        let entries = raw.parse();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].timestamp, entries[1].timestamp);
        assert_eq!(entries[0].temperature_celsius, Some(3.0));
        assert_eq!(entries[1].temperature_celsius, Some(4.0));
        assert_eq!(entries[1].sky_condition, SkyCondition::Cloudy);
        assert_eq!(entries[2].precipitation_probability_percent, None);
    }

    #[test]
    fn test_parse_is_repeatable() {
        let raw = RawRecords::from_json(RecordKind::OpenWeather, OPEN_WEATHER).unwrap();
        assert_eq!(raw.parse(), raw.parse());
    }

    #[test]
    fn test_empty_batch() {
        let raw = RawRecords::from_json(RecordKind::AccuWeather, "[]").unwrap();
        assert!(raw.is_empty());
        assert!(raw.parse().is_empty());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(RawRecords::from_json(RecordKind::KmaShortTerm, "{not json").is_err());
        assert!(RawRecords::from_json(RecordKind::KmaShortTerm, r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn test_deep_learning_blocks_flatten() {
        let body = r#"[
            {"date": "2024-12-11", "weatherCondition": "맑음", "hourlyData": [{"time": "0300", "temperature": 2}]},
            {"weatherCondition": "비"},
            {"date": "2024-12-12", "weatherCondition": "비", "hourlyData": []}
        ]"#;
        let raw = RawRecords::from_json(RecordKind::DeepLearning, body).unwrap();
        let entries = raw.parse();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.provider == Provider::DeepLearning));
    }

    #[test]
    fn test_provider_keys_and_order() {
        assert_eq!(Provider::OpenWeather.key(), "openWeather");
        assert_eq!(Provider::DeepLearning.label(), "딥러닝모델");
        let mut providers = vec![Provider::DeepLearning, Provider::OpenWeather, Provider::Kma];
        providers.sort();
        assert_eq!(providers, vec![Provider::Kma, Provider::OpenWeather, Provider::DeepLearning]);
    }
}
