//! Loading the bundled (or on-disk) provider datasets into one snapshot.

use crate::{
    aggregate::{aggregate_by_day, DailyAggregate},
    unify::ProviderAggregates,
};
use anyhow::Context;
use serde::Serialize;
use std::{collections::BTreeMap, path::PathBuf};
use wxc_providers::{
    daily_summary::DailySummary,
    entry::NormalizedEntry,
    provider::{Provider, RawRecords, RecordKind},
};

/// Raw provider record files, in load order.
pub const RECORD_FILES: [(RecordKind, &str); 5] = [
    (RecordKind::KmaShortTerm, "kma_short_term.json"),
    (RecordKind::KmaLongTerm, "kma_long_term.json"),
    (RecordKind::OpenWeather, "open_weather.json"),
    (RecordKind::AccuWeather, "accu_weather.json"),
    (RecordKind::DeepLearning, "deep_learning.json"),
];

/// Daily-summary forecast files used for accuracy scoring.
pub const FORECAST_FILES: [(Provider, &str); 3] = [
    (Provider::Kma, "kma_forecast.csv"),
    (Provider::OpenWeather, "open_forecast.csv"),
    (Provider::AccuWeather, "accu_forecast.csv"),
];

/// Observed daily weather.
pub const ACTUAL_FILE: &str = "actual_weather.csv";

static BUNDLED: [(&str, &str); 9] = [
    ("kma_short_term.json", include_str!("../../fixtures/kma_short_term.json")),
    ("kma_long_term.json", include_str!("../../fixtures/kma_long_term.json")),
    ("open_weather.json", include_str!("../../fixtures/open_weather.json")),
    ("accu_weather.json", include_str!("../../fixtures/accu_weather.json")),
    ("deep_learning.json", include_str!("../../fixtures/deep_learning.json")),
    ("kma_forecast.csv", include_str!("../../fixtures/kma_forecast.csv")),
    ("open_forecast.csv", include_str!("../../fixtures/open_forecast.csv")),
    ("accu_forecast.csv", include_str!("../../fixtures/accu_forecast.csv")),
    ("actual_weather.csv", include_str!("../../fixtures/actual_weather.csv")),
];

/// Message prefixed to every load failure.
pub const LOAD_ERROR: &str = "날씨 데이터를 불러오는 중 오류가 발생했습니다";

/// Daily-summary series for accuracy scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccuracySeries {
    pub actual: Vec<DailySummary>,
    pub forecasts: BTreeMap<Provider, Vec<DailySummary>>,
}

/// Immutable snapshot of everything the tools display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherDataSet {
    pub aggregates: ProviderAggregates,
    pub accuracy: AccuracySeries,
}

impl WeatherDataSet {
    pub fn daily(&self, provider: Provider) -> &[DailyAggregate] {
        self.aggregates.get(provider)
    }

    pub fn forecast_series(&self, provider: Provider) -> &[DailySummary] {
        self.accuracy
            .forecasts
            .get(&provider)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Where fixture files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// The copies compiled into the binary
    Bundled,
    /// A directory holding files with the bundled names
    Directory(PathBuf),
}

pub struct DataLoader {
    source: DataSource,
}

impl DataLoader {
    pub fn new(source: DataSource) -> Self {
        DataLoader { source }
    }

    pub fn bundled() -> Self {
        DataLoader::new(DataSource::Bundled)
    }

    async fn read(&self, name: &str) -> anyhow::Result<String> {
        match &self.source {
            DataSource::Bundled => BUNDLED
                .iter()
                .find(|(file, _)| *file == name)
                .map(|(_, body)| body.to_string())
                .with_context(|| format!("no bundled dataset named {}", name)),
            DataSource::Directory(dir) => {
                let path = dir.join(name);
                tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))
            }
        }
    }

    async fn load_records(&self) -> anyhow::Result<ProviderAggregates> {
        let mut entries: BTreeMap<Provider, Vec<NormalizedEntry>> = BTreeMap::new();
        for (kind, file) in RECORD_FILES {
            let body = self.read(file).await?;
            if body.trim().is_empty() {
                log::warn!("[WXC Debug] loader: {} is empty", file);
                continue;
            }
            let raw = RawRecords::from_json(kind, &body)
                .with_context(|| format!("malformed JSON in {}", file))?;
            let parsed = raw.parse();
            log::info!(
                "[WXC Debug] loader: Loaded {} of {} {} records from {}",
                parsed.len(),
                raw.len(),
                raw.provider(),
                file
            );
            entries.entry(raw.provider()).or_default().extend(parsed);
        }

        let mut aggregates = ProviderAggregates::new();
        for provider in Provider::ALL {
            let provider_entries = entries.remove(&provider).unwrap_or_default();
            aggregates.insert(provider, aggregate_by_day(&provider_entries));
        }
        Ok(aggregates)
    }

    async fn load_summaries(&self, file: &str) -> anyhow::Result<Vec<DailySummary>> {
        let body = self.read(file).await?;
        let summaries = DailySummary::csv_to_summaries(&body)
            .with_context(|| format!("malformed CSV in {}", file))?;
        log::info!(
            "[WXC Debug] loader: Loaded {} daily summaries from {}",
            summaries.len(),
            file
        );
        Ok(summaries)
    }

    async fn load_inner(&self) -> anyhow::Result<WeatherDataSet> {
        let aggregates = self.load_records().await?;
        let mut accuracy = AccuracySeries {
            actual: self.load_summaries(ACTUAL_FILE).await?,
            forecasts: BTreeMap::new(),
        };
        for (provider, file) in FORECAST_FILES {
            let series = self.load_summaries(file).await?;
            accuracy.forecasts.insert(provider, series);
        }
        Ok(WeatherDataSet {
            aggregates,
            accuracy,
        })
    }

    /// Load every dataset. Any missing or malformed file fails the whole load.
    pub async fn load(&self) -> anyhow::Result<WeatherDataSet> {
        self.load_inner().await.context(LOAD_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::Path;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, day).unwrap()
    }

    async fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wxc-data-{}-{}", name, std::process::id()));
        let _ = tokio::fs::remove_dir_all(&dir).await;
        tokio::fs::create_dir_all(&dir).await.unwrap();
        dir
    }

    async fn copy_bundled(dir: &Path) {
        for (name, body) in BUNDLED.iter() {
            tokio::fs::write(dir.join(name), body).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_load_bundled() {
        let data = DataLoader::bundled().load().await.unwrap();

        let kma = data.daily(Provider::Kma);
        // three short-term days followed by five long-term days
        assert_eq!(kma.len(), 8);
        assert_eq!(kma[0].date, date(10));
        assert_eq!(kma[0].hourly_entries.len(), 8);
        assert_eq!(kma[0].high_temp, Some(8.0));
        assert_eq!(kma[0].low_temp, Some(-1.0));
        assert!(kma[7].summary_entry.is_some());

        let open = data.daily(Provider::OpenWeather);
        assert_eq!(open.len(), 5);
        // duplicate 0300 entries are both kept
        assert_eq!(open[0].hourly_entries.len(), 8);
        assert_eq!(open[0].hourly_at("0300").unwrap().temperature_celsius, Some(0.0));

        assert_eq!(data.daily(Provider::AccuWeather).len(), 5);
        assert_eq!(data.daily(Provider::DeepLearning).len(), 5);

        assert_eq!(data.accuracy.actual.len(), 13);
        assert_eq!(data.forecast_series(Provider::Kma).len(), 14);
        assert_eq!(data.forecast_series(Provider::OpenWeather).len(), 13);
        assert!(data.forecast_series(Provider::DeepLearning).is_empty());
    }

    #[tokio::test]
    async fn test_load_is_repeatable() {
        let loader = DataLoader::bundled();
        let first = loader.load().await.unwrap();
        let second = loader.load().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_load_directory_matches_bundled() {
        let dir = scratch_dir("copy").await;
        copy_bundled(&dir).await;
        let from_disk = DataLoader::new(DataSource::Directory(dir.clone()))
            .load()
            .await
            .unwrap();
        let bundled = DataLoader::bundled().load().await.unwrap();
        assert_eq!(from_disk, bundled);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_missing_file_names_the_file() {
        let dir = scratch_dir("missing").await;
        copy_bundled(&dir).await;
        tokio::fs::remove_file(dir.join("accu_weather.json")).await.unwrap();
        let err = DataLoader::new(DataSource::Directory(dir.clone()))
            .load()
            .await
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with(LOAD_ERROR));
        assert!(message.contains("accu_weather.json"));
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_malformed_json_fails() {
        let dir = scratch_dir("malformed").await;
        copy_bundled(&dir).await;
        tokio::fs::write(dir.join("open_weather.json"), "[{\"날짜 시간\": ")
            .await
            .unwrap();
        let err = DataLoader::new(DataSource::Directory(dir.clone()))
            .load()
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("malformed JSON in open_weather.json"));
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_empty_provider_file_is_empty_series() {
        let dir = scratch_dir("empty").await;
        copy_bundled(&dir).await;
        tokio::fs::write(dir.join("deep_learning.json"), "[]").await.unwrap();
        tokio::fs::write(dir.join("accu_weather.json"), "").await.unwrap();
        let data = DataLoader::new(DataSource::Directory(dir.clone()))
            .load()
            .await
            .unwrap();
        assert!(data.daily(Provider::DeepLearning).is_empty());
        assert!(data.daily(Provider::AccuWeather).is_empty());
        assert_eq!(data.daily(Provider::OpenWeather).len(), 5);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
