use crate::{timestamp::Timestamp, units::parse_number};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

/// CSV header shared by every daily-summary fixture.
pub const CSV_HEADER: [&str; 5] = ["date", "avgTemp", "minTemp", "maxTemp", "precipProb"];

/// Per-day forecast or observation used for accuracy scoring.
///
/// The same shape serves every forecast provider and the observed series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Daily mean temperature (°C)
    pub avg_temp: Option<f64>,
    /// Daily minimum temperature (°C)
    pub min_temp: Option<f64>,
    /// Daily maximum temperature (°C)
    pub max_temp: Option<f64>,
    /// Precipitation probability (%); for observations, the recorded value
    pub precip_prob: Option<f64>,
}

impl DailySummary {
    pub fn new(date: NaiveDate) -> Self {
        DailySummary {
            date,
            avg_temp: None,
            min_temp: None,
            max_temp: None,
            precip_prob: None,
        }
    }

    /// Parse a `date,avgTemp,minTemp,maxTemp,precipProb` CSV body.
    ///
    /// A row whose date cannot be read is skipped with a warning; numeric
    /// cells that fail to parse become `None`.
    pub fn csv_to_summaries(body: &str) -> Result<Vec<DailySummary>, csv::Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());
        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::from_headers(&headers);

        let mut summaries = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    log::warn!("[WXC Debug] summaries: skipping row {}: {}", row + 1, err);
                    continue;
                }
            };
            match columns.summary(&record) {
                Some(summary) => summaries.push(summary),
                None => log::warn!(
                    "[WXC Debug] summaries: skipping row {} with unreadable date {:?}",
                    row + 1,
                    record.get(columns.date)
                ),
            }
        }
        Ok(summaries)
    }
}

/// Column positions resolved from the header, falling back to the standard order.
struct ColumnIndex {
    date: usize,
    avg_temp: usize,
    min_temp: usize,
    max_temp: usize,
    precip_prob: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str, fallback: usize| {
            headers
                .iter()
                .position(|header| header == name)
                .unwrap_or(fallback)
        };
        ColumnIndex {
            date: find(CSV_HEADER[0], 0),
            avg_temp: find(CSV_HEADER[1], 1),
            min_temp: find(CSV_HEADER[2], 2),
            max_temp: find(CSV_HEADER[3], 3),
            precip_prob: find(CSV_HEADER[4], 4),
        }
    }

    fn summary(&self, record: &StringRecord) -> Option<DailySummary> {
        let date = Timestamp::parse(record.get(self.date)?).ok()?.date;
        Some(DailySummary {
            date,
            avg_temp: parse_number(record.get(self.avg_temp)),
            min_temp: parse_number(record.get(self.min_temp)),
            max_temp: parse_number(record.get(self.max_temp)),
            precip_prob: parse_number(record.get(self.precip_prob)),
        })
    }
}
