use crate::entry::RecordError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date-time format used by KMA, OpenWeather and AccuWeather records: "YYYYMMDD HHMM"
pub const DATE_TIME_FORMAT: &str = "%Y%m%d %H%M";

/// Date format used by KMA long-term and DeepLearning records: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Compact date format: "YYYYMMDD"
pub const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// A calendar date with an optional four-digit `HHMM` hour.
///
/// Daily blocks (long-range outlooks, DeepLearning day summaries) carry no hour.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub date: NaiveDate,
    pub hour: Option<String>,
}

impl Timestamp {
    pub fn daily(date: NaiveDate) -> Self {
        Timestamp { date, hour: None }
    }

    pub fn hourly(date: NaiveDate, hour: &str) -> Result<Self, RecordError> {
        Ok(Timestamp {
            date,
            hour: Some(normalize_hour(hour)?),
        })
    }

    /// Parse "YYYYMMDD HHMM", "YYYY-MM-DD" or "YYYYMMDD".
    pub fn parse(raw: &str) -> Result<Self, RecordError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(RecordError::MissingTimestamp);
        }
        match raw.split_once(' ') {
            Some((date, hour)) => {
                let date = NaiveDate::parse_from_str(date, COMPACT_DATE_FORMAT)
                    .or_else(|_| NaiveDate::parse_from_str(date, DATE_FORMAT))
                    .map_err(|_| RecordError::MalformedTimestamp)?;
                Timestamp::hourly(date, hour.trim())
            }
            None => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .or_else(|_| NaiveDate::parse_from_str(raw, COMPACT_DATE_FORMAT))
                .map(Timestamp::daily)
                .map_err(|_| RecordError::MalformedTimestamp),
        }
    }

    /// Parse an optional record field; absent or blank is `MissingTimestamp`.
    pub fn from_field(raw: Option<&str>) -> Result<Self, RecordError> {
        match raw {
            Some(value) if !value.trim().is_empty() => Timestamp::parse(value),
            _ => Err(RecordError::MissingTimestamp),
        }
    }

    /// Two-digit hour prefix, e.g. "03" for "0300".
    pub fn hour_key(&self) -> Option<&str> {
        self.hour.as_deref().and_then(|hour| hour.get(0..2))
    }

    pub fn hour_of_day(&self) -> Option<u32> {
        self.hour_key().and_then(|key| key.parse().ok())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hour {
            Some(hour) => write!(f, "{} {}", self.date.format(COMPACT_DATE_FORMAT), hour),
            None => write!(f, "{}", self.date.format(DATE_FORMAT)),
        }
    }
}

/// Normalize "0300", "03:00" or "03" to "0300".
fn normalize_hour(raw: &str) -> Result<String, RecordError> {
    let digits: String = raw.chars().filter(|c| *c != ':').collect();
    let digits = match digits.len() {
        2 => format!("{}00", digits),
        4 => digits,
        _ => return Err(RecordError::MalformedTimestamp),
    };
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(RecordError::MalformedTimestamp);
    }
    let hours: u32 = digits[0..2]
        .parse()
        .map_err(|_| RecordError::MalformedTimestamp)?;
    let minutes: u32 = digits[2..4]
        .parse()
        .map_err(|_| RecordError::MalformedTimestamp)?;
    if hours > 23 || minutes > 59 {
        return Err(RecordError::MalformedTimestamp);
    }
    Ok(digits)
}
