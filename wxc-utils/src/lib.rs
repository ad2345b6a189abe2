//! Shared utility functions for the weather comparison crates.

/// Date utility functions
pub mod dates {
    use chrono::{Datelike, Duration, NaiveDate};

    /// Weekday labels indexed from Sunday, as shown on the dashboard.
    pub const WEEKDAY_LABELS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    /// Korean single-character weekday label for a date.
    pub fn day_of_week(date: &NaiveDate) -> &'static str {
        WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize]
    }

    /// `date` shifted by `days`; `None` past the representable calendar.
    pub fn add_days(date: &NaiveDate, days: i64) -> Option<NaiveDate> {
        date.checked_add_signed(Duration::try_days(days)?)
    }

    /// Format as "M/D (요일)", e.g. "12/10 (화)".
    pub fn format_date_with_day(date: &NaiveDate) -> String {
        format!("{}/{} ({})", date.month(), date.day(), day_of_week(date))
    }

}
