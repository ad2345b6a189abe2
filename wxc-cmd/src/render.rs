//! Text formatting shared by the command renderers.

use chrono::NaiveDate;
use wxc_providers::sky::SkyCondition;
use wxc_utils::dates;

/// Placeholder for an absent value inside a table cell.
pub const EMPTY_CELL: &str = "-";
/// Placeholder for an absent value in the current-conditions tile.
pub const NOT_AVAILABLE: &str = "N/A";
/// Shown when a provider has nothing for the requested view.
pub const NO_DATA: &str = "no data";
/// Shown when a whole dataset is empty.
pub const DATA_UNAVAILABLE: &str = "data unavailable";

pub fn temperature(value: Option<f64>) -> String {
    value.map_or_else(|| EMPTY_CELL.to_string(), |v| format!("{:.1}°C", v))
}

pub fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| EMPTY_CELL.to_string(), |v| format!("{:.0}%", v))
}

pub fn speed(value: Option<f64>) -> String {
    value.map_or_else(|| EMPTY_CELL.to_string(), |v| format!("{:.1}m/s", v))
}

pub fn text(value: Option<&str>) -> String {
    value.unwrap_or(EMPTY_CELL).to_string()
}

pub fn sky(value: Option<SkyCondition>) -> String {
    value.map_or_else(|| EMPTY_CELL.to_string(), |s| s.icon_name().to_string())
}

/// Swap the table placeholder for "N/A".
pub fn or_not_available(cell: String) -> String {
    if cell == EMPTY_CELL {
        NOT_AVAILABLE.to_string()
    } else {
        cell
    }
}

/// "12/10 (화)", or "12/10 (오늘)" for today.
pub fn day_label(date: &NaiveDate, today: &NaiveDate) -> String {
    if date == today {
        format!("{} (오늘)", date.format("%-m/%-d"))
    } else {
        dates::format_date_with_day(date)
    }
}

/// Left-align `value` in a column of `width` display cells.
///
/// Hangul syllables take two terminal cells, so byte or char padding misaligns.
pub fn pad(value: &str, width: usize) -> String {
    let used: usize = value.chars().map(display_width).sum();
    let fill = width.saturating_sub(used);
    format!("{}{}", value, " ".repeat(fill))
}

fn display_width(c: char) -> usize {
    match c as u32 {
        0x1100..=0x115F
        | 0x2E80..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFF00..=0xFF60 => 2,
        _ => 1,
    }
}
