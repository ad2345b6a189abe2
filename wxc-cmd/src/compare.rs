//! Daily and synoptic-hour comparison tables across all providers.

use crate::render::{self, pad};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Write;
use wxc_data::{
    dataset::WeatherDataSet,
    unify::{unify_daily, unify_hourly, DailyCell, DateWindow, HourlyCell, SYNOPTIC_HOURS},
};
use wxc_providers::provider::Provider;
use wxc_utils::dates;

const LABEL_WIDTH: usize = 12;

fn daily_cell(cell: Option<&DailyCell>) -> String {
    match cell {
        Some(cell) => format!(
            "{} / {}  강수 {}  {} / {}",
            render::temperature(cell.low_temp),
            render::temperature(cell.high_temp),
            render::percent(cell.precipitation_probability),
            render::sky(cell.day_sky),
            render::sky(cell.night_sky),
        ),
        None => render::NO_DATA.to_string(),
    }
}

fn hourly_cell(cell: Option<&HourlyCell>) -> String {
    match cell {
        Some(cell) => format!(
            "{}  강수 {}  {}  {}",
            render::temperature(cell.temperature),
            render::percent(cell.precipitation_probability),
            render::speed(cell.wind_speed),
            cell.sky.icon_name(),
        ),
        None => render::NO_DATA.to_string(),
    }
}

/// Daily comparison for `start..=start+days`.
pub fn render_daily(
    data: &WeatherDataSet,
    start: NaiveDate,
    days: u32,
    today: NaiveDate,
) -> String {
    let window = DateWindow::new(start, i64::from(days));
    let comparison = unify_daily(&data.aggregates, window);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Daily comparison {} - {}",
        dates::format_date_with_day(&window.start),
        dates::format_date_with_day(&window.end())
    );
    if data.aggregates.is_empty() {
        let _ = writeln!(out, "{}", render::DATA_UNAVAILABLE);
        return out;
    }
    for row in &comparison.rows {
        let _ = writeln!(out, "{}", render::day_label(&row.date, &today));
        for (provider, cell) in &row.cells {
            let _ = writeln!(
                out,
                "  {}{}",
                pad(provider.label(), LABEL_WIDTH),
                daily_cell(cell.as_ref())
            );
        }
    }
    out
}

/// Synoptic-hour comparison for one date. The hour nearest to `now` is
/// starred when `date` is today.
pub fn render_hourly(data: &WeatherDataSet, date: NaiveDate, now: NaiveDateTime) -> String {
    let comparison = unify_hourly(&data.aggregates, date, &SYNOPTIC_HOURS, now);
    let mut out = String::new();
    let _ = writeln!(out, "Hourly comparison {}", dates::format_date_with_day(&date));
    let has_any = comparison
        .rows
        .iter()
        .any(|row| row.cells.values().any(Option::is_some));
    if !has_any {
        let _ = writeln!(out, "{}", render::DATA_UNAVAILABLE);
        return out;
    }
    for row in &comparison.rows {
        let marker = if comparison.highlighted_hour.as_deref() == Some(row.hour.as_str()) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(out, "{}{}", marker, row.hour);
        for provider in Provider::ALL {
            let cell = row.cells.get(&provider).and_then(Option::as_ref);
            let _ = writeln!(
                out,
                "  {}{}",
                pad(provider.label(), LABEL_WIDTH),
                hourly_cell(cell)
            );
        }
    }
    out
}
