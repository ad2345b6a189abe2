//! Per-provider views: the day-by-day breakdown and the current-conditions tile.

use crate::render::{self, or_not_available, pad};
use chrono::NaiveDate;
use std::fmt::Write;
use wxc_data::{aggregate::DailyAggregate, dataset::WeatherDataSet, unify::current_conditions};
use wxc_providers::{entry::NormalizedEntry, provider::Provider};

fn hourly_line(entry: &NormalizedEntry) -> String {
    format!(
        "    {}  {}  강수 {}  {}  {}  {}",
        render::text(entry.timestamp.hour.as_deref()),
        pad(&render::temperature(entry.temperature_celsius), 8),
        pad(&render::percent(entry.precipitation_probability_percent), 4),
        pad(&render::speed(entry.wind_speed_meters_per_second), 7),
        render::percent(entry.humidity_percent),
        render::text(entry.summary.sky_label.as_deref()),
    )
}

fn day_block(out: &mut String, day: &DailyAggregate, today: &NaiveDate) {
    let _ = writeln!(
        out,
        "{}  {} / {}  {} / {}",
        render::day_label(&day.date, today),
        render::temperature(day.low_temp),
        render::temperature(day.high_temp),
        render::text(day.summary.sky_label.as_deref()),
        render::text(day.summary.night_sky_label.as_deref()),
    );
    let _ = writeln!(
        out,
        "  강수 {}  {}  평균 풍속 {}  평균 습도 {}  풍향 {}",
        render::percent(day.precipitation_probability_percent),
        render::text(day.precipitation_type.as_deref()),
        render::speed(day.average_wind_speed),
        render::percent(day.average_humidity),
        render::text(day.prevailing_wind_direction.as_deref()),
    );
    if let Some(outlook) = &day.summary.sky_outlook {
        let _ = writeln!(
            out,
            "  {}  강수확률 {}",
            outlook,
            render::text(day.summary.precipitation_outlook.as_deref())
        );
    }
    for entry in &day.hourly_entries {
        let _ = writeln!(out, "{}", hourly_line(entry));
    }
}

/// Every day one provider forecast, with its hourly breakdown.
pub fn render_forecast(data: &WeatherDataSet, provider: Provider, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} forecast", provider.label());
    let days = data.daily(provider);
    if days.is_empty() {
        let _ = writeln!(out, "{}", render::DATA_UNAVAILABLE);
        return out;
    }
    for day in days {
        day_block(&mut out, day, &today);
    }
    out
}

/// The current-conditions tile; missing fields read "N/A".
pub fn render_current(
    data: &WeatherDataSet,
    provider: Provider,
    date: NaiveDate,
    hour: u32,
) -> String {
    let mut out = String::new();
    let Some(current) = current_conditions(&data.aggregates, provider, date, hour) else {
        let _ = writeln!(
            out,
            "{} current conditions: {}",
            provider.label(),
            render::DATA_UNAVAILABLE
        );
        return out;
    };
    let _ = writeln!(
        out,
        "{} current conditions {} {}",
        provider.label(),
        current.date,
        render::text(current.hour.as_deref())
    );
    let rows = [
        ("기온", render::temperature(current.temperature)),
        ("하늘", render::text(current.sky_label.as_deref())),
        ("최고", render::temperature(current.high_temp)),
        ("최저", render::temperature(current.low_temp)),
        ("강수확률", render::percent(current.precipitation_probability)),
        ("습도", render::percent(current.humidity)),
        ("풍향", render::text(current.wind_direction.as_deref())),
        ("풍속", render::speed(current.wind_speed)),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {}{}", pad(label, 10), or_not_available(value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxc_data::dataset::DataLoader;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, day).unwrap()
    }

    #[tokio::test]
    async fn test_render_forecast() {
        let data = DataLoader::bundled().load().await.unwrap();
        let out = render_forecast(&data, Provider::AccuWeather, date(10));
        assert!(out.starts_with("아큐웨더 forecast"));
        assert!(out.contains("12/10 (오늘)  -1.0°C / 7.0°C  대체로 맑음 / 구름 조금"));
        assert!(out.contains("12/14 (토)"));
    }

    #[tokio::test]
    async fn test_render_forecast_long_term_outlook() {
        let data = DataLoader::bundled().load().await.unwrap();
        let out = render_forecast(&data, Provider::Kma, date(10));
        assert!(out.contains("오전: 맑음 / 오후: 구름많음  강수확률 오전: 10% / 오후: 20%"));
    }

    #[tokio::test]
    async fn test_render_forecast_empty() {
        let out = render_forecast(&WeatherDataSet::default(), Provider::DeepLearning, date(10));
        assert!(out.contains(render::DATA_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_render_current() {
        let data = DataLoader::bundled().load().await.unwrap();
        let out = render_current(&data, Provider::OpenWeather, date(10), 9);
        assert!(out.contains("오픈웨더 current conditions 2024-12-10 0300"));
        // OpenWeather has no daily extremes in the tile
        assert!(out.contains("N/A"));

        let accu = render_current(&data, Provider::AccuWeather, date(10), 9);
        assert!(accu.contains("7.0°C"));
    }
}
