//! Command implementations for the weather comparison CLI.
//!
//! Every command loads the dataset once, renders a text (or JSON/CSV) view
//! and prints it.

use chrono::{Local, NaiveDate, Timelike};
use clap::{Subcommand, ValueEnum};
use wxc_data::{
    dataset::{DataLoader, DataSource},
    unify::{COMPARISON_WINDOW_DAYS, MAX_WINDOW_DAYS},
};
use wxc_providers::provider::Provider;
use wxc_utils::dates;

pub mod accuracy;
pub mod compare;
pub mod forecast;
pub mod render;

use accuracy::SeriesSource;

/// Forecast provider selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Kma,
    OpenWeather,
    AccuWeather,
    DeepLearning,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Kma => Provider::Kma,
            ProviderArg::OpenWeather => Provider::OpenWeather,
            ProviderArg::AccuWeather => Provider::AccuWeather,
            ProviderArg::DeepLearning => Provider::DeepLearning,
        }
    }
}

/// Daily-summary series selectable for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeriesArg {
    Actual,
    Kma,
    OpenWeather,
    AccuWeather,
}

impl From<SeriesArg> for SeriesSource {
    fn from(arg: SeriesArg) -> Self {
        match arg {
            SeriesArg::Actual => SeriesSource::Actual,
            SeriesArg::Kma => SeriesSource::Forecast(Provider::Kma),
            SeriesArg::OpenWeather => SeriesSource::Forecast(Provider::OpenWeather),
            SeriesArg::AccuWeather => SeriesSource::Forecast(Provider::AccuWeather),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare every provider's daily forecast side by side
    Compare {
        /// First date shown (YYYY-MM-DD); defaults to today
        #[arg(short, long, value_parser = dates::parse_date)]
        date: Option<NaiveDate>,

        /// Number of days after the first date
        #[arg(
            long,
            default_value_t = COMPARISON_WINDOW_DAYS as u32,
            value_parser = clap::value_parser!(u32).range(0..=MAX_WINDOW_DAYS)
        )]
        days: u32,
    },

    /// Compare providers at the synoptic hours of one date
    Hourly {
        /// Date to compare (YYYY-MM-DD)
        #[arg(short, long, value_parser = dates::parse_date)]
        date: NaiveDate,
    },

    /// Show one provider's day-by-day forecast with hourly detail
    Forecast {
        #[arg(short, long, value_enum)]
        provider: ProviderArg,
    },

    /// Show one provider's current conditions
    Current {
        #[arg(short, long, value_enum)]
        provider: ProviderArg,

        /// Hour of day (0-23); defaults to the current hour
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
        hour: Option<u32>,
    },

    /// Forecast error rates against observed weather
    Errors {
        /// First date scored (YYYY-MM-DD)
        #[arg(long, value_parser = dates::parse_date)]
        from: NaiveDate,

        /// Last date scored (YYYY-MM-DD)
        #[arg(long, value_parser = dates::parse_date)]
        to: NaiveDate,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export a daily-summary series as CSV
    Series {
        #[arg(short, long, value_enum)]
        provider: SeriesArg,

        #[arg(long, value_parser = dates::parse_date)]
        from: NaiveDate,

        #[arg(long, value_parser = dates::parse_date)]
        to: NaiveDate,

        /// Interpolate days missing from the series
        #[arg(long)]
        fill_gaps: bool,
    },
}

pub async fn run(source: DataSource, command: Command) -> anyhow::Result<()> {
    let data = DataLoader::new(source).load().await?;
    let now = Local::now().naive_local();
    let today = now.date();

    let output = match command {
        Command::Compare { date, days } => {
            compare::render_daily(&data, date.unwrap_or(today), days, today)
        }
        Command::Hourly { date } => compare::render_hourly(&data, date, now),
        Command::Forecast { provider } => forecast::render_forecast(&data, provider.into(), today),
        Command::Current { provider, hour } => {
            forecast::render_current(&data, provider.into(), today, hour.unwrap_or(now.hour()))
        }
        Command::Errors { from, to, json } => accuracy::render_errors(&data, from, to, json)?,
        Command::Series {
            provider,
            from,
            to,
            fill_gaps,
        } => accuracy::render_series(&data, provider.into(), from, to, fill_gaps)?,
    };
    print!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_arg_mapping() {
        assert_eq!(Provider::from(ProviderArg::OpenWeather), Provider::OpenWeather);
        assert_eq!(
            SeriesSource::from(SeriesArg::AccuWeather),
            SeriesSource::Forecast(Provider::AccuWeather)
        );
        assert_eq!(SeriesSource::from(SeriesArg::Actual), SeriesSource::Actual);
    }

    #[test]
    fn test_provider_arg_names() {
        let names: Vec<String> = ProviderArg::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(names, vec!["kma", "open-weather", "accu-weather", "deep-learning"]);
    }

    #[derive(clap::Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_compare_days_bounded() {
        use clap::Parser;
        let parsed = TestCli::try_parse_from(["wxc", "compare"]).unwrap();
        assert!(matches!(parsed.command, Command::Compare { date: None, days: 5 }));
        assert!(TestCli::try_parse_from(["wxc", "compare", "--days", "31"]).is_ok());
        assert!(TestCli::try_parse_from(["wxc", "compare", "--days", "4294967295"]).is_err());
    }

    #[tokio::test]
    async fn test_run_missing_directory_fails() {
        let source = DataSource::Directory("/nonexistent/wxc-fixtures".into());
        let command = Command::Forecast {
            provider: ProviderArg::Kma,
        };
        assert!(run(source, command).await.is_err());
    }
}
