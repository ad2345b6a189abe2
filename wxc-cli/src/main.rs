//! WXC CLI - Command line tool for comparing KMA, OpenWeather, AccuWeather
//! and DeepLearning forecasts and scoring their accuracy.

use clap::Parser;
use std::path::PathBuf;
use wxc_data::dataset::DataSource;

#[derive(Parser)]
#[command(
    name = "wxc-cli",
    version,
    about = "Multi-provider weather comparison toolkit"
)]
struct Cli {
    /// Load datasets from this directory instead of the bundled copies
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: wxc_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let source = match cli.data_dir {
        Some(dir) => DataSource::Directory(dir),
        None => DataSource::Bundled,
    };
    log::debug!("[WXC Debug] cli: data source {:?}", source);
    wxc_cmd::run(source, cli.command).await
}
