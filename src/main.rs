use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use snapfolio::clock::SystemClock;
use snapfolio::config::{default_config_path, ResolvedConfig};
use snapfolio::market_data::MarketDataSources;
use snapfolio::storage::JsonStateStore;
use snapfolio::update::run_update;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snapfolio")]
#[command(about = "Daily portfolio valuation updater")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run one update-and-persist cycle (the default)
    Update,
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ResolvedConfig::load_or_default(&cli.config)?;

    match cli.command {
        Some(Command::Config) => {
            println!("Config file: {}", cli.config.display());
            println!("State file: {}", config.state_file.display());
            println!("Reporting currency: {}", config.reporting_currency);
            println!("Foreign currency: {}", config.foreign_currency);
            println!("Reporting timezone: {}", config.reporting_timezone);
            println!("Default FX rate: {}", config.default_fx_rate);
        }
        Some(Command::Update) | None => {
            let store = JsonStateStore::new(&config.state_file);
            let sources = MarketDataSources::from_config(&config);
            let summary = run_update(&store, &sources, &SystemClock, &config).await?;

            println!(
                "{} | total {} | net flow {} | p/l {}",
                summary.date, summary.grand_total, summary.net_flow, summary.pl
            );
        }
    }

    Ok(())
}
