use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use weather_route_bot::{BotConfig, logging, telegram};

/// Telegram bot that forecasts the weather along a route of cities
#[derive(Debug, Parser)]
#[command(name = "weather-route-bot", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = BotConfig::load_from_path(cli.config)?;
    logging::init(&config.logging, cli.verbose)?;

    info!("weather-route-bot {} starting", weather_route_bot::VERSION);
    telegram::run(&config).await
}
