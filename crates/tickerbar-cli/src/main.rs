mod cli;
mod config;
mod error;
mod format;
mod output;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tickerbar_core::{PriceCache, QuoteRouter};
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::{Asset, Config};
use crate::error::CliError;
use crate::output::BarOutput;

const LOG_ENV: &str = "TICKERBAR_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

/// Logs go to stderr; stdout carries only the JSON payload.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let config = match config::resolve_path(cli.config.as_deref(), &config::candidate_paths()) {
        Ok(path) => Config::load(&path)?,
        // A one-off symbol only needs the display defaults.
        Err(CliError::ConfigNotFound { .. }) if cli.symbol.is_some() => Config::default(),
        Err(error) => return Err(error),
    };
    tracing::debug!(
        assets = config.assets.len(),
        refresh_interval = config.refresh_interval,
        rotation_interval = config.rotation_interval,
        "config ready"
    );

    let asset = match &cli.symbol {
        Some(symbol) => Asset {
            symbol: symbol.clone(),
            name: cli.name.clone().unwrap_or_default(),
            timeframe: cli.timeframe.clone(),
        },
        None => {
            let now = u64::try_from(OffsetDateTime::now_utc().unix_timestamp()).unwrap_or(0);
            config
                .select_asset(now)
                .cloned()
                .ok_or_else(|| CliError::InvalidConfig(String::from("no assets configured")))?
        }
    };

    let cache = match &cli.cache_file {
        Some(path) => PriceCache::new(path),
        None => PriceCache::at_default_location(),
    };
    let router = QuoteRouter::with_reqwest(Arc::new(cache));

    tracing::debug!(symbol = %asset.symbol, timeframe = asset.timeframe(), "resolving asset");
    let quote = router
        .resolve(&asset.symbol, asset.timeframe())
        .await
        .map_err(|source| CliError::Quote {
            symbol: asset.symbol.clone(),
            source,
        })?;

    let view = format::View {
        format: &config.format,
        name: asset.display_name(),
        timeframe: asset.timeframe(),
        colors: &config.colors,
    };
    output::render(&BarOutput {
        text: format::render(&view, &quote),
    })?;

    Ok(ExitCode::SUCCESS)
}
