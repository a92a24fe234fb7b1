//! CLI argument definitions for tickerbar.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--config` | discovered | YAML config file |
//! | `--cache-file` | `<cache_dir>/tickerbar/fx_cache.json` | Price cache file |
//! | `--symbol` | rotation | Resolve one symbol instead of the configured assets |
//! | `--timeframe` | none | Timeframe for `--symbol` |
//! | `--name` | symbol | Display name for `--symbol` |
//!
//! # Examples
//!
//! ```bash
//! # Rotate through the assets in ~/.config/tickerbar/config.yml
//! tickerbar
//!
//! # One-off quote with a weekly change
//! tickerbar --symbol BTC-USD --timeframe 1W --name BTC
//! ```

use std::path::PathBuf;

use clap::Parser;

/// Status-bar module printing one quote as `{"text": "..."}` JSON.
#[derive(Debug, Parser)]
#[command(
    name = "tickerbar",
    author,
    version,
    about = "Status-bar quote module for stocks, crypto and Argentine dollar rates",
    long_about = "Prints a single JSON object with a Pango markup `text` field, suitable for a \
custom status-bar module. Assets rotate every `rotation_interval` seconds.\n\
\n\
Symbols are routed by shape:\n\
\n\
  • dolar-*   DolarApi (change against the previous run)\n\
  • *-USD     CoinGecko\n\
  • anything else   Yahoo Finance chart API\n\
\n\
Set TICKERBAR_LOG=debug to log requests on stderr."
)]
pub struct Cli {
    /// Path to the YAML config file.
    ///
    /// Defaults to ./config.yml, then <config_dir>/tickerbar/config.yml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the persisted price cache.
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,

    /// Resolve this symbol instead of rotating through configured assets.
    #[arg(long)]
    pub symbol: Option<String>,

    /// Timeframe for --symbol (e.g. 15m, 4h, 1W, 1M, 1Y).
    #[arg(long, requires = "symbol")]
    pub timeframe: Option<String>,

    /// Display name for --symbol.
    #[arg(long, requires = "symbol")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_one_off_symbol() {
        let cli = Cli::try_parse_from([
            "tickerbar",
            "--symbol",
            "AAPL",
            "--timeframe",
            "1W",
            "--cache-file",
            "/tmp/cache.json",
        ])
        .expect("valid args");

        assert_eq!(cli.symbol.as_deref(), Some("AAPL"));
        assert_eq!(cli.timeframe.as_deref(), Some("1W"));
        assert_eq!(cli.cache_file, Some(PathBuf::from("/tmp/cache.json")));
        assert!(cli.config.is_none());
    }

    #[test]
    fn timeframe_requires_symbol() {
        assert!(Cli::try_parse_from(["tickerbar", "--timeframe", "1W"]).is_err());
    }
}
