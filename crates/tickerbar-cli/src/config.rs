//! YAML configuration: display template, colors and the rotating asset list.
//!
//! ```yaml
//! refresh_interval: 60
//! rotation_interval: 10
//! format: "{symbol} {price} ({change}%{icon})"
//! colors:
//!   up: "#00FF00"
//!   down: "#FF0000"
//!   neutral: "#FFFFFF"
//! assets:
//!   - symbol: BTC-USD
//!     name: BTC
//!     timeframe: 1W
//!   - symbol: dolar-blue
//!     name: Blue
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "config.yml";
const CONFIG_DIR_NAME: &str = "tickerbar";

pub const DEFAULT_FORMAT: &str = "{symbol} {price} ({change}%{icon})";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Seconds between refreshes; consumed by the status bar, not here.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
    #[serde(default = "default_rotation_interval")]
    pub rotation_interval: u64,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub colors: Colors,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub timeframe: Option<String>,
}

impl Asset {
    /// `name`, or the symbol when no name is configured.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.symbol
        } else {
            &self.name
        }
    }

    pub fn timeframe(&self) -> &str {
        self.timeframe.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub up: String,
    pub down: String,
    pub neutral: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            up: String::from("#00FF00"),
            down: String::from("#FF0000"),
            neutral: String::from("#FFFFFF"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval: default_refresh_interval(),
            rotation_interval: default_rotation_interval(),
            format: default_format(),
            assets: Vec::new(),
            colors: Colors::default(),
        }
    }
}

fn default_refresh_interval() -> u64 {
    60
}

fn default_rotation_interval() -> u64 {
    10
}

fn default_format() -> String {
    String::from(DEFAULT_FORMAT)
}

impl Config {
    /// Parses and validates a YAML document.
    pub fn from_yaml(path: &Path, text: &str) -> Result<Self, CliError> {
        let config: Self = serde_yaml::from_str(text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::from_yaml(path, &text)
    }

    fn validate(&self) -> Result<(), CliError> {
        if self.rotation_interval == 0 {
            return Err(CliError::InvalidConfig(String::from(
                "rotation_interval must be greater than zero",
            )));
        }
        if self.assets.is_empty() {
            return Err(CliError::InvalidConfig(String::from(
                "at least one asset must be configured",
            )));
        }
        if let Some(index) = self.assets.iter().position(|asset| asset.symbol.trim().is_empty()) {
            return Err(CliError::InvalidConfig(format!(
                "asset #{} has an empty symbol",
                index + 1
            )));
        }
        Ok(())
    }

    /// Asset shown at `unix_secs`; each one stays up for `rotation_interval`.
    pub fn select_asset(&self, unix_secs: u64) -> Option<&Asset> {
        if self.assets.is_empty() || self.rotation_interval == 0 {
            return None;
        }
        let slot = unix_secs / self.rotation_interval;
        // The remainder is below `assets.len()`, so it fits in usize.
        let index = (slot % self.assets.len() as u64) as usize;
        self.assets.get(index)
    }
}

/// Config files tried in order when `--config` is not given.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    paths
}

/// The explicit path, or the first existing candidate.
pub fn resolve_path(explicit: Option<&Path>, candidates: &[PathBuf]) -> Result<PathBuf, CliError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    candidates
        .iter()
        .find(|path| path.is_file())
        .cloned()
        .ok_or_else(|| CliError::ConfigNotFound {
            tried: candidates.to_vec(),
        })
}
