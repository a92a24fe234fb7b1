use std::path::PathBuf;

use thiserror::Error;

/// Validation errors raised while parsing symbols, numbers and timeframes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,

    #[error("invalid number '{value}'")]
    InvalidNumber { value: String },

    #[error("unknown timeframe '{value}', expected e.g. 15m, 4h, 3D, 1W, 1M, 1Y")]
    UnknownTimeframe { value: String },
}

/// Failures of the persisted price cache. Never fatal for a quote.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
