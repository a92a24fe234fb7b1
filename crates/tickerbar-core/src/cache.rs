//! Persisted last-observed price per symbol.
//!
//! Sources without historical data (DolarApi) report change against the
//! previous run's price. The map is loaded from disk on first access, and
//! the whole map is rewritten after every update.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::CacheError;

const CACHE_DIR_NAME: &str = "tickerbar";
const CACHE_FILE_NAME: &str = "fx_cache.json";

/// File-backed symbol → price map guarded by a single async mutex.
#[derive(Debug)]
pub struct PriceCache {
    path: PathBuf,
    entries: Mutex<Option<BTreeMap<String, f64>>>,
}

impl PriceCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(None),
        }
    }

    /// Cache stored under the per-user cache directory.
    pub fn at_default_location() -> Self {
        Self::new(Self::default_path())
    }

    /// `<cache_dir>/tickerbar/fx_cache.json`, or the working directory when
    /// the platform has no cache directory.
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CACHE_DIR_NAME)
            .join(CACHE_FILE_NAME)
    }

    /// Last recorded price for `symbol`, if any.
    pub async fn previous(&self, symbol: &str) -> Option<f64> {
        let mut guard = self.entries.lock().await;
        let entries = ensure_loaded(&mut guard, &self.path).await;
        entries.get(symbol).copied()
    }

    /// Overwrites the entry for `symbol` and persists the full map.
    ///
    /// The in-memory entry is updated even when the write fails.
    pub async fn record(&self, symbol: &str, price: f64) -> Result<(), CacheError> {
        let mut guard = self.entries.lock().await;
        let entries = ensure_loaded(&mut guard, &self.path).await;
        entries.insert(symbol.to_owned(), price);
        persist(&self.path, entries).await
    }

    /// Copy of the current map.
    pub async fn snapshot(&self) -> BTreeMap<String, f64> {
        let mut guard = self.entries.lock().await;
        ensure_loaded(&mut guard, &self.path).await.clone()
    }
}

async fn ensure_loaded<'a>(
    slot: &'a mut Option<BTreeMap<String, f64>>,
    path: &Path,
) -> &'a mut BTreeMap<String, f64> {
    if slot.is_none() {
        *slot = Some(load(path).await);
    }
    slot.get_or_insert_with(BTreeMap::new)
}

async fn load(path: &Path) -> BTreeMap<String, f64> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::debug!(path = %path.display(), %error, "price cache not read, starting empty");
            return BTreeMap::new();
        }
    };

    serde_json::from_slice(&bytes).unwrap_or_else(|error| {
        tracing::warn!(path = %path.display(), %error, "price cache is malformed, starting empty");
        BTreeMap::new()
    })
}

async fn persist(path: &Path, entries: &BTreeMap<String, f64>) -> Result<(), CacheError> {
    let io_error = |source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }

    let body = serde_json::to_vec_pretty(entries)?;
    tokio::fs::write(path, body).await.map_err(io_error)
}
