use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Resolved price and percent change for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: Symbol,
    pub price: f64,
    /// Percent change over the requested timeframe, e.g. `1.25` for +1.25%.
    pub change_percent: f64,
}

impl Quote {
    pub fn new(symbol: Symbol, price: f64, change_percent: f64) -> Self {
        Self {
            symbol,
            price,
            change_percent,
        }
    }

    pub fn is_down(&self) -> bool {
        self.change_percent < 0.0
    }
}
