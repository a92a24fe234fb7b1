//! # Tickerbar Core
//!
//! Quote resolution for the tickerbar status-bar module: given a symbol and
//! an optional timeframe, produce a current price and a percent change.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | DolarApi, Yahoo chart and CoinGecko adapters |
//! | [`cache`] | Persisted last-observed price per symbol |
//! | [`data_source`] | [`QuoteSource`] trait, request and error types |
//! | [`domain`] | Quote, Symbol, numbers, timeframes, price history |
//! | [`error`] | Validation and cache error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`routing`] | [`SourceKind`] classification and [`QuoteRouter`] |
//! | [`source`] | Provider identifiers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickerbar_core::{PriceCache, QuoteRouter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cache = Arc::new(PriceCache::at_default_location());
//!     let router = QuoteRouter::with_reqwest(cache);
//!
//!     let quote = router.resolve("AAPL", "1M").await?;
//!     println!("{} {:.2} ({:.2}%)", quote.symbol, quote.price, quote.change_percent);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Config   │
//! └────────┬────────┘
//!          │ symbol, timeframe
//!          ▼
//! ┌─────────────────┐
//! │  Quote Router   │  SourceKind::{Fx, Crypto, Equity}
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Quote Source    │────▶│ HTTP Client      │
//! │ (Adapter Trait) │     │ (reqwest/fixture)│
//! └────────┬────────┘     └──────────────────┘
//!          │ DolarApi only
//!          ▼
//! ┌─────────────────┐
//! │ Price Cache     │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use tickerbar_core::{SourceError, SourceErrorKind};
//!
//! fn describe(error: &SourceError) -> &'static str {
//!     match error.kind() {
//!         SourceErrorKind::UpstreamHttp | SourceErrorKind::Transport => "upstream unavailable",
//!         SourceErrorKind::UnsupportedSymbol | SourceErrorKind::UnknownSymbol => "bad symbol",
//!         _ => "no quote",
//!     }
//! }
//! ```

pub mod adapters;
pub mod cache;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod routing;
pub mod source;

// Re-export commonly used types at crate root for convenience

pub use adapters::{CoinGeckoAdapter, DolarApiAdapter, YahooAdapter};

pub use cache::PriceCache;

pub use data_source::{QuoteFuture, QuoteRequest, QuoteSource, SourceError, SourceErrorKind};

pub use domain::{
    change_over, parse_decimal, parse_timeframe, percent_change, ChangeWindow, LooseNumber,
    PricePoint, Quote, Symbol,
};

pub use error::{CacheError, ValidationError};

pub use http_client::{
    FixtureHttpClient, HttpClient, HttpError, HttpFuture, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};

pub use routing::{QuoteRouter, SourceKind};

pub use source::ProviderId;
