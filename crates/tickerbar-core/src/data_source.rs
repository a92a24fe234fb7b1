//! Quote source trait and request/error types.
//!
//! Every upstream adapter implements [`QuoteSource`]. The router never calls
//! an adapter through anything else, so the trait is the single seam where a
//! new provider plugs in.
//!
//! # Example
//!
//! ```rust,ignore
//! use tickerbar_core::{QuoteRequest, QuoteSource, SourceError, YahooAdapter};
//!
//! async fn fetch(adapter: &YahooAdapter) -> Result<(), SourceError> {
//!     let request = QuoteRequest::parse("AAPL", "1W")?;
//!     let quote = adapter.fetch(&request).await?;
//!     println!("{}: {:.2} ({:+.2}%)", quote.symbol, quote.price, quote.change_percent);
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{ProviderId, Quote, Symbol, ValidationError};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Symbol is blank or could not be mapped to an endpoint.
    UnknownSymbol,
    /// Symbol is routed to a source that does not carry it.
    UnsupportedSymbol,
    /// Upstream answered with a non-2xx status.
    UpstreamHttp,
    /// Connection, timeout or body read failure.
    Transport,
    /// Response body did not match the expected JSON shape.
    MalformedResponse,
    /// Response carried no usable price.
    NoPriceFound,
    InvalidNumber,
    UnknownTimeframe,
}

/// Structured error returned by adapters and the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    status: Option<u16>,
}

impl SourceError {
    fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn unknown_symbol(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::UnknownSymbol, message)
    }

    pub fn unsupported_symbol(provider: ProviderId, symbol: &str) -> Self {
        Self::new(
            SourceErrorKind::UnsupportedSymbol,
            format!("symbol '{symbol}' is not supported by {provider}"),
        )
    }

    pub fn upstream_http(provider: ProviderId, status: u16, target: &str) -> Self {
        Self {
            kind: SourceErrorKind::UpstreamHttp,
            message: format!("{provider} returned HTTP {status} for {target}"),
            status: Some(status),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Transport, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::MalformedResponse, message)
    }

    pub fn no_price(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NoPriceFound, message)
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status for [`SourceErrorKind::UpstreamHttp`] errors.
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::UnknownSymbol => "source.unknown_symbol",
            SourceErrorKind::UnsupportedSymbol => "source.unsupported_symbol",
            SourceErrorKind::UpstreamHttp => "source.upstream_http",
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::MalformedResponse => "source.malformed_response",
            SourceErrorKind::NoPriceFound => "source.no_price_found",
            SourceErrorKind::InvalidNumber => "source.invalid_number",
            SourceErrorKind::UnknownTimeframe => "source.unknown_timeframe",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<ValidationError> for SourceError {
    fn from(error: ValidationError) -> Self {
        let kind = match &error {
            ValidationError::EmptySymbol => SourceErrorKind::UnknownSymbol,
            ValidationError::InvalidNumber { .. } => SourceErrorKind::InvalidNumber,
            ValidationError::UnknownTimeframe { .. } => SourceErrorKind::UnknownTimeframe,
        };
        Self::new(kind, error.to_string())
    }
}

/// A single symbol/timeframe pair to resolve.
///
/// The timeframe is kept as the raw token: adapters that honour it decide
/// for themselves how an unparseable token degrades.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub symbol: Symbol,
    pub timeframe: String,
}

impl QuoteRequest {
    pub fn new(symbol: Symbol, timeframe: impl Into<String>) -> Self {
        Self {
            symbol,
            timeframe: timeframe.into(),
        }
    }

    pub fn parse(symbol: &str, timeframe: &str) -> Result<Self, SourceError> {
        Ok(Self::new(Symbol::parse(symbol)?, timeframe))
    }
}

/// Boxed future returned by [`QuoteSource::fetch`].
pub type QuoteFuture<'a> = Pin<Box<dyn Future<Output = Result<Quote, SourceError>> + Send + 'a>>;

/// Source adapter contract.
///
/// Implementations must be `Send + Sync`; the router holds them behind `Arc`.
pub trait QuoteSource: Send + Sync {
    /// Returns the upstream provider identifier.
    fn id(&self) -> ProviderId;

    /// Fetches the current price and change percent for the request.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the symbol is not carried by this source,
    /// the upstream call fails, or the response holds no usable price.
    fn fetch<'a>(&'a self, request: &'a QuoteRequest) -> QuoteFuture<'a>;
}
