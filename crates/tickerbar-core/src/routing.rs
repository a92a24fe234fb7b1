//! Symbol classification and dispatch to the matching adapter.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::adapters::{CoinGeckoAdapter, DolarApiAdapter, YahooAdapter};
use crate::adapters::{CRYPTO_PAIR_TOKEN, DOLAR_PREFIX};
use crate::cache::PriceCache;
use crate::data_source::{QuoteRequest, QuoteSource, SourceError};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::{ProviderId, Quote, Symbol};

/// Which upstream family a symbol belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Fx,
    Crypto,
    Equity,
}

impl SourceKind {
    /// First match wins: `dolar-` prefix, then a `-USD` pair, then equity.
    pub fn classify(symbol: &Symbol) -> Self {
        let upper = symbol.as_str().to_ascii_uppercase();
        if upper.starts_with(&DOLAR_PREFIX.to_ascii_uppercase()) {
            Self::Fx
        } else if upper.contains(CRYPTO_PAIR_TOKEN) {
            Self::Crypto
        } else {
            Self::Equity
        }
    }

    pub const fn provider(self) -> ProviderId {
        match self {
            Self::Fx => ProviderId::DolarApi,
            Self::Crypto => ProviderId::CoinGecko,
            Self::Equity => ProviderId::Yahoo,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fx => "fx",
            Self::Crypto => "crypto",
            Self::Equity => "equity",
        }
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owns one adapter per [`SourceKind`] and resolves symbols through them.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use tickerbar_core::{PriceCache, QuoteRouter};
///
/// let router = QuoteRouter::with_reqwest(Arc::new(PriceCache::at_default_location()));
/// let quote = router.resolve("BTC-USD", "1W").await?;
/// ```
#[derive(Clone)]
pub struct QuoteRouter {
    fx: DolarApiAdapter,
    crypto: CoinGeckoAdapter,
    equity: YahooAdapter,
}

impl QuoteRouter {
    pub fn new(http_client: Arc<dyn HttpClient>, cache: Arc<PriceCache>) -> Self {
        Self {
            fx: DolarApiAdapter::new(Arc::clone(&http_client), cache),
            crypto: CoinGeckoAdapter::new(Arc::clone(&http_client)),
            equity: YahooAdapter::new(http_client),
        }
    }

    /// Router backed by the production reqwest transport.
    pub fn with_reqwest(cache: Arc<PriceCache>) -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()), cache)
    }

    pub fn source_for(&self, kind: SourceKind) -> &dyn QuoteSource {
        match kind {
            SourceKind::Fx => &self.fx,
            SourceKind::Crypto => &self.crypto,
            SourceKind::Equity => &self.equity,
        }
    }

    /// Resolves `symbol` over `timeframe` (empty for daily).
    pub async fn resolve(&self, symbol: &str, timeframe: &str) -> Result<Quote, SourceError> {
        let request = QuoteRequest::parse(symbol, timeframe)?;
        self.route(&request).await
    }

    pub async fn route(&self, request: &QuoteRequest) -> Result<Quote, SourceError> {
        let kind = SourceKind::classify(&request.symbol);
        let source = self.source_for(kind);
        tracing::debug!(
            symbol = %request.symbol,
            timeframe = %request.timeframe,
            %kind,
            provider = %source.id(),
            "routing quote"
        );
        source.fetch(request).await
    }
}
