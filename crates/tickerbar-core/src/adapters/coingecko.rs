use std::sync::Arc;

use serde::Deserialize;
use time::Duration;

use crate::adapters::get_json;
use crate::data_source::{QuoteFuture, QuoteRequest, QuoteSource, SourceError};
use crate::domain::{change_over, ChangeWindow, PricePoint};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{ProviderId, Quote};

/// Symbol token that routes to this adapter, matched case-insensitively.
pub const CRYPTO_PAIR_TOKEN: &str = "-USD";

const BASE_URL: &str = "https://api.coingecko.com/api/v3";
const TIMEOUT_MS: u64 = 10_000;
const DAY_SECS: i64 = 86_400;

const COIN_IDS: [(&str, &str); 3] = [
    ("BTC-USD", "bitcoin"),
    ("ETH-USD", "ethereum"),
    ("SOL-USD", "solana"),
];

/// Cryptocurrency quotes in USD from CoinGecko.
#[derive(Clone)]
pub struct CoinGeckoAdapter {
    http_client: Arc<dyn HttpClient>,
}

impl CoinGeckoAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    /// CoinGecko coin id for a supported `XXX-USD` symbol.
    pub fn coin_id(symbol: &str) -> Option<&'static str> {
        let key = symbol.trim().to_ascii_uppercase();
        COIN_IDS
            .iter()
            .find(|(pair, _)| *pair == key)
            .map(|(_, id)| *id)
    }

    async fn fetch_quote(&self, request: &QuoteRequest) -> Result<Quote, SourceError> {
        let symbol = request.symbol.as_str();
        let id = Self::coin_id(symbol)
            .ok_or_else(|| SourceError::unsupported_symbol(ProviderId::CoinGecko, symbol))?;

        let url = format!("{BASE_URL}/coins/markets?vs_currency=usd&ids={id}");
        let markets: Vec<CoinGeckoMarket> = self.get(url, symbol).await?;
        let market = markets
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::no_price(format!("no data for {symbol}")))?;
        let price = market
            .current_price
            .ok_or_else(|| SourceError::no_price(format!("no current price for {symbol}")))?;

        let change_percent = match ChangeWindow::from_token(&request.timeframe) {
            ChangeWindow::Daily => market.price_change_percentage_24h.unwrap_or(0.0),
            ChangeWindow::Lookback(lookback) => {
                let url = format!(
                    "{BASE_URL}/coins/{id}/market_chart?vs_currency=usd&days={}",
                    history_days(lookback)
                );
                let chart: CoinGeckoMarketChart = self.get(url, symbol).await?;
                change_over(&chart.points(), lookback).unwrap_or(0.0)
            }
            ChangeWindow::Unparseable => 0.0,
        };

        Ok(Quote::new(request.symbol.clone(), price, change_percent))
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        symbol: &str,
    ) -> Result<T, SourceError> {
        let request = HttpRequest::get(url).with_timeout_ms(TIMEOUT_MS);
        get_json(self.http_client.as_ref(), ProviderId::CoinGecko, symbol, request).await
    }
}

impl QuoteSource for CoinGeckoAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::CoinGecko
    }

    fn fetch<'a>(&'a self, request: &'a QuoteRequest) -> QuoteFuture<'a> {
        Box::pin(self.fetch_quote(request))
    }
}

/// Whole days of history covering `lookback`, at least one.
fn history_days(lookback: Duration) -> i64 {
    let secs = lookback.whole_seconds().max(0);
    ((secs + DAY_SECS - 1) / DAY_SECS).max(1)
}

#[derive(Debug, Clone, Deserialize)]
struct CoinGeckoMarket {
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct CoinGeckoMarketChart {
    /// `[unix_millis, price]` pairs, oldest first.
    #[serde(default)]
    prices: Vec<(f64, f64)>,
}

impl CoinGeckoMarketChart {
    fn points(&self) -> Vec<PricePoint> {
        self.prices
            .iter()
            .map(|(millis, price)| PricePoint::new((millis / 1000.0) as i64, *price))
            .collect()
    }
}
