use std::sync::Arc;

use serde::Deserialize;

use crate::adapters::get_json;
use crate::cache::PriceCache;
use crate::data_source::{QuoteFuture, QuoteRequest, QuoteSource, SourceError};
use crate::domain::{percent_change, LooseNumber};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{ProviderId, Quote};

/// Symbol prefix that routes to this adapter, matched case-insensitively.
pub const DOLAR_PREFIX: &str = "dolar-";

const BASE_URL: &str = "https://dolarapi.com/v1/dolares";
const TIMEOUT_MS: u64 = 8_000;

const ALIASES: [(&str, &str); 9] = [
    ("dolar-oficial", "oficial"),
    ("dolar-blue", "blue"),
    ("dolar-bolsa", "bolsa"),
    ("dolar-mep", "bolsa"),
    ("dolar-ccl", "contadoconliqui"),
    ("dolar-contadoconliqui", "contadoconliqui"),
    ("dolar-tarjeta", "tarjeta"),
    ("dolar-mayorista", "mayorista"),
    ("dolar-cripto", "cripto"),
];

/// Argentine dollar quotes from dolarapi.com.
///
/// The API has no history, so the change is computed against the price
/// recorded in the [`PriceCache`] by the previous call.
#[derive(Clone)]
pub struct DolarApiAdapter {
    http_client: Arc<dyn HttpClient>,
    cache: Arc<PriceCache>,
}

impl DolarApiAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, cache: Arc<PriceCache>) -> Self {
        Self { http_client, cache }
    }

    /// API endpoint segment for a `dolar-*` symbol.
    pub fn endpoint_for(symbol: &str) -> Result<String, SourceError> {
        let key = symbol.trim().to_ascii_lowercase();
        if let Some((_, endpoint)) = ALIASES.iter().find(|(alias, _)| *alias == key) {
            return Ok((*endpoint).to_owned());
        }

        match key.strip_prefix(DOLAR_PREFIX) {
            Some(rest) if !rest.is_empty() => Ok(rest.to_owned()),
            _ => Err(SourceError::unknown_symbol(format!(
                "unknown dolar symbol: {symbol}"
            ))),
        }
    }

    async fn fetch_quote(&self, request: &QuoteRequest) -> Result<Quote, SourceError> {
        let symbol = request.symbol.as_str();
        let endpoint = Self::endpoint_for(symbol)?;
        let url = format!("{BASE_URL}/{}", urlencoding::encode(&endpoint));

        let payload: DolarApiQuote = get_json(
            self.http_client.as_ref(),
            ProviderId::DolarApi,
            &endpoint,
            HttpRequest::get(url).with_timeout_ms(TIMEOUT_MS),
        )
        .await?;

        let price = payload.price().ok_or_else(|| {
            SourceError::no_price(format!("no price found in dolarapi response for {endpoint}"))
        })?;

        let change_percent = match self.cache.previous(symbol).await {
            Some(previous) if previous != 0.0 => percent_change(price, previous),
            _ => 0.0,
        };

        if let Err(error) = self.cache.record(symbol, price).await {
            tracing::warn!(%error, "could not save price cache");
        }

        Ok(Quote::new(request.symbol.clone(), price, change_percent))
    }
}

impl QuoteSource for DolarApiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::DolarApi
    }

    /// The request timeframe is ignored.
    fn fetch<'a>(&'a self, request: &'a QuoteRequest) -> QuoteFuture<'a> {
        Box::pin(self.fetch_quote(request))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DolarApiQuote {
    #[serde(default)]
    compra: Option<LooseNumber>,
    #[serde(default)]
    venta: Option<LooseNumber>,
}

impl DolarApiQuote {
    /// Sell price, falling back to buy price; zero counts as missing.
    fn price(&self) -> Option<f64> {
        [&self.venta, &self.compra]
            .into_iter()
            .flatten()
            .filter_map(|value| match value.to_f64() {
                Ok(price) => Some(price),
                Err(error) => {
                    tracing::debug!(%error, "skipping dolarapi price field");
                    None
                }
            })
            .find(|price| *price != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::http_client::FixtureHttpClient;

    fn payload(json: &str) -> DolarApiQuote {
        serde_json::from_str(json).expect("valid payload")
    }

    #[test]
    fn maps_aliases_and_falls_back_to_suffix() {
        assert_eq!(DolarApiAdapter::endpoint_for("dolar-mep").as_deref(), Ok("bolsa"));
        assert_eq!(
            DolarApiAdapter::endpoint_for("Dolar-CCL").as_deref(),
            Ok("contadoconliqui")
        );
        assert_eq!(
            DolarApiAdapter::endpoint_for("dolar-solidario").as_deref(),
            Ok("solidario")
        );
    }

    #[test]
    fn rejects_symbols_without_endpoint() {
        for symbol in ["dolar-", "euro-blue"] {
            let error = DolarApiAdapter::endpoint_for(symbol).expect_err("must fail");
            assert_eq!(error.kind(), SourceErrorKind::UnknownSymbol);
        }
    }

    #[test]
    fn prefers_venta_then_compra() {
        assert_eq!(payload(r#"{"compra": 990, "venta": 1010.5}"#).price(), Some(1010.5));
        assert_eq!(payload(r#"{"compra": "1.005,25", "venta": 0}"#).price(), Some(1005.25));
        assert_eq!(payload(r#"{"compra": 990, "venta": "n/a"}"#).price(), Some(990.0));
        assert_eq!(payload(r#"{"compra": null}"#).price(), None);
    }

    #[test]
    fn odd_field_types_fall_through_to_the_other_field() {
        assert_eq!(payload(r#"{"compra": 990, "venta": true}"#).price(), Some(990.0));
        assert_eq!(
            payload(r#"{"compra": {"value": 1}, "venta": "1.010,00"}"#).price(),
            Some(1010.0)
        );
        assert_eq!(payload(r#"{"compra": [], "venta": false}"#).price(), None);
    }

    #[tokio::test]
    async fn cache_write_failure_still_returns_quote() {
        let dir = tempfile::tempdir().expect("tempdir");
        // The cache path is a directory, so every persist fails.
        let cache = Arc::new(PriceCache::new(dir.path()));
        let client = Arc::new(
            FixtureHttpClient::new().with_json("/dolares/blue", r#"{"compra": 1180, "venta": 1200}"#),
        );
        let adapter = DolarApiAdapter::new(client, Arc::clone(&cache));

        let request = QuoteRequest::parse("dolar-blue", "").expect("valid request");
        let quote = adapter.fetch(&request).await.expect("quote despite cache failure");

        assert_eq!(quote.price, 1200.0);
        assert_eq!(quote.change_percent, 0.0);
        assert_eq!(cache.previous("dolar-blue").await, Some(1200.0));
    }

    #[tokio::test]
    async fn missing_prices_fail_without_touching_cache() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = Arc::new(PriceCache::new(dir.path().join("cache.json")));
        let client = Arc::new(
            FixtureHttpClient::new().with_json("/dolares/blue", r#"{"compra": 0, "venta": 0}"#),
        );
        let adapter = DolarApiAdapter::new(client, Arc::clone(&cache));

        let request = QuoteRequest::parse("dolar-blue", "").expect("valid request");
        let error = adapter.fetch(&request).await.expect_err("no price");

        assert_eq!(error.kind(), SourceErrorKind::NoPriceFound);
        assert!(cache.snapshot().await.is_empty());
    }
}
