//! Upstream adapters, one per provider.

mod coingecko;
mod dolarapi;
mod yahoo;

pub use coingecko::{CoinGeckoAdapter, CRYPTO_PAIR_TOKEN};
pub use dolarapi::{DolarApiAdapter, DOLAR_PREFIX};
pub use yahoo::YahooAdapter;

use serde::de::DeserializeOwned;

use crate::data_source::SourceError;
use crate::http_client::{HttpClient, HttpRequest};
use crate::ProviderId;

/// Executes a GET and decodes the JSON body into `T`.
///
/// `target` names the requested resource in error messages.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http_client: &dyn HttpClient,
    provider: ProviderId,
    target: &str,
    request: HttpRequest,
) -> Result<T, SourceError> {
    tracing::debug!(%provider, url = %request.url, "fetching");

    let response = http_client.execute(request).await.map_err(|error| {
        SourceError::transport(format!("{provider} transport error: {}", error.message()))
    })?;

    if !response.is_success() {
        return Err(SourceError::upstream_http(provider, response.status, target));
    }

    serde_json::from_str(&response.body).map_err(|error| {
        SourceError::malformed(format!("failed to parse {provider} response for {target}: {error}"))
    })
}
