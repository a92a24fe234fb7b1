//! End-to-end resolution through [`QuoteRouter`] with a fixture transport.

use std::sync::Arc;

use tickerbar_core::{
    FixtureHttpClient, PriceCache, QuoteRouter, SourceErrorKind, SourceKind, Symbol,
};

fn router_with(client: FixtureHttpClient, dir: &tempfile::TempDir) -> (QuoteRouter, Arc<FixtureHttpClient>) {
    let client = Arc::new(client);
    let cache = Arc::new(PriceCache::new(dir.path().join("fx_cache.json")));
    (QuoteRouter::new(client.clone(), cache), client)
}

fn all_sources() -> FixtureHttpClient {
    FixtureHttpClient::new()
        .with_json("dolarapi.com/v1/dolares/blue", r#"{"compra":1180,"venta":1200}"#)
        .with_json(
            "api.coingecko.com/api/v3/coins/markets",
            r#"[{"id":"bitcoin","current_price":64000.0,"price_change_percentage_24h":3.5}]"#,
        )
        .with_json(
            "query1.finance.yahoo.com/v8/finance/chart/",
            r#"{"chart":{"result":[{"meta":{"regularMarketPrice":190.0,"regularMarketChangePercent":-0.4}}]}}"#,
        )
}

#[tokio::test]
async fn each_family_reaches_its_own_host() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (router, client) = router_with(all_sources(), &dir);

    let fx = router.resolve("dolar-blue", "").await.expect("fx quote");
    let crypto = router.resolve("BTC-USD", "").await.expect("crypto quote");
    let equity = router.resolve("AAPL", "").await.expect("equity quote");

    assert_eq!((fx.price, fx.change_percent), (1200.0, 0.0));
    assert_eq!((crypto.price, crypto.change_percent), (64000.0, 3.5));
    assert_eq!((equity.price, equity.change_percent), (190.0, -0.4));

    let urls: Vec<String> = client.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(urls.len(), 3);
    assert!(urls[0].contains("dolarapi.com"));
    assert!(urls[1].contains("coingecko.com"));
    assert!(urls[2].contains("finance.yahoo.com"));
}

#[tokio::test]
async fn fx_change_tracks_previous_invocation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (router, _) = router_with(
        FixtureHttpClient::new().with_json("/v1/dolares/blue", r#"{"venta":1200}"#),
        &dir,
    );
    let first = router.resolve("dolar-blue", "").await.expect("first");
    assert_eq!(first.change_percent, 0.0);

    // A later process sees a new price and the cache left on disk.
    let (router, _) = router_with(
        FixtureHttpClient::new().with_json("/v1/dolares/blue", r#"{"venta":1260}"#),
        &dir,
    );
    let second = router.resolve("dolar-blue", "").await.expect("second");
    assert_eq!(second.price, 1260.0);
    assert!((second.change_percent - 5.0).abs() < 1e-9);
}

#[tokio::test]
async fn yahoo_fx_pairs_route_to_equity_source() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (router, client) = router_with(all_sources(), &dir);

    let symbol = Symbol::parse("EURUSD=X").expect("valid symbol");
    assert_eq!(SourceKind::classify(&symbol), SourceKind::Equity);

    let quote = router.resolve("EURUSD=X", "").await.expect("quote");
    assert_eq!(quote.symbol.as_str(), "EURUSD=X");
    assert!(client.requests()[0].url.ends_with("/chart/EURUSD%3DX"));
}

#[tokio::test]
async fn unsupported_crypto_pair_never_hits_network() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (router, client) = router_with(all_sources(), &dir);

    let error = router.resolve("doge-usd", "1W").await.expect_err("must fail");

    assert_eq!(error.kind(), SourceErrorKind::UnsupportedSymbol);
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn unusual_tickers_are_url_encoded_for_yahoo() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (router, client) = router_with(all_sources(), &dir);

    for symbol in ["M&M.NS", "BRK B", "BTC/USD"] {
        let quote = router.resolve(symbol, "").await.expect("quote");
        assert_eq!(quote.symbol.as_str(), symbol);
    }

    let urls: Vec<String> = client.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(urls.len(), 3);
    assert!(urls[0].ends_with("/chart/M%26M.NS"));
    assert!(urls[1].ends_with("/chart/BRK%20B"));
    assert!(urls[2].ends_with("/chart/BTC%2FUSD"));
}

#[tokio::test]
async fn blank_symbol_is_the_only_lexical_rejection() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (router, client) = router_with(all_sources(), &dir);

    let error = router.resolve("  ", "").await.expect_err("must fail");

    assert_eq!(error.kind(), SourceErrorKind::UnknownSymbol);
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn transport_failure_is_reported_as_transport() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (router, _) = router_with(FixtureHttpClient::new(), &dir);

    let error = router.resolve("AAPL", "").await.expect_err("must fail");

    assert_eq!(error.kind(), SourceErrorKind::Transport);
    assert_eq!(error.code(), "source.transport");
}
