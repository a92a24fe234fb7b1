use std::sync::Arc;

use serde::Deserialize;
use time::Duration;

use crate::adapters::get_json;
use crate::data_source::{QuoteFuture, QuoteRequest, QuoteSource, SourceError};
use crate::domain::{change_over, last_two_change, percent_change, ChangeWindow, PricePoint};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{ProviderId, Quote};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const TIMEOUT_MS: u64 = 10_000;
/// The chart endpoint rejects non-browser agents.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Equity, ETF and index quotes from the Yahoo Finance chart API.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
}

impl YahooAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    async fn fetch_quote(&self, request: &QuoteRequest) -> Result<Quote, SourceError> {
        let symbol = request.symbol.as_str();
        let chart = self.fetch_chart(symbol, None).await?;
        let closes = chart.closes();

        let price = chart
            .meta
            .regular_market_price
            .filter(|price| *price != 0.0)
            .or_else(|| closes.last().copied())
            .ok_or_else(|| SourceError::no_price(format!("could not determine price for {symbol}")))?;

        let change_percent = match ChangeWindow::from_token(&request.timeframe) {
            ChangeWindow::Daily => chart.daily_change(price, &closes),
            ChangeWindow::Lookback(lookback) => {
                let (range, interval) = chart_range(lookback);
                let history = self.fetch_chart(symbol, Some((range, interval))).await?;
                change_over(&history.points(), lookback).unwrap_or(0.0)
            }
            ChangeWindow::Unparseable => 0.0,
        };

        Ok(Quote::new(request.symbol.clone(), price, change_percent))
    }

    async fn fetch_chart(
        &self,
        symbol: &str,
        range: Option<(&str, &str)>,
    ) -> Result<YahooChartResult, SourceError> {
        let mut url = format!("{CHART_URL}/{}", urlencoding::encode(symbol));
        if let Some((range, interval)) = range {
            url.push_str(&format!("?range={range}&interval={interval}"));
        }

        let request = HttpRequest::get(url)
            .with_header("user-agent", BROWSER_USER_AGENT)
            .with_timeout_ms(TIMEOUT_MS);
        let response: YahooChartResponse =
            get_json(self.http_client.as_ref(), ProviderId::Yahoo, symbol, request).await?;

        if let Some(error) = response.chart.error {
            return Err(SourceError::no_price(format!(
                "yahoo chart error for {symbol}: {}",
                error.describe()
            )));
        }

        response
            .chart
            .result
            .into_iter()
            .flatten()
            .next()
            .ok_or_else(|| SourceError::no_price(format!("no results for {symbol}")))
    }
}

impl QuoteSource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn fetch<'a>(&'a self, request: &'a QuoteRequest) -> QuoteFuture<'a> {
        Box::pin(self.fetch_quote(request))
    }
}

/// Chart `range` and `interval` covering `lookback`.
///
/// Intraday lookbacks get fine intervals; anything past a month is daily.
fn chart_range(lookback: Duration) -> (&'static str, &'static str) {
    const TIERS: [(i64, &str, &str); 7] = [
        (3_600, "1d", "1m"),
        (86_400, "5d", "5m"),
        (7 * 86_400, "1mo", "30m"),
        (31 * 86_400, "3mo", "1d"),
        (92 * 86_400, "6mo", "1d"),
        (366 * 86_400, "2y", "1d"),
        (5 * 365 * 86_400, "10y", "1d"),
    ];

    let secs = lookback.whole_seconds();
    TIERS
        .iter()
        .find(|(max_secs, _, _)| secs <= *max_secs)
        .map_or(("max", "1d"), |(_, range, interval)| (*range, *interval))
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChart {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl YahooChartError {
    fn describe(&self) -> String {
        match (&self.code, &self.description) {
            (Some(code), Some(description)) => format!("{code}: {description}"),
            (Some(text), None) | (None, Some(text)) => text.clone(),
            (None, None) => String::from("unknown error"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: YahooChartMeta,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: YahooIndicators,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooChartMeta {
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    regular_market_change_percent: Option<f64>,
    #[serde(default)]
    previous_close: Option<f64>,
    #[serde(default)]
    chart_previous_close: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooIndicators {
    #[serde(default)]
    quote: Vec<YahooQuoteIndicator>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooQuoteIndicator {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl YahooChartResult {
    fn raw_closes(&self) -> &[Option<f64>] {
        self.indicators
            .quote
            .first()
            .map(|quote| quote.close.as_slice())
            .unwrap_or(&[])
    }

    /// Non-null closes in chronological order.
    fn closes(&self) -> Vec<f64> {
        self.raw_closes().iter().flatten().copied().collect()
    }

    /// Timestamp/close pairs with null closes dropped.
    fn points(&self) -> Vec<PricePoint> {
        self.timestamp
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .zip(self.raw_closes())
            .filter_map(|(ts, close)| close.map(|value| PricePoint::new(*ts, value)))
            .collect()
    }

    fn daily_change(&self, price: f64, closes: &[f64]) -> f64 {
        let meta = &self.meta;
        meta.regular_market_change_percent
            .or_else(|| {
                [meta.previous_close, meta.chart_previous_close]
                    .into_iter()
                    .flatten()
                    .find(|previous| *previous != 0.0)
                    .map(|previous| percent_change(price, previous))
            })
            .or_else(|| last_two_change(closes))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::http_client::{FixtureHttpClient, HttpResponse};

    fn chart(json: &str) -> YahooChartResult {
        let response: YahooChartResponse = serde_json::from_str(json).expect("valid chart");
        response
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .expect("one result")
    }

    #[test]
    fn range_tiers_cover_lookback() {
        assert_eq!(chart_range(Duration::minutes(15)), ("1d", "1m"));
        assert_eq!(chart_range(Duration::hours(4)), ("5d", "5m"));
        assert_eq!(chart_range(Duration::days(7)), ("1mo", "30m"));
        assert_eq!(chart_range(Duration::days(30)), ("3mo", "1d"));
        assert_eq!(chart_range(Duration::days(90)), ("6mo", "1d"));
        assert_eq!(chart_range(Duration::days(365)), ("2y", "1d"));
        assert_eq!(chart_range(Duration::days(3 * 365)), ("10y", "1d"));
        assert_eq!(chart_range(Duration::days(20 * 365)), ("max", "1d"));
    }

    #[test]
    fn daily_change_prefers_meta_percent() {
        let result = chart(
            r#"{"chart":{"result":[{"meta":{"regularMarketPrice":101.0,
            "regularMarketChangePercent":1.25,"previousClose":50.0},
            "indicators":{"quote":[{"close":[90.0,95.0]}]}}],"error":null}}"#,
        );
        assert_eq!(result.daily_change(101.0, &result.closes()), 1.25);
    }

    #[test]
    fn daily_change_from_previous_close_candidates() {
        let result = chart(
            r#"{"chart":{"result":[{"meta":{"previousClose":0.0,"chartPreviousClose":100.0}}]}}"#,
        );
        assert_eq!(result.daily_change(110.0, &[]), 10.0);
    }

    #[test]
    fn daily_change_from_last_two_closes_skips_nulls() {
        let result = chart(
            r#"{"chart":{"result":[{"meta":{},
            "indicators":{"quote":[{"close":[100.0,null,200.0,null]}]}}]}}"#,
        );
        assert_eq!(result.closes(), vec![100.0, 200.0]);
        assert_eq!(result.daily_change(200.0, &result.closes()), 100.0);
    }

    #[test]
    fn points_pair_timestamps_with_non_null_closes() {
        let result = chart(
            r#"{"chart":{"result":[{"meta":{},"timestamp":[1,2,3],
            "indicators":{"quote":[{"close":[10.0,null,30.0]}]}}]}}"#,
        );
        assert_eq!(
            result.points(),
            vec![PricePoint::new(1, 10.0), PricePoint::new(3, 30.0)]
        );
    }

    #[tokio::test]
    async fn chart_error_object_is_no_price() {
        let client = Arc::new(FixtureHttpClient::new().with_json(
            "/chart/NOPE",
            r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found"}}}"#,
        ));
        let adapter = YahooAdapter::new(client);
        let request = QuoteRequest::parse("NOPE", "").expect("valid request");

        let error = adapter.fetch(&request).await.expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::NoPriceFound);
        assert!(error.message().contains("Not Found"));
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_http() {
        let client = Arc::new(
            FixtureHttpClient::new().with_route("/chart/AAPL", HttpResponse::new(502, "bad gateway")),
        );
        let adapter = YahooAdapter::new(client);
        let request = QuoteRequest::parse("AAPL", "").expect("valid request");

        let error = adapter.fetch(&request).await.expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::UpstreamHttp);
        assert_eq!(error.status(), Some(502));
    }

    #[tokio::test]
    async fn requests_send_browser_user_agent() {
        let client = Arc::new(FixtureHttpClient::new().with_json(
            "/chart/AAPL",
            r#"{"chart":{"result":[{"meta":{"regularMarketPrice":190.0}}]}}"#,
        ));
        let adapter = YahooAdapter::new(Arc::clone(&client) as Arc<dyn HttpClient>);
        let request = QuoteRequest::parse("AAPL", "").expect("valid request");

        let quote = adapter.fetch(&request).await.expect("quote");
        assert_eq!(quote.price, 190.0);
        assert_eq!(quote.change_percent, 0.0);

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0]
            .headers
            .get("user-agent")
            .is_some_and(|agent| agent.starts_with("Mozilla/5.0")));
    }
}
