//! Contract tests for the Yahoo adapter against canned HTTP responses.
//!
//! A scripted [`HttpClient`] answers the cookie, crumb, quoteSummary and chart
//! endpoints so the full request/parse path runs without network access.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tickview_core::{
    HistoryRequest, HttpClient, HttpError, HttpRequest, HttpResponse, MarketDataSource, Period,
    SessionState, SourceErrorKind, Symbol, YahooAdapter,
};

const CRUMB: &str = "Abc.123/xyz";

const QUOTE_SUMMARY_BODY: &str = r#"{
  "quoteSummary": {
    "result": [{
      "price": {"shortName": "Apple Inc.", "marketCap": {"raw": 3000000000000, "fmt": "3T"}},
      "summaryDetail": {
        "fiftyTwoWeekLow": {"raw": 164.08, "fmt": "164.08"},
        "fiftyTwoWeekHigh": {"raw": 237.23, "fmt": "237.23"},
        "volume": {"raw": 41234567},
        "averageVolume": {"raw": 55000000},
        "marketCap": {"raw": 3400000000000}
      },
      "summaryProfile": {"sector": "Technology", "longBusinessSummary": "Apple designs phones."},
      "financialData": {"currentPrice": {"raw": 226.05, "fmt": "226.05"}}
    }],
    "error": null
  }
}"#;

const CHART_BODY: &str = r#"{
  "chart": {
    "result": [{
      "timestamp": [1704205800, 1704292200, 1704378600],
      "indicators": {"quote": [{
        "open": [187.15, 184.22, 182.15],
        "high": [188.44, 185.88, 183.09],
        "low": [183.89, 183.43, 180.88],
        "close": [185.64, 184.25, 181.91],
        "volume": [82488700, 58414500, 71983600]
      }]}
    }],
    "error": null
  }
}"#;

const NOT_FOUND_BODY: &str = r#"{
  "quoteSummary": {
    "result": null,
    "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZZ"}
  }
}"#;

/// Answers by URL substring, records every URL it sees.
#[derive(Default)]
struct ScriptedHttpClient {
    routes: Vec<(&'static str, HttpResponse)>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedHttpClient {
    fn yahoo() -> Self {
        Self::default()
            .route("fc.yahoo.com", HttpResponse::new(404, ""))
            .route("getcrumb", HttpResponse::ok_json(CRUMB))
    }

    fn route(mut self, needle: &'static str, response: HttpResponse) -> Self {
        self.routes.push((needle, response));
        self
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().expect("lock").clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            self.seen.lock().expect("lock").push(request.url.clone());
            self.routes
                .iter()
                .find(|(needle, _)| request.url.contains(needle))
                .map(|(_, response)| response.clone())
                .ok_or_else(|| HttpError::new(format!("no route for {}", request.url)))
        })
    }
}

fn adapter(client: ScriptedHttpClient) -> (Arc<ScriptedHttpClient>, YahooAdapter) {
    let client = Arc::new(client);
    let adapter = YahooAdapter::new(client.clone());
    (client, adapter)
}

#[tokio::test]
async fn quote_info_maps_every_dashboard_field() {
    // Given: Yahoo answers the quoteSummary call
    let (_, adapter) = adapter(
        ScriptedHttpClient::yahoo().route("quoteSummary", HttpResponse::ok_json(QUOTE_SUMMARY_BODY)),
    );
    let symbol = Symbol::parse("AAPL").expect("valid");

    // When: quote info is requested
    let info = adapter.quote_info(&symbol).await.expect("parsed");

    // Then: every field the page needs is populated
    assert_eq!(info.short_name.as_deref(), Some("Apple Inc."));
    assert_eq!(info.sector.as_deref(), Some("Technology"));
    assert_eq!(info.current_price, Some(226.05));
    assert_eq!(info.fifty_two_week_low, Some(164.08));
    assert_eq!(info.fifty_two_week_high, Some(237.23));
    assert_eq!(info.volume, Some(41_234_567));
    assert_eq!(info.average_volume, Some(55_000_000));
    assert_eq!(info.market_cap, Some(3_400_000_000_000));
    assert_eq!(
        info.long_business_summary.as_deref(),
        Some("Apple designs phones.")
    );
}

#[tokio::test]
async fn requests_use_normalized_symbol_and_cached_crumb() {
    // Given: a session typed with surrounding spaces and lower case
    let (client, adapter) = adapter(
        ScriptedHttpClient::yahoo()
            .route("quoteSummary", HttpResponse::ok_json(QUOTE_SUMMARY_BODY))
            .route("/chart/", HttpResponse::ok_json(CHART_BODY)),
    );
    let symbol = SessionState::new(" aapl ", Period::ThreeMonths).symbol();

    // When: both endpoints are called
    adapter.quote_info(&symbol).await.expect("info");
    adapter
        .price_history(HistoryRequest::new(symbol, Period::ThreeMonths))
        .await
        .expect("history");

    // Then: the data URLs carry the upper-cased symbol and the crumb,
    // and the handshake ran only once
    let seen = client.seen();
    let data_urls: Vec<_> = seen
        .iter()
        .filter(|url| url.contains("quoteSummary") || url.contains("/chart/"))
        .collect();
    assert_eq!(data_urls.len(), 2);
    for url in &data_urls {
        assert!(url.contains("/AAPL?"), "url should carry AAPL: {url}");
        assert!(url.contains("crumb=Abc.123%2Fxyz"), "url should carry crumb: {url}");
    }
    assert!(data_urls[1].contains("range=3mo"));
    assert!(data_urls[1].contains("interval=1d"));
    assert_eq!(seen.iter().filter(|url| url.contains("getcrumb")).count(), 1);
}

#[tokio::test]
async fn price_history_is_ascending_daily_closes() {
    // Given: a three-bar chart response
    let (_, adapter) = adapter(
        ScriptedHttpClient::yahoo().route("/chart/", HttpResponse::ok_json(CHART_BODY)),
    );
    let symbol = Symbol::parse("AAPL").expect("valid");

    // When: a one-month history is requested
    let history = adapter
        .price_history(HistoryRequest::new(symbol, Period::OneMonth))
        .await
        .expect("history");

    // Then: closes are kept in date order with their dates
    assert_eq!(history.period, Period::OneMonth);
    assert_eq!(history.closes().collect::<Vec<_>>(), vec![185.64, 184.25, 181.91]);
    assert_eq!(history.bars[0].date.format_date(), "2024-01-02");
    assert!(history.bars.windows(2).all(|w| w[0].date < w[1].date));
}

#[tokio::test]
async fn unknown_symbol_is_reported_as_not_found() {
    // Given: Yahoo answers 404 with an API error object
    let (_, adapter) = adapter(
        ScriptedHttpClient::yahoo().route("quoteSummary", HttpResponse::new(404, NOT_FOUND_BODY)),
    );
    let symbol = Symbol::parse("ZZZZ").expect("valid");

    // When: quote info is requested
    let error = adapter.quote_info(&symbol).await.expect_err("unknown");

    // Then: the error is a not-found carrying Yahoo's description
    assert_eq!(error.kind(), SourceErrorKind::NotFound);
    assert!(error.message().contains("ZZZZ"));
}

#[tokio::test]
async fn unauthorized_response_drops_crumb_without_retrying() {
    // Given: every data call is rejected with 401
    let (client, adapter) = adapter(
        ScriptedHttpClient::yahoo().route("quoteSummary", HttpResponse::new(401, "")),
    );
    let symbol = Symbol::parse("AAPL").expect("valid");

    // When: quote info is requested twice
    let first = adapter.quote_info(&symbol).await.expect_err("rejected");
    let _ = adapter.quote_info(&symbol).await;

    // Then: each pass fails once and fetches a fresh crumb
    assert_eq!(first.kind(), SourceErrorKind::Unavailable);
    let seen = client.seen();
    assert_eq!(seen.iter().filter(|u| u.contains("quoteSummary")).count(), 2);
    assert_eq!(seen.iter().filter(|u| u.contains("getcrumb")).count(), 2);
}

#[tokio::test]
async fn transport_failure_is_unavailable() {
    // Given: the crumb handshake succeeds but no data route exists
    let (_, adapter) = adapter(ScriptedHttpClient::yahoo());
    let symbol = Symbol::parse("AAPL").expect("valid");

    // When / Then
    let error = adapter.quote_info(&symbol).await.expect_err("no route");
    assert_eq!(error.kind(), SourceErrorKind::Unavailable);
}
