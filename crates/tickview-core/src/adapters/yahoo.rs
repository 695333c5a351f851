use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::data_source::{HistoryRequest, MarketDataSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse, DEFAULT_TIMEOUT_MS};
use crate::{Bar, PriceHistory, ProviderId, QuoteInfo, Symbol, UtcDateTime, ValidationError};

const REFERER: &str = "https://finance.yahoo.com/";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URLS: [&str; 2] = [
    "https://query1.finance.yahoo.com/v1/test/getcrumb",
    "https://query2.finance.yahoo.com/v1/test/getcrumb",
];
const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const CHART_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";
const QUOTE_SUMMARY_MODULES: &str = "price,summaryDetail,summaryProfile,financialData";

// ============================================================================
// Yahoo Auth Manager - Handles cookie/crumb authentication
// ============================================================================

/// Holds the crumb token Yahoo's unofficial API expects on every data call.
///
/// The session cookie lives in the transport's cookie jar; only the crumb is
/// kept here. A 401 clears it so the next render pass fetches a fresh one.
#[derive(Debug, Default)]
pub struct YahooAuthManager {
    crumb: Mutex<Option<String>>,
}

impl YahooAuthManager {
    fn cached(&self) -> Option<String> {
        self.crumb.lock().ok().and_then(|guard| guard.clone())
    }

    fn store(&self, crumb: String) {
        if let Ok(mut guard) = self.crumb.lock() {
            *guard = Some(crumb);
        }
    }

    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.crumb.lock() {
            *guard = None;
        }
    }

    /// Return the cached crumb, or run the cookie/crumb handshake.
    pub async fn crumb(
        &self,
        http_client: &Arc<dyn HttpClient>,
        timeout_ms: u64,
    ) -> Result<String, SourceError> {
        if let Some(crumb) = self.cached() {
            return Ok(crumb);
        }

        // fc.yahoo.com answers 404 but still sets the session cookie.
        let cookie_request = HttpRequest::get(COOKIE_URL)
            .with_header("referer", REFERER)
            .with_timeout_ms(timeout_ms);
        http_client.execute(cookie_request).await.map_err(|e| {
            SourceError::unavailable(format!("failed to fetch Yahoo cookie: {}", e.message()))
        })?;

        for endpoint in CRUMB_URLS {
            let crumb_request = HttpRequest::get(endpoint)
                .with_header("referer", REFERER)
                .with_timeout_ms(timeout_ms);

            match http_client.execute(crumb_request).await {
                Ok(response) if response.is_success() => {
                    let body = response.body.trim();
                    if body.to_ascii_lowercase().contains("too many requests") {
                        return Err(SourceError::unavailable(
                            "Yahoo rate limited while fetching crumb",
                        ));
                    }
                    if is_plausible_crumb(body) {
                        debug!(endpoint, "obtained yahoo crumb");
                        self.store(body.to_owned());
                        return Ok(body.to_owned());
                    }
                }
                Ok(response) => {
                    debug!(endpoint, status = response.status, "crumb endpoint refused");
                }
                Err(error) => {
                    debug!(endpoint, error = error.message(), "crumb endpoint unreachable");
                }
            }
        }

        Err(SourceError::unavailable(
            "failed to fetch Yahoo crumb from all endpoints",
        ))
    }
}

fn is_plausible_crumb(body: &str) -> bool {
    !body.is_empty()
        && body.len() < 100
        && !body.contains(' ')
        && !body.contains("<html")
        && !body.contains("<!DOCTYPE")
}

// ============================================================================
// Yahoo Adapter
// ============================================================================

/// Yahoo Finance adapter over the `quoteSummary` and `chart` endpoints.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    auth_manager: Arc<YahooAuthManager>,
    timeout_ms: u64,
}

impl YahooAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            auth_manager: Arc::new(YahooAuthManager::default()),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// One authenticated GET. Non-success statuses become errors; nothing is retried.
    async fn get(&self, endpoint: &str, symbol: &Symbol) -> Result<HttpResponse, SourceError> {
        let crumb = self
            .auth_manager
            .crumb(&self.http_client, self.timeout_ms)
            .await?;
        debug!(endpoint, %symbol, "yahoo request");

        let url = format!("{endpoint}&crumb={}", urlencoding::encode(&crumb));
        let request = HttpRequest::get(url)
            .with_header("referer", REFERER)
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            SourceError::unavailable(format!("yahoo transport error: {}", e.message()))
        })?;

        let status = response.status;
        match status {
            200..=299 => Ok(response),
            401 => {
                self.auth_manager.invalidate();
                Err(SourceError::unavailable(
                    "yahoo rejected the session crumb (status 401)",
                ))
            }
            404 => {
                let detail = api_error_description(&response.body)
                    .unwrap_or_else(|| format!("no data found for symbol '{symbol}'"));
                warn!(%symbol, detail = %detail, "yahoo reported unknown symbol");
                Err(SourceError::not_found(detail))
            }
            status => Err(SourceError::unavailable(format!(
                "yahoo returned status {status}"
            ))),
        }
    }

    async fn fetch_quote_info(&self, symbol: &Symbol) -> Result<QuoteInfo, SourceError> {
        let endpoint = format!(
            "{QUOTE_SUMMARY_URL}/{}?modules={QUOTE_SUMMARY_MODULES}",
            urlencoding::encode(symbol.as_str())
        );
        let response = self.get(&endpoint, symbol).await?;
        let info = parse_quote_summary(symbol, &response.body)?;
        info!(%symbol, name = info.short_name.as_deref().unwrap_or("-"), "fetched quote info");
        Ok(info)
    }

    async fn fetch_price_history(&self, req: &HistoryRequest) -> Result<PriceHistory, SourceError> {
        let endpoint = format!(
            "{CHART_URL}/{}?range={}&interval=1d&includePrePost=false",
            urlencoding::encode(req.symbol.as_str()),
            req.period.code()
        );
        let response = self.get(&endpoint, &req.symbol).await?;
        let history = parse_chart(req, &response.body)?;
        info!(
            symbol = %req.symbol,
            period = %req.period,
            bars = history.len(),
            "fetched price history"
        );
        Ok(history)
    }
}

impl MarketDataSource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn quote_info<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteInfo, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch_quote_info(symbol))
    }

    fn price_history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.fetch_price_history(&req).await })
    }
}

// ============================================================================
// Response parsing
// ============================================================================

fn parse_quote_summary(symbol: &Symbol, body: &str) -> Result<QuoteInfo, SourceError> {
    let response: YahooQuoteSummaryResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo quote summary: {e}")))?;

    if let Some(error) = response.quote_summary.error {
        return Err(error.into_source_error());
    }

    let result = response
        .quote_summary
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::not_found(format!("quote not found for symbol: {symbol}")))?;

    let price = result.price.unwrap_or_default();
    let detail = result.summary_detail.unwrap_or_default();
    let profile = result.summary_profile.unwrap_or_default();
    let financial = result.financial_data.unwrap_or_default();

    Ok(QuoteInfo {
        symbol: Some(symbol.clone()),
        short_name: price.short_name,
        sector: profile.sector,
        current_price: raw_f64(&financial.current_price),
        fifty_two_week_low: raw_f64(&detail.fifty_two_week_low),
        fifty_two_week_high: raw_f64(&detail.fifty_two_week_high),
        volume: raw_u64(&detail.volume),
        average_volume: raw_u64(&detail.average_volume),
        market_cap: raw_u64(&detail.market_cap).or_else(|| raw_u64(&price.market_cap)),
        long_business_summary: profile.long_business_summary,
    })
}

fn parse_chart(req: &HistoryRequest, body: &str) -> Result<PriceHistory, SourceError> {
    let response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = response.chart.error {
        return Err(error.into_source_error());
    }

    let Some(result) = response.chart.result.unwrap_or_default().into_iter().next() else {
        return Ok(PriceHistory::new(req.symbol.clone(), req.period, Vec::new()));
    };

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts_value) in timestamps.iter().enumerate() {
        let Some(close) = value_at(&quote.close, i) else {
            continue;
        };
        let date = UtcDateTime::from_unix_timestamp(ts_value).map_err(validation_to_error)?;
        let volume = quote
            .volume
            .get(i)
            .copied()
            .flatten()
            .and_then(|v| u64::try_from(v).ok());

        let bar = Bar::new(
            date,
            value_at(&quote.open, i).unwrap_or(close),
            value_at(&quote.high, i).unwrap_or(close),
            value_at(&quote.low, i).unwrap_or(close),
            close,
            volume,
        )
        .map_err(validation_to_error)?;
        bars.push(bar);
    }

    Ok(PriceHistory::new(req.symbol.clone(), req.period, bars))
}

fn api_error_description(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["quoteSummary", "chart"].iter().find_map(|root| {
        value
            .get(root)?
            .get("error")?
            .get("description")?
            .as_str()
            .map(str::to_owned)
    })
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten().filter(|v| v.is_finite())
}

fn raw_f64(value: &Option<YahooRawValue>) -> Option<f64> {
    value.as_ref().and_then(|v| v.raw).filter(|v| v.is_finite())
}

fn raw_u64(value: &Option<YahooRawValue>) -> Option<u64> {
    raw_f64(value)
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u64)
}

fn validation_to_error(error: ValidationError) -> SourceError {
    SourceError::internal(error.to_string())
}

// ============================================================================
// Yahoo Finance API response structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct YahooApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl YahooApiError {
    fn into_source_error(self) -> SourceError {
        let description = self
            .description
            .unwrap_or_else(|| String::from("unknown yahoo error"));
        match self.code.as_deref() {
            Some("Not Found") => SourceError::not_found(description),
            _ => SourceError::unavailable(format!("yahoo API error: {description}")),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooQuoteSummaryResponse {
    quote_summary: YahooQuoteSummaryData,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteSummaryData {
    #[serde(default)]
    result: Option<Vec<YahooQuoteSummaryResult>>,
    #[serde(default)]
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooQuoteSummaryResult {
    #[serde(default)]
    price: Option<YahooPriceData>,
    #[serde(default)]
    summary_detail: Option<YahooSummaryDetail>,
    #[serde(default)]
    summary_profile: Option<YahooSummaryProfile>,
    #[serde(default)]
    financial_data: Option<YahooFinancialData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooPriceData {
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    market_cap: Option<YahooRawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooSummaryDetail {
    #[serde(default)]
    fifty_two_week_low: Option<YahooRawValue>,
    #[serde(default)]
    fifty_two_week_high: Option<YahooRawValue>,
    #[serde(default)]
    volume: Option<YahooRawValue>,
    #[serde(default)]
    average_volume: Option<YahooRawValue>,
    #[serde(default)]
    market_cap: Option<YahooRawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooSummaryProfile {
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    long_business_summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooFinancialData {
    #[serde(default)]
    current_price: Option<YahooRawValue>,
}

/// Yahoo wraps numbers as `{"raw": 1.0, "fmt": "1.00"}`, or `{}` when absent.
#[derive(Debug, Clone, Deserialize)]
struct YahooRawValue {
    #[serde(default)]
    raw: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: YahooChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}
