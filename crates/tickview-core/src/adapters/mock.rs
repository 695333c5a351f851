use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use time::{Duration, OffsetDateTime, Time};
use tracing::info;

use crate::data_source::{HistoryRequest, MarketDataSource, SourceError};
use crate::{Bar, Period, PriceHistory, ProviderId, QuoteInfo, Symbol, UtcDateTime};

/// One call observed by [`MockAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    QuoteInfo(Symbol),
    PriceHistory(Symbol, Period),
}

/// Deterministic offline provider.
///
/// Knows a small catalog of symbols; anything else is reported as not found,
/// the same way Yahoo answers for an unknown ticker. Histories are derived from
/// the symbol so every period is a tail of the one-year series.
///
/// Calls are only recorded after [`MockAdapter::with_call_log`].
#[derive(Debug, Default)]
pub struct MockAdapter {
    info_overrides: HashMap<Symbol, QuoteInfo>,
    closes_overrides: HashMap<Symbol, Vec<f64>>,
    failure: Option<SourceError>,
    calls: Option<Mutex<Vec<MockCall>>>,
}

impl MockAdapter {
    /// Serve `info` for `info.symbol` instead of the catalog entry.
    pub fn with_quote_info(mut self, info: QuoteInfo) -> Self {
        if let Some(symbol) = info.symbol.clone() {
            self.info_overrides.insert(symbol, info);
        }
        self
    }

    /// Serve exactly these closes, one per day, for every period.
    pub fn with_closes(mut self, symbol: Symbol, closes: Vec<f64>) -> Self {
        self.closes_overrides.insert(symbol, closes);
        self
    }

    /// Fail every call with `error`.
    pub fn with_failure(mut self, error: SourceError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Record every provider call for later inspection with [`MockAdapter::calls`].
    pub fn with_call_log(mut self) -> Self {
        self.calls = Some(Mutex::new(Vec::new()));
        self
    }

    /// Calls seen so far; always empty without [`MockAdapter::with_call_log`].
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls
            .as_ref()
            .and_then(|calls| calls.lock().ok().map(|calls| calls.clone()))
            .unwrap_or_default()
    }

    fn record(&self, call: MockCall) {
        if let Some(Ok(mut calls)) = self.calls.as_ref().map(Mutex::lock) {
            calls.push(call);
        }
    }

    fn lookup_info(&self, symbol: &Symbol) -> Result<QuoteInfo, SourceError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        if let Some(info) = self.info_overrides.get(symbol) {
            return Ok(info.clone());
        }
        catalog_info(symbol)
            .ok_or_else(|| SourceError::not_found(format!("quote not found for symbol: {symbol}")))
    }

    fn lookup_history(&self, req: &HistoryRequest) -> Result<PriceHistory, SourceError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let closes = match self.closes_overrides.get(&req.symbol) {
            Some(closes) => closes.clone(),
            None => {
                if catalog_info(&req.symbol).is_none() {
                    return Err(SourceError::not_found(format!(
                        "no data found, symbol may be delisted: {}",
                        req.symbol
                    )));
                }
                let full = synthetic_closes(&req.symbol, Period::OneYear.trading_days());
                let skip = full.len().saturating_sub(req.period.trading_days());
                full[skip..].to_vec()
            }
        };

        let bars = daily_bars(&closes)?;
        Ok(PriceHistory::new(req.symbol.clone(), req.period, bars))
    }
}

impl MarketDataSource for MockAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Mock
    }

    fn quote_info<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteInfo, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            self.record(MockCall::QuoteInfo(symbol.clone()));
            let info = self.lookup_info(symbol)?;
            info!(%symbol, "served mock quote info");
            Ok(info)
        })
    }

    fn price_history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            self.record(MockCall::PriceHistory(req.symbol.clone(), req.period));
            let history = self.lookup_history(&req)?;
            info!(
                symbol = %req.symbol,
                period = %req.period,
                bars = history.len(),
                "served mock price history"
            );
            Ok(history)
        })
    }
}

fn daily_bars(closes: &[f64]) -> Result<Vec<Bar>, SourceError> {
    let today = OffsetDateTime::now_utc().replace_time(Time::MIDNIGHT);
    let count = closes.len();

    closes
        .iter()
        .enumerate()
        .map(|(index, &close)| {
            let offset = Duration::days((count - index) as i64);
            let date = UtcDateTime::from_offset_datetime(today - offset)
                .map_err(|e| SourceError::internal(e.to_string()))?;
            Bar::new(
                date,
                close,
                close * 1.01,
                close * 0.99,
                close,
                Some(1_000_000 + index as u64 * 1_000),
            )
            .map_err(|e| SourceError::internal(e.to_string()))
        })
        .collect()
}

fn synthetic_closes(symbol: &Symbol, count: usize) -> Vec<f64> {
    let seed = symbol_seed(symbol);
    let base = 50.0 + (seed % 400) as f64;
    (0..count)
        .map(|index| {
            let wobble = ((seed + index as u64 * 7) % 41) as f64 - 20.0;
            let drift = index as f64 * 0.15;
            base + drift + wobble / 2.0
        })
        .collect()
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}

fn catalog_info(symbol: &Symbol) -> Option<QuoteInfo> {
    let (name, sector, summary) = match symbol.as_str() {
        "MSTR" => (
            "MicroStrategy Incorporated",
            Some("Technology"),
            "MicroStrategy Incorporated provides artificial intelligence-powered enterprise \
analytics software and services and holds bitcoin as its primary treasury reserve asset.",
        ),
        "AAPL" => (
            "Apple Inc.",
            Some("Technology"),
            "Apple Inc. designs, manufactures, and markets smartphones, personal computers, \
tablets, wearables, and accessories worldwide.",
        ),
        "MSFT" => (
            "Microsoft Corporation",
            Some("Technology"),
            "Microsoft Corporation develops and supports software, services, devices, and \
solutions worldwide.",
        ),
        "SPY" => (
            "SPDR S&P 500 ETF Trust",
            None,
            "The trust seeks to provide investment results that correspond to the price and \
yield performance of the S&P 500 Index.",
        ),
        _ => return None,
    };

    let closes = synthetic_closes(symbol, Period::OneYear.trading_days());
    let low = closes.iter().copied().fold(f64::INFINITY, f64::min);
    let high = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let last = closes.last().copied();
    let seed = symbol_seed(symbol);

    Some(QuoteInfo {
        symbol: Some(symbol.clone()),
        short_name: Some(name.to_owned()),
        sector: sector.map(str::to_owned),
        current_price: last,
        fifty_two_week_low: Some(low),
        fifty_two_week_high: Some(high),
        volume: Some(5_000_000 + seed % 1_000_000),
        average_volume: Some(6_000_000 + seed % 750_000),
        market_cap: Some(80_000_000_000 + (seed % 900) * 1_000_000_000),
        long_business_summary: Some(summary.to_owned()),
    })
}
