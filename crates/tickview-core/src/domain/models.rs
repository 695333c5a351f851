use serde::{Deserialize, Serialize};

use crate::{DashboardError, Period, Symbol, UtcDateTime, ValidationError};

/// Daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: UtcDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl Bar {
    pub fn new(
        date: UtcDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Chronologically ordered bars for one symbol over one lookback period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub symbol: Symbol,
    pub period: Period,
    pub bars: Vec<Bar>,
}

impl PriceHistory {
    /// Builds a history, sorting bars ascending by date.
    pub fn new(symbol: Symbol, period: Period, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        Self {
            symbol,
            period,
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|bar| bar.close)
    }
}

/// Symbol metadata as returned by the provider.
///
/// Every field is optional; the renderer decides which ones it requires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteInfo {
    pub symbol: Option<Symbol>,
    pub short_name: Option<String>,
    pub sector: Option<String>,
    pub current_price: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub volume: Option<u64>,
    pub average_volume: Option<u64>,
    pub market_cap: Option<u64>,
    pub long_business_summary: Option<String>,
}

/// Provider field names, used in `MissingField` errors.
pub mod fields {
    pub const SHORT_NAME: &str = "shortName";
    pub const SECTOR: &str = "sector";
    pub const CURRENT_PRICE: &str = "currentPrice";
    pub const FIFTY_TWO_WEEK_LOW: &str = "fiftyTwoWeekLow";
    pub const FIFTY_TWO_WEEK_HIGH: &str = "fiftyTwoWeekHigh";
    pub const VOLUME: &str = "volume";
    pub const AVERAGE_VOLUME: &str = "averageVolume";
    pub const MARKET_CAP: &str = "marketCap";
    pub const LONG_BUSINESS_SUMMARY: &str = "longBusinessSummary";
}

impl QuoteInfo {
    /// Resolve an optional field or fail with [`DashboardError::MissingField`].
    pub fn require<T: Clone>(
        &self,
        value: &Option<T>,
        field: &'static str,
    ) -> Result<T, DashboardError> {
        value.clone().ok_or_else(|| DashboardError::MissingField {
            symbol: self
                .symbol
                .as_ref()
                .map(|symbol| symbol.as_str().to_owned())
                .unwrap_or_default(),
            field,
        })
    }

    /// Fail on the first field the dashboard needs that is absent, in page order.
    pub fn ensure_complete(&self) -> Result<(), DashboardError> {
        self.require(&self.short_name, fields::SHORT_NAME)?;
        self.require(&self.sector, fields::SECTOR)?;
        self.require(&self.current_price, fields::CURRENT_PRICE)?;
        self.require(&self.fifty_two_week_low, fields::FIFTY_TWO_WEEK_LOW)?;
        self.require(&self.volume, fields::VOLUME)?;
        self.require(&self.market_cap, fields::MARKET_CAP)?;
        self.require(&self.fifty_two_week_high, fields::FIFTY_TWO_WEEK_HIGH)?;
        self.require(&self.average_volume, fields::AVERAGE_VOLUME)?;
        self.require(&self.long_business_summary, fields::LONG_BUSINESS_SUMMARY)?;
        Ok(())
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
