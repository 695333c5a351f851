//! Provider contract and request/response types.
//!
//! | Operation | Request | Response |
//! |-----------|---------|----------|
//! | Quote info | [`Symbol`] | [`QuoteInfo`] |
//! | Price history | [`HistoryRequest`] | [`PriceHistory`] |
//!
//! Adapters never retry and never substitute fallback data: every failure is
//! returned to the caller as a [`SourceError`].

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{Period, PriceHistory, ProviderId, QuoteInfo, Symbol};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// The provider does not know the symbol.
    NotFound,
    /// Transport failure or non-success status.
    Unavailable,
    /// Payload could not be understood.
    Internal,
}

/// Structured provider error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for the price history endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub period: Period,
}

impl HistoryRequest {
    pub fn new(symbol: Symbol, period: Period) -> Self {
        Self { symbol, period }
    }
}

/// Market data provider contract.
///
/// Implementations must be `Send + Sync`; the web host shares one adapter
/// across requests.
pub trait MarketDataSource: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Fetches symbol metadata.
    ///
    /// # Errors
    ///
    /// - [`SourceErrorKind::NotFound`] when the provider does not know the symbol
    /// - [`SourceErrorKind::Unavailable`] on transport failure
    fn quote_info<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteInfo, SourceError>> + Send + 'a>>;

    /// Fetches daily bars for the requested lookback period.
    ///
    /// An empty series is not an error at this layer.
    fn price_history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, SourceError>> + Send + 'a>>;
}
