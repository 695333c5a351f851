use thiserror::Error;

use crate::data_source::SourceError;

/// Validation errors for locally supplied input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,

    #[error("invalid period '{value}', expected one of 1y, 6mo, 3mo, 1mo")]
    InvalidPeriod { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
}

/// Errors that abort a dashboard render pass.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("quote info for '{symbol}' is missing field '{field}'")]
    MissingField { symbol: String, field: &'static str },

    #[error("price history for '{symbol}' over {period} is empty")]
    EmptyHistory { symbol: String, period: String },
}

impl DashboardError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "dashboard.validation",
            Self::Source(error) => error.code(),
            Self::MissingField { .. } => "dashboard.missing_field",
            Self::EmptyHistory { .. } => "dashboard.empty_history",
        }
    }
}
