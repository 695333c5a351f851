//! # Domain Models
//!
//! Canonical domain types for one dashboard render pass.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Trimmed, upper-cased ticker |
//! | [`Period`] | Lookback window offered by the selector |
//! | [`Bar`] | Daily OHLCV bar |
//! | [`PriceHistory`] | Ascending bars for a symbol/period |
//! | [`QuoteInfo`] | Symbol metadata with optional fields |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Everything here is request-scoped: built at the start of a pass and dropped
//! at its end.

mod models;
mod period;
mod symbol;
mod timestamp;

pub use models::{fields, Bar, PriceHistory, QuoteInfo};
pub use period::Period;
pub use symbol::{Symbol, DEFAULT_TICKER};
pub use timestamp::UtcDateTime;
