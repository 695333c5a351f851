//! # Tickview Core
//!
//! Domain types, provider adapters and the page renderer behind the tickview
//! stock dashboard.
//!
//! ## Overview
//!
//! One dashboard pass takes a ticker and a period, fetches descriptive quote
//! info and daily closes from a provider, derives summary statistics and
//! renders a [`Page`]: a serializable widget tree that the CLI prints and the
//! web host turns into HTML.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo, offline mock) |
//! | [`dashboard`] | Render pass orchestration |
//! | [`data_source`] | Provider trait and structured source errors |
//! | [`domain`] | Domain models (Symbol, Period, Bar, PriceHistory, QuoteInfo) |
//! | [`error`] | Core error types |
//! | [`format`] | Currency, grouping and percent formatting |
//! | [`http_client`] | HTTP client abstraction |
//! | [`render`] | Pure page renderer and widget tree |
//! | [`session`] | Per-session user inputs |
//! | [`source`] | Provider identifiers |
//! | [`stats`] | Derived statistics and chart domain |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickview_core::{DashboardSession, Period, ReqwestHttpClient, SessionState, YahooAdapter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = YahooAdapter::new(Arc::new(ReqwestHttpClient::new()?));
//!     let session = DashboardSession::new(Arc::new(adapter));
//!
//!     let page = session.run(&SessionState::new("aapl", Period::SixMonths)).await?;
//!     println!("{}", page.metric("Percentage Change").unwrap_or("-"));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Web host │  owns SessionState
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ DashboardSession│────▶│ compute_statistics│
//! └────────┬────────┘     └──────────────────┘
//!          │                        │
//!          ▼                        ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ MarketDataSource│     │ render → Page    │
//! │ (Adapter Trait) │     └──────────────────┘
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │ HTTP Client     │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Every pass is fail-fast. Provider failures surface as [`SourceError`],
//! absent quote fields and empty histories as [`DashboardError`]:
//!
//! ```rust
//! use tickview_core::{DashboardError, SourceErrorKind};
//!
//! fn describe(error: &DashboardError) -> &'static str {
//!     match error {
//!         DashboardError::Source(source) if source.kind() == SourceErrorKind::NotFound => {
//!             "unknown ticker"
//!         }
//!         DashboardError::Source(_) => "provider unavailable",
//!         DashboardError::MissingField { .. } => "incomplete quote data",
//!         _ => "cannot render",
//!     }
//! }
//! ```

pub mod adapters;
pub mod dashboard;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod format;
pub mod http_client;
pub mod render;
pub mod session;
pub mod source;
pub mod stats;

// Adapter implementations
pub use adapters::{MockAdapter, MockCall, YahooAdapter, YahooAuthManager};

// Render pass
pub use dashboard::DashboardSession;

// Data source trait and types
pub use data_source::{HistoryRequest, MarketDataSource, SourceError, SourceErrorKind};

// Domain models
pub use domain::{
    fields, Bar, Period, PriceHistory, QuoteInfo, Symbol, UtcDateTime, DEFAULT_TICKER,
};

// Error types
pub use error::{DashboardError, ValidationError};

// Formatting
pub use format::{
    format_currency, format_currency_grouped, format_grouped, format_percent, NumberLocale,
};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Rendering
pub use render::{render, ChartPoint, Page, RenderContext, SelectOption, Widget};

// Session state
pub use session::SessionState;

// Source identifiers
pub use source::ProviderId;

// Statistics
pub use stats::{compute_statistics, ChartDomain, DerivedStatistics};
