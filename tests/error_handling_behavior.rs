//! Behavior-driven tests for failure paths.
//!
//! Every failure aborts the pass with a structured error. Nothing is retried
//! and no partial page is produced.

use std::sync::Arc;

use tickview_core::{
    DashboardError, DashboardSession, MockAdapter, MockCall, Period, QuoteInfo, SessionState,
    SourceError, SourceErrorKind, Symbol, ValidationError,
};

fn session_with(mock: MockAdapter) -> (Arc<MockAdapter>, DashboardSession) {
    let mock = Arc::new(mock.with_call_log());
    (mock.clone(), DashboardSession::new(mock))
}

#[tokio::test]
async fn when_ticker_is_unknown_pass_fails_with_not_found() {
    // Given: a provider that does not know ZZZZ
    let (mock, session) = session_with(MockAdapter::default());

    // When
    let error = session
        .run(&SessionState::new("zzzz", Period::OneYear))
        .await
        .expect_err("unknown ticker");

    // Then: the provider's not-found surfaces and history is never requested
    match &error {
        DashboardError::Source(source) => assert_eq!(source.kind(), SourceErrorKind::NotFound),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(error.code(), "source.not_found");
    assert_eq!(
        mock.calls(),
        vec![MockCall::QuoteInfo(Symbol::parse("ZZZZ").expect("valid"))]
    );
}

#[tokio::test]
async fn when_provider_is_down_error_propagates_once() {
    // Given: every call fails
    let (mock, session) = session_with(
        MockAdapter::default().with_failure(SourceError::unavailable("connection reset")),
    );

    // When
    let error = session
        .run(&SessionState::default())
        .await
        .expect_err("provider down");

    // Then: one attempt, no retry
    assert_eq!(error.code(), "source.unavailable");
    assert_eq!(mock.calls().len(), 1);
}

#[tokio::test]
async fn when_sector_is_absent_render_aborts_with_missing_field() {
    // Given: SPY has no sector in the catalog
    let (mock, session) = session_with(MockAdapter::default());

    // When
    let error = session
        .run(&SessionState::new("spy", Period::SixMonths))
        .await
        .expect_err("sector missing");

    // Then
    assert_eq!(
        error,
        DashboardError::MissingField {
            symbol: String::from("SPY"),
            field: "sector",
        }
    );
    assert_eq!(error.code(), "dashboard.missing_field");
    // And: history is never requested for an incomplete quote
    assert_eq!(
        mock.calls(),
        vec![MockCall::QuoteInfo(Symbol::parse("SPY").expect("valid"))]
    );
}

#[tokio::test]
async fn missing_field_is_reported_before_an_empty_history() {
    // Given: quote info with no fields at all and no bars in range
    let symbol = Symbol::parse("ACME").expect("valid");
    let info = QuoteInfo {
        symbol: Some(symbol.clone()),
        ..QuoteInfo::default()
    };
    let (mock, session) = session_with(
        MockAdapter::default()
            .with_quote_info(info)
            .with_closes(symbol.clone(), Vec::new()),
    );

    // When
    let error = session
        .run(&SessionState::new("acme", Period::OneMonth))
        .await
        .expect_err("incomplete quote");

    // Then: the first absent field wins and history is not fetched
    assert_eq!(
        error,
        DashboardError::MissingField {
            symbol: String::from("ACME"),
            field: "shortName",
        }
    );
    assert_eq!(mock.calls(), vec![MockCall::QuoteInfo(symbol)]);
}

#[tokio::test]
async fn when_summary_is_absent_render_aborts() {
    let symbol = Symbol::parse("ACME").expect("valid");
    let info = QuoteInfo {
        symbol: Some(symbol.clone()),
        short_name: Some(String::from("Acme")),
        sector: Some(String::from("Industrials")),
        current_price: Some(10.0),
        fifty_two_week_low: Some(8.0),
        fifty_two_week_high: Some(12.0),
        volume: Some(1_000),
        average_volume: Some(2_000),
        market_cap: Some(1_000_000),
        long_business_summary: None,
    };
    let (_, session) = session_with(
        MockAdapter::default()
            .with_quote_info(info)
            .with_closes(symbol, vec![10.0, 11.0]),
    );

    let error = session
        .run(&SessionState::new("ACME", Period::OneMonth))
        .await
        .expect_err("summary missing");

    assert!(matches!(
        error,
        DashboardError::MissingField { field: "longBusinessSummary", .. }
    ));
}

#[tokio::test]
async fn when_history_is_empty_statistics_are_not_faked() {
    // Given: a known ticker with no bars in range
    let symbol = Symbol::parse("AAPL").expect("valid");
    let (_, session) = session_with(MockAdapter::default().with_closes(symbol, Vec::new()));

    // When
    let error = session
        .run(&SessionState::new("AAPL", Period::OneMonth))
        .await
        .expect_err("empty history");

    // Then
    assert_eq!(
        error,
        DashboardError::EmptyHistory {
            symbol: String::from("AAPL"),
            period: String::from("1 Month"),
        }
    );
}

#[test]
fn unknown_period_code_is_a_validation_error() {
    let error = "2y".parse::<Period>().expect_err("not offered");

    assert_eq!(
        error,
        ValidationError::InvalidPeriod {
            value: String::from("2y"),
        }
    );
    assert_eq!(DashboardError::from(error).code(), "dashboard.validation");
}
