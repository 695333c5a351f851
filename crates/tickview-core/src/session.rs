use serde::{Deserialize, Serialize};

use crate::{Period, Symbol, DEFAULT_TICKER};

/// Inputs a host keeps between render passes.
///
/// This is the only state that outlives a pass; everything else is rebuilt
/// from it on every rerun.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub period: Period,
}

impl SessionState {
    pub fn new(ticker: impl Into<String>, period: Period) -> Self {
        Self {
            ticker: ticker.into(),
            period,
        }
    }

    /// The symbol sent to the provider: trimmed, upper-cased, defaulted.
    pub fn symbol(&self) -> Symbol {
        Symbol::parse_or_default(&self.ticker)
    }

    /// Same inputs with the ticker normalized, for echoing back into the form.
    pub fn normalized(&self) -> Self {
        Self {
            ticker: self.symbol().into(),
            period: self.period,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_TICKER, Period::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_ticker_before_use() {
        let state = SessionState::new(" aapl ", Period::ThreeMonths);
        assert_eq!(state.symbol().as_str(), "AAPL");
        assert_eq!(state.normalized().ticker, "AAPL");
    }

    #[test]
    fn blank_ticker_uses_placeholder() {
        let state = SessionState::new("", Period::OneYear);
        assert_eq!(state.symbol().as_str(), DEFAULT_TICKER);
    }

    #[test]
    fn deserializes_with_defaults() {
        let state: SessionState = serde_json::from_str("{}").expect("defaults");
        assert_eq!(state.period, Period::OneYear);
        assert_eq!(state.symbol().as_str(), DEFAULT_TICKER);

        let state: SessionState =
            serde_json::from_str(r#"{"ticker": "msft", "period": "6mo"}"#).expect("explicit");
        assert_eq!(state, SessionState::new("msft", Period::SixMonths));
    }
}
