use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Lookback window offered by the period selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "1mo")]
    OneMonth,
}

impl Period {
    /// Selector order, longest window first.
    pub const ALL: [Self; 4] = [
        Self::OneYear,
        Self::SixMonths,
        Self::ThreeMonths,
        Self::OneMonth,
    ];

    /// Provider lookback code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::OneYear => "1y",
            Self::SixMonths => "6mo",
            Self::ThreeMonths => "3mo",
            Self::OneMonth => "1mo",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OneYear => "1 Year",
            Self::SixMonths => "6 Month",
            Self::ThreeMonths => "3 Month",
            Self::OneMonth => "1 Month",
        }
    }

    /// Approximate number of trading days in the window.
    pub const fn trading_days(self) -> usize {
        match self {
            Self::OneYear => 252,
            Self::SixMonths => 126,
            Self::ThreeMonths => 63,
            Self::OneMonth => 21,
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1y" => Ok(Self::OneYear),
            "6mo" => Ok(Self::SixMonths),
            "3mo" => Ok(Self::ThreeMonths),
            "1mo" => Ok(Self::OneMonth),
            other => Err(ValidationError::InvalidPeriod {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_period_codes() {
        assert_eq!(Period::from_str("6MO").expect("must parse"), Period::SixMonths);
        assert_eq!(Period::from_str(" 1mo ").expect("must parse"), Period::OneMonth);
    }

    #[test]
    fn rejects_unknown_period() {
        let err = Period::from_str("5y").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidPeriod { .. }));
    }

    #[test]
    fn default_is_the_longest_window() {
        assert_eq!(Period::default(), Period::ALL[0]);
        assert_eq!(Period::default().label(), "1 Year");
    }

    #[test]
    fn serde_uses_provider_codes() {
        let json = serde_json::to_string(&Period::ThreeMonths).expect("serialize");
        assert_eq!(json, "\"3mo\"");
    }
}
