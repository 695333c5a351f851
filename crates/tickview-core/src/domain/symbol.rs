use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Placeholder ticker used when the user leaves the input blank.
pub const DEFAULT_TICKER: &str = "MSTR";

/// Normalized market symbol/ticker.
///
/// Only trimming and upper-casing are applied. Whether the symbol exists is
/// left to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        Ok(Self(trimmed.to_uppercase()))
    }

    /// Parse user input, falling back to [`DEFAULT_TICKER`] when it is blank.
    pub fn parse_or_default(input: &str) -> Self {
        Self::parse(input).unwrap_or_else(|_| Self(DEFAULT_TICKER.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_symbol() {
        let parsed = Symbol::parse(" aapl ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "AAPL");
    }

    #[test]
    fn keeps_punctuation_untouched() {
        let parsed = Symbol::parse("brk-b").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "BRK-B");
    }

    #[test]
    fn rejects_blank_input() {
        let err = Symbol::parse("   ").expect_err("must fail");
        assert_eq!(err, ValidationError::EmptySymbol);
    }

    #[test]
    fn blank_input_falls_back_to_placeholder() {
        assert_eq!(Symbol::parse_or_default("").as_str(), DEFAULT_TICKER);
        assert_eq!(Symbol::parse_or_default(" tsla\t").as_str(), "TSLA");
    }
}
