//! Summary statistics over a price history.

use serde::{Deserialize, Serialize};

use crate::{DashboardError, PriceHistory};

/// Lower chart bound as a fraction of the minimum close.
pub const DOMAIN_LOWER_FACTOR: f64 = 0.95;
/// Upper chart bound as a fraction of the maximum close.
pub const DOMAIN_UPPER_FACTOR: f64 = 1.05;

/// Figures shown beneath the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStatistics {
    pub start_price: f64,
    pub last_price: f64,
    pub min_close: f64,
    pub max_close: f64,
    pub percent_change: f64,
}

impl DerivedStatistics {
    pub fn chart_domain(&self) -> ChartDomain {
        ChartDomain {
            lower: self.min_close * DOMAIN_LOWER_FACTOR,
            upper: self.max_close * DOMAIN_UPPER_FACTOR,
        }
    }
}

/// Value-axis domain of the price chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDomain {
    pub lower: f64,
    pub upper: f64,
}

impl ChartDomain {
    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    /// Position of `value` within the domain, `0.0` at the lower bound.
    /// A zero-width domain maps everything to the middle.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.span();
        if span <= f64::EPSILON {
            return 0.5;
        }
        (value - self.lower) / span
    }
}

/// Compute start/last/min/max closes and the percent change between the
/// first and last bar.
///
/// Fails on an empty history instead of reporting zeros. A start close of
/// `0.0` is not rejected: the change is then infinite, or NaN when the last
/// close is also zero, and formats as `inf%` or `NaN%`.
pub fn compute_statistics(history: &PriceHistory) -> Result<DerivedStatistics, DashboardError> {
    let empty = || DashboardError::EmptyHistory {
        symbol: history.symbol.as_str().to_owned(),
        period: history.period.label().to_owned(),
    };

    let first = history.bars.first().ok_or_else(empty)?;
    let last = history.bars.last().ok_or_else(empty)?;

    let (min_close, max_close) = history
        .closes()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), close| {
            (lo.min(close), hi.max(close))
        });

    Ok(DerivedStatistics {
        start_price: first.close,
        last_price: last.close,
        min_close,
        max_close,
        percent_change: (last.close - first.close) / first.close * 100.0,
    })
}
