use serde::Serialize;
use tickview_core::Period;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodRow {
    pub code: &'static str,
    pub label: &'static str,
    pub trading_days: usize,
}

pub fn run() -> Vec<PeriodRow> {
    Period::ALL
        .iter()
        .map(|period| PeriodRow {
            code: period.code(),
            label: period.label(),
            trading_days: period.trading_days(),
        })
        .collect()
}
