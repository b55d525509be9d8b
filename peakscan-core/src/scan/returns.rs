//! Windowed-return scan — flags tickers at or below a minimum total return.

use serde::{Deserialize, Serialize};

use super::{round2, DataUnavailable};
use crate::domain::PriceSeries;

/// Parameters for the return scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnScanParams {
    /// Keep tickers whose total return is *at or below* this percentage.
    ///
    /// The comparison is deliberately inverted from what "minimum return"
    /// suggests: the scan selects underperformers. Callers wanting
    /// outperformers must negate their filter, not this field.
    pub min_return: f64,

    /// Lookback window length in years (365-day calendar years).
    pub years: u32,
}

impl Default for ReturnScanParams {
    fn default() -> Self {
        Self {
            min_return: 0.0,
            years: 7,
        }
    }
}

/// One qualifying ticker with its rounded window return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRow {
    pub symbol: String,
    pub return_pct: f64,
}

/// Total percentage return of adjusted close across the series.
///
/// Bars with a non-finite `adj_close` are discarded before picking the first
/// and last usable price. Fewer than 2 usable bars is `TooFewBars`; a
/// non-positive start price is `DegeneratePrice`. Both mean "skip this
/// ticker", never "abort the scan".
pub fn window_return(series: &PriceSeries) -> Result<f64, DataUnavailable> {
    let usable: Vec<f64> = series
        .bars()
        .iter()
        .map(|b| b.adj_close)
        .filter(|p| p.is_finite())
        .collect();

    if usable.len() < 2 {
        return Err(DataUnavailable::TooFewBars {
            usable: usable.len(),
        });
    }

    let start = usable[0];
    let end = usable[usable.len() - 1];
    if start <= 0.0 {
        return Err(DataUnavailable::DegeneratePrice);
    }

    Ok((end - start) / start * 100.0)
}

/// Evaluate one ticker against the at-or-below filter.
///
/// The unrounded return decides inclusion; the emitted row carries the
/// 2-decimal rounding. `Ok(Some(row))` — the ticker qualifies; `Ok(None)` —
/// the return computed cleanly but is above `min_return`; `Err` — no signal
/// could be computed.
pub fn evaluate_ticker(
    symbol: &str,
    series: &PriceSeries,
    min_return: f64,
) -> Result<Option<ReturnRow>, DataUnavailable> {
    let return_pct = window_return(series)?;
    if return_pct <= min_return {
        Ok(Some(ReturnRow {
            symbol: symbol.to_string(),
            return_pct: round2(return_pct),
        }))
    } else {
        Ok(None)
    }
}
