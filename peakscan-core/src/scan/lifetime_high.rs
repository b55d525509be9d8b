//! Lifetime-high pattern detection.
//!
//! Flags bars where the close set (or tied) a lifetime high, then checks
//! whether that high held as support over the next `SUPPORT_WINDOW` bars and
//! whether price appreciated past a threshold in the disjoint window after.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::round2;
use crate::domain::{Bar, PriceSeries};

/// Forward window (bars) over which a fresh high must hold as support.
pub const SUPPORT_WINDOW: usize = 10;

/// Disjoint window after the support region in which appreciation is measured.
pub const APPRECIATION_WINDOW: usize = 20;

/// A high "holds" while no low undercuts it by more than 2%.
pub const SUPPORT_TOLERANCE: f64 = 0.98;

/// Running lifetime-high close per bar, with the bars that set (or tied) it.
#[derive(Debug, Clone)]
pub struct LifetimeHighs {
    pub running_max: Vec<f64>,
    pub is_high: Vec<bool>,
}

/// Compute the running maximum of `close` and flag new or tied highs.
///
/// A tie counts as a high: `close == running_max` at that bar.
pub fn lifetime_highs(bars: &[Bar]) -> LifetimeHighs {
    let mut running_max = Vec::with_capacity(bars.len());
    let mut is_high = Vec::with_capacity(bars.len());
    let mut max = f64::NEG_INFINITY;

    for bar in bars {
        if bar.close > max {
            max = bar.close;
        }
        running_max.push(max);
        is_high.push(bar.close == max);
    }

    LifetimeHighs {
        running_max,
        is_high,
    }
}

/// One qualifying (high, support-hold, appreciation) event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub symbol: String,
    pub date: NaiveDate,
    pub lifetime_high: f64,
    /// Appreciation beyond the lifetime high, stored as a percentage.
    pub appreciation_pct: f64,
}

/// Scan one series for lifetime highs that held as support and appreciated.
///
/// `threshold` is a fraction (0.10 = 10%). Single linear pass with bounded
/// lookahead; every qualifying high index is evaluated independently, so
/// nearby highs may each produce an occurrence. A series too short for the
/// lookahead windows yields an empty set, not an error.
pub fn detect(symbol: &str, series: &PriceSeries, threshold: f64) -> Vec<Occurrence> {
    let bars = series.bars();
    let highs = lifetime_highs(bars);
    let mut occurrences = Vec::new();

    for i in 1..bars.len() {
        if !highs.is_high[i - 1] {
            continue;
        }
        let high = highs.running_max[i - 1];
        if high <= 0.0 {
            continue;
        }

        let support_end = (i + SUPPORT_WINDOW).min(bars.len());
        let support = bars[i..support_end]
            .iter()
            .map(|b| b.low)
            .fold(f64::INFINITY, f64::min);
        if support < SUPPORT_TOLERANCE * high {
            continue;
        }

        let future_start = i + SUPPORT_WINDOW;
        let future_end = (future_start + APPRECIATION_WINDOW).min(bars.len());
        if future_start >= future_end {
            // Appreciation window falls entirely past the series end.
            continue;
        }
        let future = bars[future_start..future_end]
            .iter()
            .map(|b| b.close)
            .fold(f64::NEG_INFINITY, f64::max);

        let appreciation = (future - high) / high;
        if appreciation >= threshold {
            occurrences.push(Occurrence {
                symbol: symbol.to_string(),
                date: bars[i].date,
                lifetime_high: high,
                appreciation_pct: round2(appreciation * 100.0),
            });
        }
    }

    occurrences
}
