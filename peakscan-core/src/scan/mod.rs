//! Scan engines and result aggregation.

pub mod aggregate;
pub mod lifetime_high;
pub mod progress;
pub mod returns;

pub use aggregate::{summarize, PatternSummary};
pub use lifetime_high::{detect, Occurrence};
pub use progress::{ScanProgress, SilentProgress, StdoutProgress};
pub use returns::{evaluate_ticker, window_return, ReturnRow, ReturnScanParams};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a ticker produced no usable signal.
///
/// Per-ticker conditions are never fatal: the scan records the reason and
/// continues, and the reason rides along in the exported skip ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DataUnavailable {
    #[error("no usable bars returned")]
    NoData,

    #[error("not enough usable bars ({usable} < 2)")]
    TooFewBars { usable: usize },

    #[error("degenerate start price, cannot compute return")]
    DegeneratePrice,

    #[error("provider error: {0}")]
    Provider(String),
}

/// Round to 2 decimal places — the precision of every exported percentage.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
