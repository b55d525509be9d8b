//! PeakScan Runner — scan orchestration, export, and scan history.
//!
//! Wires the core engines to a price provider and a ticker universe:
//! - `config` — TOML scan configuration with sensible defaults
//! - `scanner` — per-ticker fan-out, skip folding, invocation-level errors
//! - `history` — one CSV per calendar day, append-or-create
//! - `export` — flat row/column output (CSV, JSON)

pub mod config;
pub mod export;
pub mod history;
pub mod scanner;

pub use config::{ConfigError, ScanConfig};
pub use history::{HistoryError, HistoryStore};
pub use scanner::{
    run_pattern_scan, run_return_scan, scan_pattern, scan_returns, PatternScanResult,
    ReturnScanResult, ScanError, TickerSkip,
};
