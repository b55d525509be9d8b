//! Serializable scan configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a scan configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for one scan invocation.
///
/// Every field has a default, so a config file only needs the fields it
/// overrides. Thresholds are in percent at this layer; the detector's
/// fractional threshold is derived at the call site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Keep tickers whose total return is *at or below* this percentage.
    /// The inverted sense is deliberate: the return scan selects
    /// underperformers.
    pub min_return: f64,

    /// Return-scan lookback in years (365-day calendar years).
    pub years: u32,

    /// Pattern appreciation threshold, in percent (10 = 10%).
    pub appreciation_threshold: f64,

    /// Summary success threshold, in percent.
    pub success_threshold: f64,

    /// Pattern-scan history depth in years.
    pub history_years: u32,

    /// Explicit ticker list. When empty, `universe_file` (or the built-in
    /// default universe) supplies the tickers.
    pub tickers: Vec<String>,

    /// Optional path to a universe TOML file.
    pub universe_file: Option<PathBuf>,

    /// Directory where scan history CSVs are written.
    pub history_dir: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_return: 0.0,
            years: 7,
            appreciation_threshold: 10.0,
            success_threshold: 10.0,
            history_years: 10,
            tickers: Vec::new(),
            universe_file: None,
            history_dir: PathBuf::from("scan_history"),
        }
    }
}

impl ScanConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
