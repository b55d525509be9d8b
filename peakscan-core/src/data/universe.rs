//! Universe configuration — index-organized ticker lists.
//!
//! The universe is stored as a TOML file grouping tickers by the market index
//! they belong to. NSE symbols carry a `.NS` suffix and BSE symbols a `.BO`
//! suffix, matching what the price provider expects.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Normalize a raw ticker symbol: trim whitespace, uppercase.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// The complete universe configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Universe {
    pub indices: BTreeMap<String, Vec<String>>,
}

impl Universe {
    /// Load a universe from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read universe file: {e}"))?;
        Self::from_toml(&content)
    }

    /// Parse a universe from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("parse universe TOML: {e}"))
    }

    /// Serialize the universe to TOML.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("serialize universe: {e}"))
    }

    /// All tickers across all indices, normalized.
    pub fn all_tickers(&self) -> Vec<String> {
        self.indices
            .values()
            .flat_map(|tickers| tickers.iter().map(|t| normalize_symbol(t)))
            .collect()
    }

    /// Tickers for a specific index.
    pub fn index_tickers(&self, index: &str) -> Option<&[String]> {
        self.indices.get(index).map(|v| v.as_slice())
    }

    /// The list of index names.
    pub fn index_names(&self) -> Vec<&str> {
        self.indices.keys().map(|s| s.as_str()).collect()
    }

    /// Total number of tickers.
    pub fn ticker_count(&self) -> usize {
        self.indices.values().map(|v| v.len()).sum()
    }

    /// Built-in default universe: S&P 500, NIFTY 50, and BSE SENSEX samples.
    pub fn default_indices() -> Self {
        let mut indices = BTreeMap::new();

        indices.insert(
            "sp500".into(),
            vec![
                "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "AVGO", "CRM", "ADBE", "ORCL",
                "JNJ", "UNH", "LLY", "JPM", "BAC", "V", "XOM", "CVX", "WMT", "PG", "KO", "HD",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        );

        indices.insert(
            "nifty50".into(),
            vec![
                "RELIANCE.NS",
                "TCS.NS",
                "HDFCBANK.NS",
                "INFY.NS",
                "ICICIBANK.NS",
                "HINDUNILVR.NS",
                "ITC.NS",
                "SBIN.NS",
                "BHARTIARTL.NS",
                "LT.NS",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        );

        indices.insert(
            "sensex".into(),
            vec![
                "RELIANCE.BO",
                "TCS.BO",
                "HDFCBANK.BO",
                "ICICIBANK.BO",
                "SBIN.BO",
                "INFY.BO",
                "ITC.BO",
                "ASIANPAINT.BO",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        );

        Self { indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_universe_has_indices() {
        let u = Universe::default_indices();
        assert!(u.index_names().contains(&"sp500"));
        assert!(u.index_names().contains(&"nifty50"));
        assert!(u.index_names().contains(&"sensex"));
        assert!(u.ticker_count() > 30);
    }

    #[test]
    fn toml_roundtrip() {
        let u = Universe::default_indices();
        let toml_str = u.to_toml().unwrap();
        let parsed = Universe::from_toml(&toml_str).unwrap();
        assert_eq!(u.ticker_count(), parsed.ticker_count());
    }

    #[test]
    fn all_tickers_flattens_with_suffixes() {
        let u = Universe::default_indices();
        let all = u.all_tickers();
        assert!(all.contains(&"AAPL".to_string()));
        assert!(all.contains(&"RELIANCE.NS".to_string()));
        assert!(all.contains(&"RELIANCE.BO".to_string()));
    }

    #[test]
    fn index_lookup() {
        let u = Universe::default_indices();
        let nifty = u.index_tickers("nifty50").unwrap();
        assert!(nifty.iter().all(|t| t.ends_with(".NS")));
    }

    #[test]
    fn normalization_trims_and_uppercases() {
        assert_eq!(normalize_symbol("  aapl "), "AAPL");
        assert_eq!(normalize_symbol("reliance.ns"), "RELIANCE.NS");
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(Universe::from_toml("indices = 3").is_err());
    }
}
