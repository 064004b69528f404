//! Universe parsing and validation.
//!
//! Parses symbol lists from configuration and checks that each member has
//! price data before a run starts. Members without any data are skipped
//! with a warning; short histories are kept, since eligibility is decided
//! per rebalance date once enough observations accumulate.

use crate::domain::error::RotorError;
use crate::domain::price_series::PriceSeries;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::collections::HashSet;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),
}

impl From<UniverseError> for RotorError {
    fn from(err: UniverseError) -> Self {
        RotorError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "universe".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Splits a comma-separated symbol list, trimming and uppercasing each token.
pub fn parse_symbols(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if seen.contains(&symbol) {
            return Err(UniverseError::DuplicateSymbol(symbol));
        }
        seen.insert(symbol.clone());
        symbols.push(symbol);
    }

    Ok(symbols)
}

#[derive(Debug)]
pub struct UniverseValidationResult {
    /// Loaded series for every member that passed validation, in the
    /// universe's configured order.
    pub series: Vec<PriceSeries>,
    pub skipped: Vec<SkippedSymbol>,
}

impl UniverseValidationResult {
    pub fn symbols(&self) -> Vec<String> {
        self.series.iter().map(|s| s.symbol.clone()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone)]
pub enum SkipReason {
    LoadFailed { reason: String },
    NoData,
}

/// Loads every universe member through the data port, skipping members
/// that have no usable data. Fails only when nothing remains.
pub fn validate_universe(
    data_port: &dyn DataPort,
    symbols: Vec<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<UniverseValidationResult, RotorError> {
    let mut series = Vec::new();
    let mut skipped = Vec::new();

    for symbol in symbols {
        let loaded = match data_port.close_series(&symbol, start_date, end_date) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Warning: skipping {} ({})", symbol, e);
                skipped.push(SkippedSymbol {
                    symbol: symbol.clone(),
                    reason: SkipReason::LoadFailed {
                        reason: e.to_string(),
                    },
                });
                continue;
            }
        };

        if loaded.is_empty() {
            eprintln!("Warning: skipping {} (no data found)", symbol);
            skipped.push(SkippedSymbol {
                symbol: symbol.clone(),
                reason: SkipReason::NoData,
            });
            continue;
        }

        eprintln!("  {}: {} observations [OK]", symbol, loaded.len());
        series.push(loaded);
    }

    if series.is_empty() {
        return Err(RotorError::EmptyUniverse);
    }

    if !skipped.is_empty() {
        eprintln!(
            "Running {} of {} universe members",
            series.len(),
            series.len() + skipped.len()
        );
    }

    Ok(UniverseValidationResult { series, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbols_basic() {
        let result = parse_symbols("SPY,QQQ,TLT,DBC,GLD").unwrap();
        assert_eq!(result, vec!["SPY", "QQQ", "TLT", "DBC", "GLD"]);
    }

    #[test]
    fn test_parse_symbols_with_whitespace() {
        let result = parse_symbols("  SPY , QQQ ,TLT,  GLD  ").unwrap();
        assert_eq!(result, vec!["SPY", "QQQ", "TLT", "GLD"]);
    }

    #[test]
    fn test_parse_symbols_uppercase() {
        let result = parse_symbols("spy,qqq,tlt").unwrap();
        assert_eq!(result, vec!["SPY", "QQQ", "TLT"]);
    }

    #[test]
    fn test_parse_symbols_single() {
        let result = parse_symbols("SPY").unwrap();
        assert_eq!(result, vec!["SPY"]);
    }

    #[test]
    fn test_parse_symbols_empty_token() {
        let result = parse_symbols("SPY,,QQQ");
        assert!(matches!(result, Err(UniverseError::EmptyToken)));
    }

    #[test]
    fn test_parse_symbols_duplicate() {
        let result = parse_symbols("SPY,QQQ,SPY");
        assert!(matches!(result, Err(UniverseError::DuplicateSymbol(s)) if s == "SPY"));
    }

    #[test]
    fn test_universe_error_maps_to_config_invalid() {
        let err: RotorError = UniverseError::EmptyToken.into();
        assert!(matches!(err, RotorError::ConfigInvalid { key, .. } if key == "universe"));
    }
}
