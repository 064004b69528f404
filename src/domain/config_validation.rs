//! Configuration validation.
//!
//! Validates all config fields before a run touches price data.

use crate::domain::config::Lookback;
use crate::domain::error::RotorError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), RotorError> {
    validate_prices_dir(config)?;
    validate_dates(config)?;
    validate_cash_return(config)?;
    validate_risk_free_rate(config)?;
    validate_benchmark(config)?;
    validate_universe_key(config)?;
    validate_top_n(config)?;
    validate_lookback(config)?;
    validate_sma_window(config)?;
    Ok(())
}

pub fn validate_live_config(config: &dyn ConfigPort) -> Result<(), RotorError> {
    validate_equity(config)?;
    Ok(())
}

fn validate_prices_dir(config: &dyn ConfigPort) -> Result<(), RotorError> {
    match config.get_string("data", "prices_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(RotorError::ConfigMissing {
            section: "data".to_string(),
            key: "prices_dir".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), RotorError> {
    let start_str = config.get_string("simulation", "start_date");
    let end_str = config.get_string("simulation", "end_date");

    let start_date = parse_date(start_str.as_deref(), "simulation", "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "simulation", "end_date")?;

    if start_date >= end_date {
        return Err(RotorError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }

    if let Some(warmup_str) = config.get_string("data", "warmup_start") {
        let warmup = parse_date(Some(&warmup_str), "data", "warmup_start")?;
        if warmup > start_date {
            return Err(RotorError::ConfigInvalid {
                section: "data".to_string(),
                key: "warmup_start".to_string(),
                reason: "warmup_start must not be after start_date".to_string(),
            });
        }
    }
    Ok(())
}

fn parse_date(value: Option<&str>, section: &str, field: &str) -> Result<NaiveDate, RotorError> {
    match value {
        None => Err(RotorError::ConfigMissing {
            section: section.to_string(),
            key: field.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| RotorError::ConfigInvalid {
                section: section.to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            })
        }
    }
}

fn validate_cash_return(config: &dyn ConfigPort) -> Result<(), RotorError> {
    let value = config.get_double("simulation", "cash_annual_return", 0.0);
    if value <= -1.0 {
        return Err(RotorError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "cash_annual_return".to_string(),
            reason: "cash_annual_return must be greater than -1".to_string(),
        });
    }
    Ok(())
}

fn validate_risk_free_rate(config: &dyn ConfigPort) -> Result<(), RotorError> {
    let value = config.get_double("simulation", "risk_free_rate", 0.0);
    if value < 0.0 || value >= 1.0 {
        return Err(RotorError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "risk_free_rate".to_string(),
            reason: "risk_free_rate must be between 0 and 1".to_string(),
        });
    }
    Ok(())
}

fn validate_benchmark(config: &dyn ConfigPort) -> Result<(), RotorError> {
    match config.get_string("simulation", "benchmark") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(RotorError::ConfigMissing {
            section: "simulation".to_string(),
            key: "benchmark".to_string(),
        }),
    }
}

fn validate_universe_key(config: &dyn ConfigPort) -> Result<(), RotorError> {
    match config.get_string("strategy", "universe") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(RotorError::ConfigMissing {
            section: "strategy".to_string(),
            key: "universe".to_string(),
        }),
    }
}

fn validate_top_n(config: &dyn ConfigPort) -> Result<(), RotorError> {
    let value = config.get_int("strategy", "top_n", 3);
    if value < 1 {
        return Err(RotorError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "top_n".to_string(),
            reason: "top_n must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), RotorError> {
    if let Some(s) = config.get_string("strategy", "momentum_lookback") {
        Lookback::parse(&s).map_err(|reason| RotorError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "momentum_lookback".to_string(),
            reason,
        })?;
    }
    Ok(())
}

fn validate_sma_window(config: &dyn ConfigPort) -> Result<(), RotorError> {
    let value = config.get_int("strategy", "sma_window", 135);
    if value < 1 {
        return Err(RotorError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "sma_window".to_string(),
            reason: "sma_window must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_equity(config: &dyn ConfigPort) -> Result<(), RotorError> {
    let value = config.get_double("live", "equity", 0.0);
    if value <= 0.0 {
        return Err(RotorError::ConfigInvalid {
            section: "live".to_string(),
            key: "equity".to_string(),
            reason: "equity must be positive".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    const VALID: &str = r#"
[data]
prices_dir = data/prices

[simulation]
start_date = 2007-01-01
end_date = 2026-01-31
cash_annual_return = 0.0
risk_free_rate = 0.0
benchmark = VFINX

[strategy]
universe = SPY,QQQ,TLT,DBC,GLD
top_n = 3
momentum_lookback = 126d
sma_window = 135
"#;

    #[test]
    fn valid_simulation_config_passes() {
        let config = make_config(VALID);
        assert!(validate_simulation_config(&config).is_ok());
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = make_config(
            "[data]\nprices_dir = prices\n[simulation]\nstart_date = 2020-01-01\nend_date = 2024-12-31\nbenchmark = VFINX\n[strategy]\nuniverse = SPY,GLD\n",
        );
        assert!(validate_simulation_config(&config).is_ok());
    }

    #[test]
    fn missing_prices_dir_fails() {
        let config = make_config(
            "[simulation]\nstart_date = 2020-01-01\nend_date = 2024-12-31\nbenchmark = VFINX\n[strategy]\nuniverse = SPY\n",
        );
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(err, RotorError::ConfigMissing { key, .. } if key == "prices_dir"));
    }

    #[test]
    fn missing_start_date_fails() {
        let config = make_config(
            "[data]\nprices_dir = p\n[simulation]\nend_date = 2024-12-31\nbenchmark = VFINX\n[strategy]\nuniverse = SPY\n",
        );
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(err, RotorError::ConfigMissing { key, .. } if key == "start_date"));
    }

    #[test]
    fn invalid_end_date_format_fails() {
        let config = make_config(
            "[data]\nprices_dir = p\n[simulation]\nstart_date = 2020-01-01\nend_date = 2024/12/31\nbenchmark = VFINX\n[strategy]\nuniverse = SPY\n",
        );
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(err, RotorError::ConfigInvalid { key, .. } if key == "end_date"));
    }

    #[test]
    fn start_date_after_end_date_fails() {
        let config = make_config(
            "[data]\nprices_dir = p\n[simulation]\nstart_date = 2024-12-31\nend_date = 2020-01-01\nbenchmark = VFINX\n[strategy]\nuniverse = SPY\n",
        );
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(err, RotorError::ConfigInvalid { key, .. } if key == "start_date"));
    }

    #[test]
    fn warmup_start_after_start_date_fails() {
        let config = make_config(
            "[data]\nprices_dir = p\nwarmup_start = 2020-06-01\n[simulation]\nstart_date = 2020-01-01\nend_date = 2024-12-31\nbenchmark = VFINX\n[strategy]\nuniverse = SPY\n",
        );
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(err, RotorError::ConfigInvalid { key, .. } if key == "warmup_start"));
    }

    #[test]
    fn cash_return_below_minus_one_fails() {
        let config = make_config(
            "[data]\nprices_dir = p\n[simulation]\nstart_date = 2020-01-01\nend_date = 2024-12-31\ncash_annual_return = -1.5\nbenchmark = VFINX\n[strategy]\nuniverse = SPY\n",
        );
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(err, RotorError::ConfigInvalid { key, .. } if key == "cash_annual_return"));
    }

    #[test]
    fn risk_free_rate_out_of_range_fails() {
        let config = make_config(
            "[data]\nprices_dir = p\n[simulation]\nstart_date = 2020-01-01\nend_date = 2024-12-31\nrisk_free_rate = 1.5\nbenchmark = VFINX\n[strategy]\nuniverse = SPY\n",
        );
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(err, RotorError::ConfigInvalid { key, .. } if key == "risk_free_rate"));
    }

    #[test]
    fn missing_benchmark_fails() {
        let config = make_config(
            "[data]\nprices_dir = p\n[simulation]\nstart_date = 2020-01-01\nend_date = 2024-12-31\n[strategy]\nuniverse = SPY\n",
        );
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(err, RotorError::ConfigMissing { key, .. } if key == "benchmark"));
    }

    #[test]
    fn missing_universe_fails() {
        let config = make_config(
            "[data]\nprices_dir = p\n[simulation]\nstart_date = 2020-01-01\nend_date = 2024-12-31\nbenchmark = VFINX\n",
        );
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(err, RotorError::ConfigMissing { key, .. } if key == "universe"));
    }

    #[test]
    fn top_n_zero_fails() {
        let config = make_config(
            "[data]\nprices_dir = p\n[simulation]\nstart_date = 2020-01-01\nend_date = 2024-12-31\nbenchmark = VFINX\n[strategy]\nuniverse = SPY\ntop_n = 0\n",
        );
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(err, RotorError::ConfigInvalid { key, .. } if key == "top_n"));
    }

    #[test]
    fn unparseable_lookback_fails() {
        let config = make_config(
            "[data]\nprices_dir = p\n[simulation]\nstart_date = 2020-01-01\nend_date = 2024-12-31\nbenchmark = VFINX\n[strategy]\nuniverse = SPY\nmomentum_lookback = six months\n",
        );
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(err, RotorError::ConfigInvalid { key, .. } if key == "momentum_lookback"));
    }

    #[test]
    fn sma_window_zero_fails() {
        let config = make_config(
            "[data]\nprices_dir = p\n[simulation]\nstart_date = 2020-01-01\nend_date = 2024-12-31\nbenchmark = VFINX\n[strategy]\nuniverse = SPY\nsma_window = 0\n",
        );
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(err, RotorError::ConfigInvalid { key, .. } if key == "sma_window"));
    }

    #[test]
    fn live_equity_positive_passes() {
        let config = make_config("[live]\nequity = 100000\n");
        assert!(validate_live_config(&config).is_ok());
    }

    #[test]
    fn live_equity_missing_fails() {
        let config = make_config("[live]\npositions_file = positions.json\n");
        let err = validate_live_config(&config).unwrap_err();
        assert!(matches!(err, RotorError::ConfigInvalid { key, .. } if key == "equity"));
    }

    #[test]
    fn live_equity_negative_fails() {
        let config = make_config("[live]\nequity = -5\n");
        let err = validate_live_config(&config).unwrap_err();
        assert!(matches!(err, RotorError::ConfigInvalid { key, .. } if key == "equity"));
    }
}
