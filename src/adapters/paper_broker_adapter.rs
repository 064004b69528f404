//! Paper broker adapter.
//!
//! Stands in for a live brokerage account: equity and open positions come
//! from configuration, and submitted orders are logged instead of routed.

use crate::domain::config::LiveConfig;
use crate::domain::error::RotorError;
use crate::domain::orders::{Position, RebalanceOrder};
use crate::ports::broker_port::BrokerPort;
use std::cell::RefCell;
use std::fs;

#[derive(Debug)]
pub struct PaperBrokerAdapter {
    equity: f64,
    positions: Vec<Position>,
    submitted: RefCell<Vec<RebalanceOrder>>,
}

impl PaperBrokerAdapter {
    /// Positions load from the configured JSON file, a list of
    /// `{"symbol": ..., "quantity": ...}` objects. No file means a flat
    /// account.
    pub fn from_config(config: &LiveConfig) -> Result<Self, RotorError> {
        let positions = match &config.positions_file {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                serde_json::from_str(&content).map_err(|e| RotorError::Data {
                    reason: format!("failed to parse positions file {}: {}", path, e),
                })?
            }
            None => Vec::new(),
        };
        Ok(Self {
            equity: config.equity,
            positions,
            submitted: RefCell::new(Vec::new()),
        })
    }

    /// Orders accepted so far, in submission order.
    pub fn submitted(&self) -> Vec<RebalanceOrder> {
        self.submitted.borrow().clone()
    }
}

impl BrokerPort for PaperBrokerAdapter {
    fn account_equity(&self) -> Result<f64, RotorError> {
        Ok(self.equity)
    }

    fn open_positions(&self) -> Result<Vec<Position>, RotorError> {
        Ok(self.positions.clone())
    }

    fn submit(&self, order: &RebalanceOrder) -> Result<(), RotorError> {
        match order {
            RebalanceOrder::Close {
                symbol,
                quantity,
                side,
            } => {
                eprintln!("paper order: {} {} qty {:.4} (close)", side, symbol, quantity);
            }
            RebalanceOrder::TargetNotional { symbol, notional } => {
                eprintln!("paper order: BUY {} notional {:.2}", symbol, notional);
            }
        }
        self.submitted.borrow_mut().push(order.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn flat_account_without_positions_file() {
        let broker = PaperBrokerAdapter::from_config(&LiveConfig {
            equity: 100_000.0,
            positions_file: None,
        })
        .unwrap();

        assert_eq!(broker.account_equity().unwrap(), 100_000.0);
        assert!(broker.open_positions().unwrap().is_empty());
    }

    #[test]
    fn positions_load_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"symbol": "SPY", "quantity": 12.5}}, {{"symbol": "GLD", "quantity": 3.0}}]"#
        )
        .unwrap();

        let broker = PaperBrokerAdapter::from_config(&LiveConfig {
            equity: 50_000.0,
            positions_file: Some(file.path().to_string_lossy().into_owned()),
        })
        .unwrap();

        let positions = broker.open_positions().unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].symbol, "SPY");
        assert_eq!(positions[0].quantity, 12.5);
    }

    #[test]
    fn malformed_positions_file_is_a_data_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = PaperBrokerAdapter::from_config(&LiveConfig {
            equity: 50_000.0,
            positions_file: Some(file.path().to_string_lossy().into_owned()),
        })
        .unwrap_err();
        assert!(matches!(err, RotorError::Data { .. }));
    }

    #[test]
    fn submit_records_orders_in_order() {
        let broker = PaperBrokerAdapter::from_config(&LiveConfig {
            equity: 10_000.0,
            positions_file: None,
        })
        .unwrap();

        let close = RebalanceOrder::Close {
            symbol: "TLT".to_string(),
            quantity: 4.0,
            side: crate::domain::orders::OrderSide::Sell,
        };
        let buy = RebalanceOrder::TargetNotional {
            symbol: "SPY".to_string(),
            notional: 3333.33,
        };
        broker.submit(&close).unwrap();
        broker.submit(&buy).unwrap();

        assert_eq!(broker.submitted(), vec![close, buy]);
    }
}
