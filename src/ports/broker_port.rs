//! Broker access port trait.

use crate::domain::error::RotorError;
use crate::domain::orders::{Position, RebalanceOrder};

pub trait BrokerPort {
    fn account_equity(&self) -> Result<f64, RotorError>;

    fn open_positions(&self) -> Result<Vec<Position>, RotorError>;

    fn submit(&self, order: &RebalanceOrder) -> Result<(), RotorError>;
}
