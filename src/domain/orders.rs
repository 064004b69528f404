//! Turning a target-weight decision into broker orders.
//!
//! Two passes over the account: close every held position whose target
//! weight is zero, then size a notional buy for each positive weight.
//! Orders are a plan only; submission is the broker adapter's job.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ignore position quantities smaller than this when deciding to close.
const QUANTITY_EPSILON: f64 = 1e-9;

/// A currently held position as reported by the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RebalanceOrder {
    /// Flatten an existing position by share quantity.
    Close {
        symbol: String,
        quantity: f64,
        side: OrderSide,
    },
    /// Buy up to a dollar amount of the symbol.
    TargetNotional { symbol: String, notional: f64 },
}

/// Plan the orders that move an account onto the given target weights.
///
/// Positions with a zero (or absent) target are closed first so that the
/// freed cash funds the buys. Buy notionals are `equity * weight` rounded
/// to cents; anything not bought stays in cash.
pub fn plan_rebalance(
    weights: &BTreeMap<String, f64>,
    equity: f64,
    positions: &[Position],
) -> Vec<RebalanceOrder> {
    let mut orders = Vec::new();

    for position in positions {
        let target = weights.get(&position.symbol).copied().unwrap_or(0.0);
        if target > 0.0 || position.quantity.abs() <= QUANTITY_EPSILON {
            continue;
        }
        let side = if position.quantity > 0.0 {
            OrderSide::Sell
        } else {
            OrderSide::Buy
        };
        orders.push(RebalanceOrder::Close {
            symbol: position.symbol.clone(),
            quantity: position.quantity.abs(),
            side,
        });
    }

    for (symbol, weight) in weights {
        if *weight <= 0.0 {
            continue;
        }
        orders.push(RebalanceOrder::TargetNotional {
            symbol: symbol.clone(),
            notional: round_cents(equity * weight),
        });
    }

    orders
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
