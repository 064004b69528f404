//! The monthly rebalance decision.

use crate::domain::config::SimulationConfig;
use crate::domain::price_series::PriceSeries;
use crate::domain::ranking::{self, AssetScore};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Immutable record of one rebalance. Created once, appended to the decision
/// log, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct RebalanceDecision {
    pub date: NaiveDate,
    /// Rank-ordered top-N symbols; shorter when fewer members are eligible.
    pub selected: Vec<String>,
    /// Momentum per universe member, `None` where the member was ineligible.
    pub momentum: BTreeMap<String, Option<f64>>,
    pub trend_pass: BTreeMap<String, bool>,
    /// Target weight per universe member: one sleeve or zero.
    pub weights: BTreeMap<String, f64>,
    pub cash_weight: f64,
}

impl RebalanceDecision {
    pub fn weight(&self, symbol: &str) -> f64 {
        self.weights.get(symbol).copied().unwrap_or(0.0)
    }

    pub fn invested_weight(&self) -> f64 {
        self.weights.values().sum()
    }

    /// How many of the `top_n` sleeves sit in cash.
    pub fn cash_sleeve_count(&self, top_n: usize) -> u32 {
        (self.cash_weight * top_n as f64).round() as u32
    }
}

/// Evaluates the rotation rule as of one date: rank eligible members by
/// momentum, take the top N, and fund each selected sleeve only if its trend
/// filter passes. A failed sleeve stays in cash; it is never reallocated to
/// the next-ranked member.
pub fn decide(
    prices: &[PriceSeries],
    config: &SimulationConfig,
    as_of: NaiveDate,
) -> RebalanceDecision {
    let scores = ranking::score_universe(
        prices,
        &config.universe,
        as_of,
        config.lookback,
        config.sma_window,
    );
    decide_from_scores(&config.universe, &scores, config.top_n, as_of)
}

/// Same rule applied to already-computed scores.
pub fn decide_from_scores(
    universe: &[String],
    scores: &[AssetScore],
    top_n: usize,
    as_of: NaiveDate,
) -> RebalanceDecision {
    let selected: Vec<String> = ranking::rank_eligible(scores)
        .into_iter()
        .take(top_n)
        .collect();
    let sleeve = 1.0 / top_n as f64;

    let by_symbol: HashMap<&str, &AssetScore> =
        scores.iter().map(|s| (s.symbol.as_str(), s)).collect();

    let mut weights: BTreeMap<String, f64> =
        universe.iter().map(|s| (s.clone(), 0.0)).collect();
    for symbol in &selected {
        if by_symbol.get(symbol.as_str()).is_some_and(|s| s.trend_pass) {
            weights.insert(symbol.clone(), sleeve);
        }
    }
    let cash_weight = 1.0 - weights.values().sum::<f64>();

    RebalanceDecision {
        date: as_of,
        selected,
        momentum: scores.iter().map(|s| (s.symbol.clone(), s.momentum)).collect(),
        trend_pass: scores.iter().map(|s| (s.symbol.clone(), s.trend_pass)).collect(),
        weights,
        cash_weight,
    }
}
