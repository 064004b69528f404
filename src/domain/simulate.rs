//! Day-by-day simulation of the rotation rule.
//!
//! A single forward fold over the unified timeline: on a rebalance date the
//! fold state adopts that date's decision, and the adopted weights already
//! apply to the same day's realized returns. Between rebalances the weights
//! are fixed fractions re-applied daily, not drifting share counts.

use crate::domain::benchmark;
use crate::domain::config::SimulationConfig;
use crate::domain::decision::{decide, RebalanceDecision};
use crate::domain::error::RotorError;
use crate::domain::price_series::{find_series, PriceSeries};
use crate::domain::timeline::{build_unified_timeline, monthly_rebalance_dates};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Fold state: the weights currently applied, aligned with universe order.
/// Starts all-cash and changes only when a decision is adopted.
#[derive(Debug, Clone)]
pub struct WeightState {
    weights: Vec<f64>,
}

impl WeightState {
    pub fn all_cash(universe_len: usize) -> Self {
        Self {
            weights: vec![0.0; universe_len],
        }
    }

    /// The rebalance-date transition.
    pub fn adopt(&mut self, decision: &RebalanceDecision, universe: &[String]) {
        for (slot, symbol) in self.weights.iter_mut().zip(universe) {
            *slot = decision.weight(symbol);
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn invested(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// One day's strategy return: sleeve returns plus cash accrual on the
    /// uninvested remainder.
    pub fn daily_return(&self, asset_returns: &[f64], cash_daily: f64) -> f64 {
        let invested: f64 = self
            .weights
            .iter()
            .zip(asset_returns)
            .map(|(w, r)| w * r)
            .sum();
        invested + (1.0 - self.invested()) * cash_daily
    }
}

#[derive(Debug, Clone)]
pub struct NamedSeries {
    pub name: String,
    pub returns: Vec<f64>,
}

/// Everything one run produces: the in-window date index, the decision log,
/// and the daily return series for the strategy and its benchmarks.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub dates: Vec<NaiveDate>,
    pub decisions: Vec<RebalanceDecision>,
    pub strategy_returns: Vec<f64>,
    pub benchmarks: Vec<NamedSeries>,
}

impl SimulationResult {
    /// Strategy first, then benchmarks, for tables and charts.
    pub fn all_series(&self) -> Vec<(&str, &[f64])> {
        let mut series = vec![("Strategy", self.strategy_returns.as_slice())];
        for bench in &self.benchmarks {
            series.push((bench.name.as_str(), bench.returns.as_slice()));
        }
        series
    }
}

/// Runs the full historical simulation over `prices`, which must hold the
/// loaded universe members and the benchmark series.
pub fn run_simulation(
    prices: &[PriceSeries],
    config: &SimulationConfig,
) -> Result<SimulationResult, RotorError> {
    // the timeline spans warmup and window, benchmark dates included
    let timeline = build_unified_timeline(prices);
    if timeline.is_empty() {
        return Err(RotorError::Data {
            reason: "no price observations loaded".to_string(),
        });
    }

    let rebalance: BTreeSet<NaiveDate> =
        monthly_rebalance_dates(&timeline, config.start_date, config.end_date)
            .into_iter()
            .collect();

    // per-member daily returns aligned to the full timeline; members the
    // data port skipped stay at zero and carry no weight anyway
    let asset_returns: Vec<Vec<f64>> = config
        .universe
        .iter()
        .map(|symbol| match find_series(prices, symbol) {
            Some(series) => series.daily_returns(&timeline),
            None => vec![0.0; timeline.len()],
        })
        .collect();

    let cash_daily = config.cash_daily_rate();
    let mut state = WeightState::all_cash(config.universe.len());
    let mut decisions: Vec<RebalanceDecision> = Vec::new();
    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut strategy_returns: Vec<f64> = Vec::new();
    let mut today = vec![0.0; config.universe.len()];

    for (i, &date) in timeline.iter().enumerate() {
        if rebalance.contains(&date) {
            let decision = decide(prices, config, date);
            state.adopt(&decision, &config.universe);
            decisions.push(decision);
        }
        if date >= config.start_date && date <= config.end_date {
            for (slot, series_returns) in today.iter_mut().zip(&asset_returns) {
                *slot = series_returns[i];
            }
            strategy_returns.push(state.daily_return(&today, cash_daily));
            dates.push(date);
        }
    }

    if dates.is_empty() {
        return Err(RotorError::Data {
            reason: format!(
                "no trading dates between {} and {}",
                config.start_date, config.end_date
            ),
        });
    }

    let equal_weight = benchmark::equal_weight_returns(
        prices,
        &config.universe,
        &timeline,
        config.start_date,
        config.end_date,
    );

    let bench_series =
        find_series(prices, &config.benchmark).ok_or(RotorError::MissingReferenceData {
            symbol: config.benchmark.clone(),
        })?;
    let buy_hold = benchmark::buy_and_hold_returns(bench_series, &dates)?;

    Ok(SimulationResult {
        dates,
        decisions,
        strategy_returns,
        benchmarks: vec![
            NamedSeries {
                name: "EqualWeight".to_string(),
                returns: equal_weight,
            },
            NamedSeries {
                name: config.benchmark.clone(),
                returns: buy_hold,
            },
        ],
    })
}
