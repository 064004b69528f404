//! Point-in-time eligibility and momentum ranking.

use crate::domain::config::Lookback;
use crate::domain::indicator;
use crate::domain::price_series::{find_series, PriceSeries};
use chrono::NaiveDate;

/// One universe member's score at a single as-of date.
///
/// Ineligible members carry `momentum: None` and `trend_pass: false`; they
/// are excluded from ranking entirely rather than scored as worst.
#[derive(Debug, Clone)]
pub struct AssetScore {
    pub symbol: String,
    pub momentum: Option<f64>,
    pub trend_pass: bool,
    pub eligible: bool,
}

pub fn score_asset(
    symbol: &str,
    series: Option<&PriceSeries>,
    as_of: NaiveDate,
    lookback: Lookback,
    sma_window: usize,
) -> AssetScore {
    let unscored = AssetScore {
        symbol: symbol.to_string(),
        momentum: None,
        trend_pass: false,
        eligible: false,
    };

    let Some(series) = series else {
        return unscored;
    };
    if series.observations_up_to(as_of).len() < lookback.min_observations(sma_window) {
        return unscored;
    }

    // the observation-count gate guarantees the trend filter resolves; the
    // momentum endpoints may still be missing under a calendar lookback
    match (
        indicator::momentum(series, as_of, lookback),
        indicator::trend_pass(series, as_of, sma_window),
    ) {
        (Some(momentum), Some(trend_pass)) => AssetScore {
            symbol: symbol.to_string(),
            momentum: Some(momentum),
            trend_pass,
            eligible: true,
        },
        _ => unscored,
    }
}

/// Scores every universe member in universe order.
pub fn score_universe(
    prices: &[PriceSeries],
    universe: &[String],
    as_of: NaiveDate,
    lookback: Lookback,
    sma_window: usize,
) -> Vec<AssetScore> {
    universe
        .iter()
        .map(|symbol| score_asset(symbol, find_series(prices, symbol), as_of, lookback, sma_window))
        .collect()
}

/// Eligible symbols ranked by momentum, descending. The sort is stable, so
/// ties keep universe order.
pub fn rank_eligible(scores: &[AssetScore]) -> Vec<String> {
    let mut ranked: Vec<(&str, f64)> = scores
        .iter()
        .filter(|s| s.eligible)
        .filter_map(|s| s.momentum.map(|m| (s.symbol.as_str(), m)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().map(|(symbol, _)| symbol.to_string()).collect()
}
