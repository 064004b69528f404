//! Comparison return series.

use crate::domain::error::RotorError;
use crate::domain::price_series::{find_series, PriceSeries};
use crate::domain::timeline::monthly_rebalance_dates;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Monthly-rebalanced equal weight across the universe members that have an
/// observation exactly on each rebalance date. A member without data that
/// month is excluded for that month only. No ranking, no trend filter, and
/// nothing accrues on the unallocated residual.
pub fn equal_weight_returns(
    prices: &[PriceSeries],
    universe: &[String],
    timeline: &[NaiveDate],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<f64> {
    let rebalance: BTreeSet<NaiveDate> = monthly_rebalance_dates(timeline, start, end)
        .into_iter()
        .collect();

    let asset_returns: Vec<Vec<f64>> = universe
        .iter()
        .map(|symbol| match find_series(prices, symbol) {
            Some(series) => series.daily_returns(timeline),
            None => vec![0.0; timeline.len()],
        })
        .collect();

    let mut weights = vec![0.0; universe.len()];
    let mut out = Vec::new();

    for (i, &date) in timeline.iter().enumerate() {
        if rebalance.contains(&date) {
            let available: Vec<usize> = universe
                .iter()
                .enumerate()
                .filter(|(_, symbol)| {
                    find_series(prices, symbol).is_some_and(|s| s.price_on(date).is_some())
                })
                .map(|(idx, _)| idx)
                .collect();

            weights.fill(0.0);
            if !available.is_empty() {
                let share = 1.0 / available.len() as f64;
                for idx in available {
                    weights[idx] = share;
                }
            }
        }
        if date >= start && date <= end {
            let ret: f64 = weights
                .iter()
                .zip(&asset_returns)
                .map(|(w, r)| w * r[i])
                .sum();
            out.push(ret);
        }
    }
    out
}

/// Daily percent change of a reference series across the window dates.
/// Closes are carried forward within the window only, so days before the
/// first in-window observation contribute zero. A series with no in-window
/// observations cannot serve as a comparison and fails hard.
pub fn buy_and_hold_returns(
    series: &PriceSeries,
    dates: &[NaiveDate],
) -> Result<Vec<f64>, RotorError> {
    let (Some(&first), Some(&last)) = (dates.first(), dates.last()) else {
        return Err(RotorError::MissingReferenceData {
            symbol: series.symbol.clone(),
        });
    };
    let windowed = series.window(first, last);
    if windowed.is_empty() {
        return Err(RotorError::MissingReferenceData {
            symbol: series.symbol.clone(),
        });
    }
    Ok(windowed.daily_returns(dates))
}
