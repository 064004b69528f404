//! Unified trading timeline and the monthly rebalance schedule.

use crate::domain::price_series::PriceSeries;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Ascending union of every observation date across the loaded series.
pub fn build_unified_timeline(series: &[PriceSeries]) -> Vec<NaiveDate> {
    let unique_dates: BTreeSet<NaiveDate> = series
        .iter()
        .flat_map(|s| s.points().iter().map(|p| p.date))
        .collect();
    unique_dates.into_iter().collect()
}

/// Last trading date of each calendar month within [start, end].
///
/// Derived from the timeline alone, so a month with no trading dates in the
/// window simply has no rebalance.
pub fn monthly_rebalance_dates(
    timeline: &[NaiveDate],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = Vec::new();
    for &date in timeline.iter().filter(|&&dt| dt >= start && dt <= end) {
        match dates.last_mut() {
            Some(last) if (last.year(), last.month()) == (date.year(), date.month()) => {
                *last = date;
            }
            _ => dates.push(date),
        }
    }
    dates
}
