//! Trailing momentum and the SMA trend filter.
//!
//! momentum(n) = price(as_of) / price(as_of - n) - 1
//! trend pass  = price(as_of) > mean of trailing `window` closes
//!
//! Both are point-in-time: only observations dated at or before `as_of` are
//! visible. `None` means the asset cannot be scored on that date, not an
//! error.

use crate::domain::config::Lookback;
use crate::domain::price_series::PriceSeries;
use chrono::{Months, NaiveDate};

pub fn momentum(series: &PriceSeries, as_of: NaiveDate, lookback: Lookback) -> Option<f64> {
    match lookback {
        Lookback::TradingDays(n) => trading_day_momentum(series, as_of, n),
        Lookback::CalendarMonths(m) => calendar_month_momentum(series, as_of, m),
    }
}

/// Counts back over the asset's own observations, skipping dates it did not
/// trade. Needs `days + 1` observations.
fn trading_day_momentum(series: &PriceSeries, as_of: NaiveDate, days: usize) -> Option<f64> {
    let obs = series.observations_up_to(as_of);
    if obs.len() < days + 1 {
        return None;
    }
    let current = obs[obs.len() - 1].close;
    let past = obs[obs.len() - 1 - days].close;
    if past == 0.0 {
        return None;
    }
    Some(current / past - 1.0)
}

/// Steps the as-of date back by whole months (day-of-month clamped) and takes
/// the most recent close at or before each endpoint.
fn calendar_month_momentum(series: &PriceSeries, as_of: NaiveDate, months: u32) -> Option<f64> {
    let current = series.price_on_or_before(as_of)?;
    let target = as_of.checked_sub_months(Months::new(months))?;
    let past = series.price_on_or_before(target)?;
    if past == 0.0 {
        return None;
    }
    Some(current / past - 1.0)
}

/// Mean of the trailing `window` closes ending at `as_of`.
pub fn sma(series: &PriceSeries, as_of: NaiveDate, window: usize) -> Option<f64> {
    let obs = series.observations_up_to(as_of);
    if window == 0 || obs.len() < window {
        return None;
    }
    let sum: f64 = obs[obs.len() - window..].iter().map(|p| p.close).sum();
    Some(sum / window as f64)
}

/// Strict comparison: a close sitting exactly on its SMA does not pass.
pub fn trend_pass(series: &PriceSeries, as_of: NaiveDate, window: usize) -> Option<bool> {
    let current = series.price_on_or_before(as_of)?;
    let mean = sma(series, as_of, window)?;
    Some(current > mean)
}
