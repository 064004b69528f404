//! Performance analytics over daily return series.
//!
//! Pure functions of a return slice. A statistic whose denominator
//! degenerates (zero dispersion, no losing days, zero drawdown) is `None`,
//! never coerced to 0; tables and exports render it as "not available".

use chrono::{Datelike, NaiveDate};

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Cumulative product of (1 + r). The first element is 1 + r[0].
pub fn equity_curve(returns: &[f64]) -> Vec<f64> {
    let mut equity = Vec::with_capacity(returns.len());
    let mut acc = 1.0;
    for r in returns {
        acc *= 1.0 + r;
        equity.push(acc);
    }
    equity
}

/// Decline from the running equity peak, per day. Zero at the series start,
/// never positive.
pub fn drawdown_series(returns: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(returns.len());
    let mut acc = 1.0;
    let mut peak = f64::MIN;
    for r in returns {
        acc *= 1.0 + r;
        if acc > peak {
            peak = acc;
        }
        out.push(acc / peak - 1.0);
    }
    out
}

pub fn annualized_return(returns: &[f64]) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    let total: f64 = returns.iter().map(|r| 1.0 + r).product();
    Some(total.powf(TRADING_DAYS_PER_YEAR / returns.len() as f64) - 1.0)
}

pub fn annualized_volatility(returns: &[f64]) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    Some(population_std(returns) * TRADING_DAYS_PER_YEAR.sqrt())
}

pub fn sharpe_ratio(returns: &[f64], risk_free_annual: f64) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    let rf_daily = daily_risk_free(risk_free_annual);
    let excess: Vec<f64> = returns.iter().map(|r| r - rf_daily).collect();
    let denom = population_std(&excess);
    if denom == 0.0 {
        return None;
    }
    let mean = excess.iter().sum::<f64>() / excess.len() as f64;
    Some(mean / denom * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Like Sharpe, but the denominator is the root mean square of only the
/// negative excess returns. A series with no losing days has no downside
/// deviation to divide by.
pub fn sortino_ratio(returns: &[f64], risk_free_annual: f64) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    let rf_daily = daily_risk_free(risk_free_annual);
    let excess: Vec<f64> = returns.iter().map(|r| r - rf_daily).collect();
    let downside: Vec<f64> = excess.iter().copied().filter(|&e| e < 0.0).collect();
    if downside.is_empty() {
        return None;
    }
    let downside_dev =
        (downside.iter().map(|e| e * e).sum::<f64>() / downside.len() as f64).sqrt();
    if downside_dev == 0.0 {
        return None;
    }
    let mean = excess.iter().sum::<f64>() / excess.len() as f64;
    Some(mean / downside_dev * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Most negative drawdown over the series. Always <= 0.
pub fn max_drawdown(returns: &[f64]) -> Option<f64> {
    drawdown_series(returns)
        .into_iter()
        .reduce(f64::min)
}

pub fn calmar_ratio(returns: &[f64]) -> Option<f64> {
    let mdd = max_drawdown(returns)?.abs();
    if mdd == 0.0 {
        return None;
    }
    Some(annualized_return(returns)? / mdd)
}

/// Share of days with a strictly positive return.
pub fn win_rate(returns: &[f64]) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    let wins = returns.iter().filter(|&&r| r > 0.0).count();
    Some(wins as f64 / returns.len() as f64)
}

/// Compounded return per calendar year, in date order.
pub fn yearly_returns(dates: &[NaiveDate], returns: &[f64]) -> Vec<(i32, f64)> {
    let mut out: Vec<(i32, f64)> = Vec::new();
    for (date, r) in dates.iter().zip(returns) {
        match out.last_mut() {
            Some((year, acc)) if *year == date.year() => *acc *= 1.0 + r,
            _ => out.push((date.year(), 1.0 + r)),
        }
    }
    for (_, acc) in &mut out {
        *acc -= 1.0;
    }
    out
}

/// Compounded return per (year, month), in date order.
pub fn monthly_returns(dates: &[NaiveDate], returns: &[f64]) -> Vec<((i32, u32), f64)> {
    let mut out: Vec<((i32, u32), f64)> = Vec::new();
    for (date, r) in dates.iter().zip(returns) {
        let key = (date.year(), date.month());
        match out.last_mut() {
            Some((k, acc)) if *k == key => *acc *= 1.0 + r,
            _ => out.push((key, 1.0 + r)),
        }
    }
    for (_, acc) in &mut out {
        *acc -= 1.0;
    }
    out
}

/// The summary row computed for each return series.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub cagr: Option<f64>,
    pub volatility: Option<f64>,
    pub sharpe: Option<f64>,
    pub sortino: Option<f64>,
    pub calmar: Option<f64>,
    pub max_drawdown: Option<f64>,
    pub best_year: Option<f64>,
    pub worst_year: Option<f64>,
    pub win_rate: Option<f64>,
}

impl Metrics {
    pub fn compute(dates: &[NaiveDate], returns: &[f64], risk_free_annual: f64) -> Self {
        let yearly = yearly_returns(dates, returns);
        Metrics {
            cagr: annualized_return(returns),
            volatility: annualized_volatility(returns),
            sharpe: sharpe_ratio(returns, risk_free_annual),
            sortino: sortino_ratio(returns, risk_free_annual),
            calmar: calmar_ratio(returns),
            max_drawdown: max_drawdown(returns),
            best_year: yearly.iter().map(|&(_, r)| r).reduce(f64::max),
            worst_year: yearly.iter().map(|&(_, r)| r).reduce(f64::min),
            win_rate: win_rate(returns),
        }
    }
}

fn population_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}

/// Geometric daily equivalent of an annual rate.
fn daily_risk_free(annual: f64) -> f64 {
    (1.0 + annual).powf(1.0 / TRADING_DAYS_PER_YEAR) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates_from(start: (i32, u32, u32), n: usize) -> Vec<NaiveDate> {
        let first = NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap();
        (0..n)
            .map(|i| first + chrono::Duration::days(i as i64))
            .collect()
    }

    #[test]
    fn equity_curve_compounds() {
        let eq = equity_curve(&[0.10, -0.50, 0.20]);
        assert!((eq[0] - 1.10).abs() < 1e-12);
        assert!((eq[1] - 0.55).abs() < 1e-12);
        assert!((eq[2] - 0.66).abs() < 1e-12);
    }

    #[test]
    fn drawdown_starts_at_zero_and_stays_non_positive() {
        let dd = drawdown_series(&[0.10, -0.50, 0.20]);
        assert!((dd[0] - 0.0).abs() < f64::EPSILON);
        assert!(dd.iter().all(|&v| v <= 0.0));
        assert!((dd[1] - (-0.50)).abs() < 1e-12);
        assert!((dd[2] - (0.66 / 1.10 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn max_drawdown_finds_the_trough() {
        let mdd = max_drawdown(&[0.10, -0.20, 0.05]).unwrap();
        assert!((mdd - (-0.20)).abs() < 1e-12);
    }

    #[test]
    fn max_drawdown_empty_is_unavailable() {
        assert!(max_drawdown(&[]).is_none());
    }

    #[test]
    fn annualized_return_of_flat_series_is_zero() {
        let r = annualized_return(&[0.0; 10]).unwrap();
        assert!((r - 0.0).abs() < 1e-12);
    }

    #[test]
    fn annualized_return_compounds_one_year() {
        let daily = (1.0_f64 + 0.10).powf(1.0 / 252.0) - 1.0;
        let returns = vec![daily; 252];
        let r = annualized_return(&returns).unwrap();
        assert!((r - 0.10).abs() < 1e-9);
    }

    #[test]
    fn volatility_of_constant_series_is_zero() {
        let v = annualized_volatility(&[0.01; 20]).unwrap();
        assert!((v - 0.0).abs() < 1e-12);
    }

    #[test]
    fn sharpe_unavailable_for_zero_dispersion() {
        // a return series pinned at zero has no excess dispersion
        assert!(sharpe_ratio(&[0.0; 50], 0.0).is_none());
    }

    #[test]
    fn sharpe_unavailable_when_returns_match_the_risk_free_rate() {
        let rf_daily = (1.0_f64 + 0.03).powf(1.0 / 252.0) - 1.0;
        assert!(sharpe_ratio(&vec![rf_daily; 50], 0.03).is_none());
    }

    #[test]
    fn sharpe_positive_for_steady_gains() {
        let returns = vec![0.001, 0.002, 0.0005, 0.0015, 0.001];
        assert!(sharpe_ratio(&returns, 0.0).unwrap() > 0.0);
    }

    #[test]
    fn sortino_unavailable_without_losing_days() {
        assert!(sortino_ratio(&[0.01, 0.02, 0.0, 0.03], 0.0).is_none());
        assert!(sortino_ratio(&[0.0; 50], 0.0).is_none());
    }

    #[test]
    fn sortino_divides_by_downside_only() {
        let returns = [0.02, -0.01, 0.03, -0.02];
        let mean = returns.iter().sum::<f64>() / 4.0;
        let downside_dev = ((0.01_f64.powi(2) + 0.02_f64.powi(2)) / 2.0).sqrt();
        let expected = mean / downside_dev * 252.0_f64.sqrt();
        let got = sortino_ratio(&returns, 0.0).unwrap();
        assert!((got - expected).abs() < 1e-9);
    }

    #[test]
    fn calmar_unavailable_without_drawdown() {
        assert!(calmar_ratio(&[0.01, 0.02, 0.03]).is_none());
    }

    #[test]
    fn calmar_relates_growth_to_drawdown() {
        let returns = [0.10, -0.20, 0.05];
        let expected = annualized_return(&returns).unwrap() / 0.20;
        let got = calmar_ratio(&returns).unwrap();
        assert!((got - expected).abs() < 1e-9);
    }

    #[test]
    fn win_rate_counts_strictly_positive_days() {
        let w = win_rate(&[0.01, -0.01, 0.0, 0.02]).unwrap();
        assert!((w - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn yearly_returns_group_by_calendar_year() {
        let mut dates = dates_from((2023, 12, 30), 4); // spans the new year
        dates.push(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let returns = [0.01, 0.01, 0.02, 0.02, 0.02];
        let yearly = yearly_returns(&dates, &returns);

        assert_eq!(yearly.len(), 2);
        assert_eq!(yearly[0].0, 2023);
        assert!((yearly[0].1 - (1.01_f64 * 1.01 - 1.0)).abs() < 1e-12);
        assert_eq!(yearly[1].0, 2024);
        assert!((yearly[1].1 - (1.02_f64.powi(3) - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn monthly_returns_group_by_year_and_month() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2024, 1, 30).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        ];
        let monthly = monthly_returns(&dates, &[0.01, 0.01, 0.05]);

        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].0, (2024, 1));
        assert!((monthly[0].1 - (1.01_f64 * 1.01 - 1.0)).abs() < 1e-12);
        assert_eq!(monthly[1].0, (2024, 2));
        assert!((monthly[1].1 - 0.05).abs() < 1e-12);
    }

    #[test]
    fn metrics_compute_flags_unavailable_statistics() {
        let dates = dates_from((2024, 1, 1), 50);
        let metrics = Metrics::compute(&dates, &[0.0; 50], 0.0);

        assert_eq!(metrics.sharpe, None);
        assert_eq!(metrics.sortino, None);
        assert_eq!(metrics.calmar, None);
        assert_eq!(metrics.cagr, Some(0.0));
        assert_eq!(metrics.max_drawdown, Some(0.0));
        assert_eq!(metrics.win_rate, Some(0.0));
    }

    #[test]
    fn metrics_compute_best_and_worst_year() {
        let mut dates = dates_from((2023, 12, 29), 2);
        dates.push(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let metrics = Metrics::compute(&dates, &[0.05, 0.05, -0.02], 0.0);

        assert!((metrics.best_year.unwrap() - (1.05_f64 * 1.05 - 1.0)).abs() < 1e-12);
        assert!((metrics.worst_year.unwrap() - (-0.02)).abs() < 1e-12);
    }
}
