//! Simulation and live-trading parameters.

use chrono::NaiveDate;

/// Momentum lookback convention.
///
/// The rotation rule is the same under both: only the "price N ago" lookup
/// differs. Trading-day lookbacks count an asset's own observations;
/// calendar-month lookbacks step the as-of date back and take the most
/// recent close at or before the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    TradingDays(usize),
    CalendarMonths(u32),
}

impl Lookback {
    /// Accepts `"126d"`, `"6m"`, or a bare integer (trading days).
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let (digits, unit) = match s.strip_suffix('d') {
            Some(rest) => (rest, Some('d')),
            None => match s.strip_suffix('m') {
                Some(rest) => (rest, Some('m')),
                None => (s, None),
            },
        };
        let n: u32 = digits
            .trim()
            .parse()
            .map_err(|_| format!("unrecognized lookback '{s}' (expected e.g. 126d or 6m)"))?;
        if n == 0 {
            return Err("lookback must be at least 1".to_string());
        }
        match unit {
            Some('m') => Ok(Lookback::CalendarMonths(n)),
            _ => Ok(Lookback::TradingDays(n as usize)),
        }
    }

    /// Observations an asset needs before it can be ranked.
    ///
    /// Calendar-month lookbacks only need the trend window up front; whether
    /// the momentum endpoints resolve is checked per date.
    pub fn min_observations(&self, sma_window: usize) -> usize {
        match self {
            Lookback::TradingDays(n) => (n + 1).max(sma_window),
            Lookback::CalendarMonths(_) => sma_window,
        }
    }

    /// Trading days of history needed ahead of the first decision.
    pub fn warm_start_trading_days(&self, sma_window: usize) -> usize {
        match self {
            Lookback::TradingDays(n) => (n + 1).max(sma_window),
            // a generous 25 trading days per month covers short months
            Lookback::CalendarMonths(m) => (*m as usize * 25).max(sma_window),
        }
    }
}

impl std::fmt::Display for Lookback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookback::TradingDays(n) => write!(f, "{n}d"),
            Lookback::CalendarMonths(m) => write!(f, "{m}m"),
        }
    }
}

/// Calendar days covering `trading_days` of market history, with room for
/// weekends and holidays.
pub fn trading_days_to_calendar_days(trading_days: usize) -> usize {
    (trading_days * 7).div_ceil(5) + 21
}

/// Immutable parameters for one simulation run. Passed into every engine
/// entry point; nothing is read from process-wide state.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub universe: Vec<String>,
    pub benchmark: String,
    /// History before `start_date` feeds indicators only; no output rows.
    pub warmup_start: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub lookback: Lookback,
    pub sma_window: usize,
    pub top_n: usize,
    pub cash_annual_rate: f64,
    pub risk_free_rate: f64,
}

impl SimulationConfig {
    /// Daily cash accrual, geometric.
    pub fn cash_daily_rate(&self) -> f64 {
        (1.0 + self.cash_annual_rate).powf(1.0 / 252.0) - 1.0
    }
}

/// Paper-trading account parameters.
#[derive(Debug, Clone)]
pub struct LiveConfig {
    pub equity: f64,
    pub positions_file: Option<String>,
}
