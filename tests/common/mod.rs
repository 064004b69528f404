#![allow(dead_code)]

use chrono::{Datelike, NaiveDate};
use rotor::domain::config::{Lookback, SimulationConfig};
use rotor::domain::error::RotorError;
use rotor::domain::price_series::{PricePoint, PriceSeries};
use rotor::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub series: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_points(mut self, symbol: &str, points: Vec<PricePoint>) -> Self {
        self.series.insert(symbol.to_string(), points);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn close_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, RotorError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(RotorError::Data {
                reason: reason.clone(),
            });
        }
        let points: Vec<PricePoint> = self
            .series
            .get(symbol)
            .map(|points| {
                points
                    .iter()
                    .copied()
                    .filter(|p| p.date >= start_date && p.date <= end_date)
                    .collect()
            })
            .unwrap_or_default();
        Ok(PriceSeries::new(symbol.to_string(), points))
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, RotorError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(RotorError::Data {
                reason: reason.clone(),
            });
        }
        match self.series.get(symbol) {
            Some(points) if !points.is_empty() => {
                let min = points.iter().map(|p| p.date).min().unwrap();
                let max = points.iter().map(|p| p.date).max().unwrap();
                Ok(Some((min, max, points.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn point(date_str: &str, close: f64) -> PricePoint {
    PricePoint {
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        close,
    }
}

pub fn make_series(symbol: &str, points: Vec<PricePoint>) -> PriceSeries {
    PriceSeries::new(symbol.to_string(), points)
}

/// Weekday-only points starting at `start_date`, close stepped by `step`
/// per trading day.
pub fn generate_points(
    start_date: &str,
    count: usize,
    start_price: f64,
    step: f64,
) -> Vec<PricePoint> {
    let mut points = Vec::with_capacity(count);
    let mut day = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    let mut close = start_price;
    while points.len() < count {
        if day.weekday().number_from_monday() <= 5 {
            points.push(PricePoint { date: day, close });
            close += step;
        }
        day = day.succ_opt().unwrap();
    }
    points
}

/// Weekday-only points carrying the given closes in order.
pub fn points_from_closes(start_date: &str, closes: &[f64]) -> Vec<PricePoint> {
    let mut points = Vec::with_capacity(closes.len());
    let mut day = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    for &close in closes {
        while day.weekday().number_from_monday() > 5 {
            day = day.succ_opt().unwrap();
        }
        points.push(PricePoint { date: day, close });
        day = day.succ_opt().unwrap();
    }
    points
}

/// Weekday-only points compounding at `daily_ret` per trading day.
pub fn generate_compound_points(
    start_date: &str,
    count: usize,
    start_price: f64,
    daily_ret: f64,
) -> Vec<PricePoint> {
    let mut points = Vec::with_capacity(count);
    let mut day = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    let mut close = start_price;
    while points.len() < count {
        if day.weekday().number_from_monday() <= 5 {
            points.push(PricePoint { date: day, close });
            close *= 1.0 + daily_ret;
        }
        day = day.succ_opt().unwrap();
    }
    points
}

/// Small windows so short hand-built histories clear the eligibility gate.
pub fn sample_config() -> SimulationConfig {
    SimulationConfig {
        universe: vec!["AAA".to_string(), "BBB".to_string(), "CCC".to_string()],
        benchmark: "BNCH".to_string(),
        warmup_start: date(2024, 1, 1),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        lookback: Lookback::TradingDays(5),
        sma_window: 5,
        top_n: 2,
        cash_annual_rate: 0.0,
        risk_free_rate: 0.0,
    }
}
