//! CSV file data adapter.
//!
//! Reads one `{SYMBOL}.csv` per symbol from the prices directory. The
//! `date` and `close` columns are located by header name, so files exported
//! with full OHLCV layouts load without reshaping.

use crate::domain::error::RotorError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_points(&self, symbol: &str) -> Result<Vec<PricePoint>, RotorError> {
        let path = self.csv_path(symbol);
        if !path.exists() {
            return Err(RotorError::NoData {
                symbol: symbol.to_string(),
            });
        }
        let content = fs::read_to_string(&path).map_err(|e| RotorError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| RotorError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?
            .clone();
        let date_idx = column_index(&headers, "date").ok_or_else(|| RotorError::Data {
            reason: format!("{}: missing date column", path.display()),
        })?;
        let close_idx = column_index(&headers, "close").ok_or_else(|| RotorError::Data {
            reason: format!("{}: missing close column", path.display()),
        })?;

        let mut points = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| RotorError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = record.get(date_idx).unwrap_or("");
            let date =
                NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
                    RotorError::Data {
                        reason: format!("{}: invalid date '{}'", path.display(), date_str),
                    }
                })?;

            let close_str = record.get(close_idx).unwrap_or("");
            let close: f64 = close_str.trim().parse().map_err(|_| RotorError::Data {
                reason: format!("{}: invalid close '{}'", path.display(), close_str),
            })?;

            points.push(PricePoint { date, close });
        }

        Ok(points)
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

impl DataPort for CsvDataAdapter {
    fn close_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, RotorError> {
        let mut points = self.read_points(symbol)?;
        points.retain(|p| p.date >= start_date && p.date <= end_date);
        Ok(PriceSeries::new(symbol.to_string(), points))
    }

    fn data_range(&self, symbol: &str) -> Result<Option<(NaiveDate, NaiveDate, usize)>, RotorError> {
        if !self.csv_path(symbol).exists() {
            return Ok(None);
        }
        let series = PriceSeries::new(symbol.to_string(), self.read_points(symbol)?);
        Ok(series
            .first_date()
            .zip(series.last_date())
            .map(|(first, last)| (first, last, series.len())))
    }
}
