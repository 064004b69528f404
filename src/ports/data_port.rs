//! Price data access port trait.

use crate::domain::error::RotorError;
use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;

pub trait DataPort {
    /// Daily closes for one symbol within `[start_date, end_date]`, ascending
    /// by date. An empty series means the symbol exists but has no
    /// observations in range.
    fn close_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, RotorError>;

    /// First date, last date and observation count across all stored data,
    /// or `None` if the symbol is unknown.
    fn data_range(&self, symbol: &str) -> Result<Option<(NaiveDate, NaiveDate, usize)>, RotorError>;
}
