//! Per-asset close price series with point-in-time lookups.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Date-ordered closes for one symbol. Gaps are permitted; every lookup
/// sees only observations at or before the requested date.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Points are sorted by date; duplicate dates keep the first occurrence.
    pub fn new(symbol: String, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Self { symbol, points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Close on exactly `date`, if the symbol traded that day.
    pub fn price_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].close)
    }

    /// Most recent close at or before `date`.
    pub fn price_on_or_before(&self, date: NaiveDate) -> Option<f64> {
        let idx = self.points.partition_point(|p| p.date <= date);
        if idx == 0 {
            None
        } else {
            Some(self.points[idx - 1].close)
        }
    }

    /// All observations dated at or before `date`.
    pub fn observations_up_to(&self, date: NaiveDate) -> &[PricePoint] {
        let idx = self.points.partition_point(|p| p.date <= date);
        &self.points[..idx]
    }

    /// Daily percent change aligned to an ascending `timeline`, with closes
    /// carried forward across dates the symbol did not trade. Days at or
    /// before the first observation yield 0.
    pub fn daily_returns(&self, timeline: &[NaiveDate]) -> Vec<f64> {
        let mut returns = Vec::with_capacity(timeline.len());
        let mut next = 0;
        let mut prev_close: Option<f64> = None;
        for &date in timeline {
            while next < self.points.len() && self.points[next].date <= date {
                next += 1;
            }
            let close = if next == 0 {
                None
            } else {
                Some(self.points[next - 1].close)
            };
            let ret = match (prev_close, close) {
                (Some(prev), Some(cur)) if prev != 0.0 => cur / prev - 1.0,
                _ => 0.0,
            };
            returns.push(ret);
            prev_close = close;
        }
        returns
    }

    /// Copy of the series restricted to observations within [start, end].
    pub fn window(&self, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        let points = self
            .points
            .iter()
            .copied()
            .filter(|p| p.date >= start && p.date <= end)
            .collect();
        PriceSeries {
            symbol: self.symbol.clone(),
            points,
        }
    }
}

pub fn find_series<'a>(series: &'a [PriceSeries], symbol: &str) -> Option<&'a PriceSeries> {
    series.iter().find(|s| s.symbol == symbol)
}
