//! File exports accompanying the dashboard.
//!
//! Writes the daily return and drawdown series, the per-series metric
//! summary, the decision log and the run metadata into the output
//! directory. Everything a downstream notebook needs without re-running
//! the simulation.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::analytics::{self, Metrics};
use crate::domain::config::SimulationConfig;
use crate::domain::error::RotorError;
use crate::domain::simulate::SimulationResult;

pub struct ExportAdapter {
    output_dir: PathBuf,
}

/// Run parameters recorded next to the data files.
#[derive(Debug, Serialize)]
pub struct RunMetadata {
    pub warmup_start: chrono::NaiveDate,
    pub sim_start: chrono::NaiveDate,
    pub sim_end: chrono::NaiveDate,
    pub universe: Vec<String>,
    pub benchmarks: Vec<String>,
    pub momentum_lookback: String,
    pub sma_window_days: usize,
    pub top_n: usize,
    pub cash_annual_return: f64,
}

impl RunMetadata {
    pub fn from_config(config: &SimulationConfig) -> Self {
        RunMetadata {
            warmup_start: config.warmup_start,
            sim_start: config.start_date,
            sim_end: config.end_date,
            universe: config.universe.clone(),
            benchmarks: vec!["EqualWeight".to_string(), config.benchmark.clone()],
            momentum_lookback: config.lookback.to_string(),
            sma_window_days: config.sma_window,
            top_n: config.top_n,
            cash_annual_return: config.cash_annual_rate,
        }
    }
}

impl ExportAdapter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn write_all(
        &self,
        result: &SimulationResult,
        metrics: &[(String, Metrics)],
        config: &SimulationConfig,
    ) -> Result<(), RotorError> {
        fs::create_dir_all(&self.output_dir)?;
        self.write_series_csv("returns.csv", result, |returns| returns.to_vec())?;
        self.write_series_csv("drawdowns.csv", result, |returns| {
            analytics::drawdown_series(returns)
        })?;
        self.write_metrics_csv(metrics)?;
        self.write_decisions_json(result)?;
        self.write_metadata_json(config)?;
        Ok(())
    }

    /// Date column plus one column per series, rows aligned to the
    /// simulation dates. `transform` maps a return series to the exported
    /// values.
    fn write_series_csv(
        &self,
        filename: &str,
        result: &SimulationResult,
        transform: impl Fn(&[f64]) -> Vec<f64>,
    ) -> Result<(), RotorError> {
        let path = self.output_dir.join(filename);
        let mut writer = csv::Writer::from_path(&path).map_err(|e| RotorError::Data {
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;

        let series = result.all_series();
        let mut header = vec!["Date".to_string()];
        header.extend(series.iter().map(|(name, _)| name.to_string()));
        writer.write_record(&header).map_err(|e| RotorError::Data {
            reason: format!("failed to write {}: {}", path.display(), e),
        })?;

        let columns: Vec<Vec<f64>> = series
            .iter()
            .map(|&(_, returns)| transform(returns))
            .collect();

        for (i, date) in result.dates.iter().enumerate() {
            let mut row = vec![date.to_string()];
            for column in &columns {
                row.push(column.get(i).map(|v| v.to_string()).unwrap_or_default());
            }
            writer.write_record(&row).map_err(|e| RotorError::Data {
                reason: format!("failed to write {}: {}", path.display(), e),
            })?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_metrics_csv(&self, metrics: &[(String, Metrics)]) -> Result<(), RotorError> {
        let path = self.output_dir.join("metrics.csv");
        let mut writer = csv::Writer::from_path(&path).map_err(|e| RotorError::Data {
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;

        let header = [
            "Series",
            "CAGR",
            "Volatility",
            "Sharpe",
            "Sortino",
            "Calmar",
            "MaxDrawdown",
            "BestYear",
            "WorstYear",
            "WinRate",
        ];
        writer.write_record(header).map_err(|e| RotorError::Data {
            reason: format!("failed to write {}: {}", path.display(), e),
        })?;

        for (name, m) in metrics {
            let row = [
                name.clone(),
                cell(m.cagr),
                cell(m.volatility),
                cell(m.sharpe),
                cell(m.sortino),
                cell(m.calmar),
                cell(m.max_drawdown),
                cell(m.best_year),
                cell(m.worst_year),
                cell(m.win_rate),
            ];
            writer.write_record(&row).map_err(|e| RotorError::Data {
                reason: format!("failed to write {}: {}", path.display(), e),
            })?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_decisions_json(&self, result: &SimulationResult) -> Result<(), RotorError> {
        let json =
            serde_json::to_string_pretty(&result.decisions).map_err(|e| RotorError::Data {
                reason: format!("failed to serialize decisions: {}", e),
            })?;
        fs::write(self.output_dir.join("decisions.json"), json)?;
        Ok(())
    }

    fn write_metadata_json(&self, config: &SimulationConfig) -> Result<(), RotorError> {
        let metadata = RunMetadata::from_config(config);
        let json = serde_json::to_string_pretty(&metadata).map_err(|e| RotorError::Data {
            reason: format!("failed to serialize metadata: {}", e),
        })?;
        fs::write(self.output_dir.join("metadata.json"), json)?;
        Ok(())
    }
}

/// Empty cell for unavailable statistics.
fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
