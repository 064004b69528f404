//! Report rendering port trait.

use crate::domain::analytics::Metrics;
use crate::domain::config::SimulationConfig;
use crate::domain::error::RotorError;
use crate::domain::simulate::SimulationResult;

/// Port for writing the simulation dashboard.
pub trait ReportPort {
    /// Renders the result into `output_path`. `metrics` carries one summary
    /// row per series, in display order (strategy first).
    fn write(
        &self,
        result: &SimulationResult,
        metrics: &[(String, Metrics)],
        config: &SimulationConfig,
        output_path: &str,
    ) -> Result<(), RotorError>;
}
