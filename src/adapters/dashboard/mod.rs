//! HTML dashboard generation.
//!
//! Orchestrates placeholder resolution: reads a template (the built-in
//! default or a custom file via `template_path`), resolves all
//! `{{PLACEHOLDER}}` markers by calling helpers from `chart_svg` and
//! `tables`, and writes the final `index.html`.

pub mod chart_svg;
pub mod default_template;
pub mod tables;

use std::fs;
use std::path::Path;

use crate::domain::analytics::{self, Metrics};
use crate::domain::config::SimulationConfig;
use crate::domain::error::RotorError;
use crate::domain::simulate::SimulationResult;
use crate::ports::report_port::ReportPort;

/// Context for resolving template placeholders.
pub struct ReportContext<'a> {
    pub result: &'a SimulationResult,
    pub metrics: &'a [(String, Metrics)],
    pub config: &'a SimulationConfig,
}

/// Resolve all `{{PLACEHOLDER}}`s in the given template string and return
/// the final HTML ready to be written to disk.
pub fn resolve(template: &str, ctx: &ReportContext) -> String {
    let mut output = template.to_string();

    output = output.replace("{{TITLE}}", "Momentum Rotation Dashboard");
    output = output.replace(
        "{{PERIOD}}",
        &format!("{} to {}", ctx.config.start_date, ctx.config.end_date),
    );

    let headline = ctx
        .metrics
        .first()
        .map(|(_, m)| tables::render_headline_cards(m))
        .unwrap_or_default();
    output = output.replace("{{HEADLINE_CARDS}}", &headline);

    output = output.replace(
        "{{SUMMARY_TABLE}}",
        &tables::render_summary_table(ctx.metrics),
    );

    let all = ctx.result.all_series();

    let equity: Vec<(&str, Vec<f64>)> = all
        .iter()
        .map(|&(name, returns)| (name, analytics::equity_curve(returns)))
        .collect();
    let equity_refs: Vec<(&str, &[f64])> =
        equity.iter().map(|(n, v)| (*n, v.as_slice())).collect();
    output = output.replace("{{EQUITY_CHART}}", &chart_svg::multi_line_chart(&equity_refs));

    let drawdowns: Vec<(&str, Vec<f64>)> = all
        .iter()
        .map(|&(name, returns)| (name, analytics::drawdown_series(returns)))
        .collect();
    let drawdown_refs: Vec<(&str, &[f64])> =
        drawdowns.iter().map(|(n, v)| (*n, v.as_slice())).collect();
    output = output.replace(
        "{{DRAWDOWN_CHART}}",
        &chart_svg::multi_line_chart(&drawdown_refs),
    );

    output = output.replace(
        "{{YEARLY_TABLE}}",
        &tables::render_yearly_table(&ctx.result.dates, &all),
    );
    output = output.replace(
        "{{MONTHLY_TABLE}}",
        &tables::render_monthly_table(&ctx.result.dates, &ctx.result.strategy_returns),
    );
    output = output.replace(
        "{{HOLDINGS_TABLE}}",
        &tables::render_holdings_table(&ctx.result.decisions, &ctx.config.universe),
    );
    output = output.replace(
        "{{REBALANCE_LOG}}",
        &tables::render_rebalance_log(
            &ctx.result.decisions,
            &ctx.config.universe,
            ctx.config.top_n,
        ),
    );
    output = output.replace("{{METHODOLOGY}}", &tables::render_methodology(ctx.config));

    output
}

pub struct DashboardReportAdapter {
    template_path: Option<String>,
}

impl DashboardReportAdapter {
    pub fn new(template_path: Option<String>) -> Self {
        Self { template_path }
    }

    fn template(&self) -> Result<String, RotorError> {
        match &self.template_path {
            Some(path) => Ok(fs::read_to_string(path)?),
            None => Ok(default_template::template().to_string()),
        }
    }
}

impl ReportPort for DashboardReportAdapter {
    fn write(
        &self,
        result: &SimulationResult,
        metrics: &[(String, Metrics)],
        config: &SimulationConfig,
        output_path: &str,
    ) -> Result<(), RotorError> {
        let template = self.template()?;
        let ctx = ReportContext {
            result,
            metrics,
            config,
        };
        let html = resolve(&template, &ctx);

        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, html)?;
        Ok(())
    }
}
