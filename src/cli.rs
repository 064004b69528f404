//! CLI definition and dispatch.

use chrono::{Days, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_data_adapter::CsvDataAdapter;
use crate::adapters::dashboard::DashboardReportAdapter;
use crate::adapters::export_adapter::ExportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::paper_broker_adapter::PaperBrokerAdapter;
use crate::domain::analytics::Metrics;
use crate::domain::config::{
    trading_days_to_calendar_days, LiveConfig, Lookback, SimulationConfig,
};
use crate::domain::config_validation::{validate_live_config, validate_simulation_config};
use crate::domain::decision;
use crate::domain::error::RotorError;
use crate::domain::indicator;
use crate::domain::orders::plan_rebalance;
use crate::domain::price_series::find_series;
use crate::domain::ranking;
use crate::domain::simulate::run_simulation;
use crate::domain::universe::{parse_symbols, validate_universe};
use crate::ports::broker_port::BrokerPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "rotor", about = "Momentum rotation simulator and signal generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the historical simulation and write the dashboard
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate the rotation rule as of a date and print target weights
    Signal {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        as_of: Option<String>,
        #[arg(long)]
        lookback: Option<String>,
        #[arg(long)]
        execute: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for configured symbols
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest { config, output } => run_backtest(&config, output.as_ref()),
        Command::Signal {
            config,
            as_of,
            lookback,
            execute,
        } => run_signal(&config, as_of.as_deref(), lookback.as_deref(), execute),
        Command::Validate { config } => run_validate(&config),
        Command::Info { config, symbol } => run_info(&config, symbol.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = RotorError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_backtest(config_path: &PathBuf, output_override: Option<&PathBuf>) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Validate simulation config
    if let Err(e) = validate_simulation_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 3: Build SimulationConfig
    let mut config = match build_simulation_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: Validate universe against the price files
    let prices_dir = match adapter.get_string("data", "prices_dir") {
        Some(dir) => dir,
        None => {
            let e = RotorError::ConfigMissing {
                section: "data".into(),
                key: "prices_dir".into(),
            };
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let data_port = CsvDataAdapter::new(PathBuf::from(&prices_dir));

    eprintln!(
        "Validating {} universe members in {}...",
        config.universe.len(),
        prices_dir
    );

    let validation = match validate_universe(
        &data_port,
        config.universe.clone(),
        config.warmup_start,
        config.end_date,
    ) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    config.universe = validation.symbols();
    let mut prices = validation.series;

    // Stage 5: Load the buy-and-hold reference series
    if find_series(&prices, &config.benchmark).is_none() {
        match data_port.close_series(&config.benchmark, config.warmup_start, config.end_date) {
            Ok(series) if !series.is_empty() => prices.push(series),
            Ok(_) => {
                let e = RotorError::NoData {
                    symbol: config.benchmark.clone(),
                };
                eprintln!("error: {e}");
                return (&e).into();
            }
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    // Stage 6: Run the simulation
    eprintln!(
        "Running simulation: {} members, {} to {}",
        config.universe.len(),
        config.start_date,
        config.end_date,
    );

    let result = match run_simulation(&prices, &config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "  {} trading days, {} rebalances",
        result.dates.len(),
        result.decisions.len(),
    );

    // Stage 7: Compute metrics for every series
    let metrics: Vec<(String, Metrics)> = result
        .all_series()
        .into_iter()
        .map(|(name, returns)| {
            (
                name.to_string(),
                Metrics::compute(&result.dates, returns, config.risk_free_rate),
            )
        })
        .collect();

    // Stage 8: Print console summary to stderr
    print_summary(&metrics);

    // Stage 9: Write the dashboard and data exports
    let output_dir = match output_override {
        Some(path) => path.clone(),
        None => PathBuf::from(
            adapter
                .get_string("report", "output_dir")
                .unwrap_or_else(|| "dashboard".to_string()),
        ),
    };

    let report = DashboardReportAdapter::new(adapter.get_string("report", "template_path"));
    let index_path = output_dir.join("index.html");
    let index_str = index_path.to_string_lossy();
    if let Err(e) = report.write(&result, &metrics, &config, &index_str) {
        eprintln!("error: failed to write dashboard: {e}");
        return (&e).into();
    }

    let exporter = ExportAdapter::new(output_dir);
    if let Err(e) = exporter.write_all(&result, &metrics, &config) {
        eprintln!("error: failed to write exports: {e}");
        return (&e).into();
    }

    eprintln!("\nDashboard written to: {}", index_path.display());
    ExitCode::SUCCESS
}

pub fn build_simulation_config(adapter: &dyn ConfigPort) -> Result<SimulationConfig, RotorError> {
    let start_str = adapter
        .get_string("simulation", "start_date")
        .ok_or_else(|| RotorError::ConfigMissing {
            section: "simulation".into(),
            key: "start_date".into(),
        })?;
    let end_str = adapter
        .get_string("simulation", "end_date")
        .ok_or_else(|| RotorError::ConfigMissing {
            section: "simulation".into(),
            key: "end_date".into(),
        })?;

    let start_date = parse_config_date(&start_str, "simulation", "start_date")?;
    let end_date = parse_config_date(&end_str, "simulation", "end_date")?;

    let warmup_start = match adapter.get_string("data", "warmup_start") {
        Some(s) => parse_config_date(&s, "data", "warmup_start")?,
        None => start_date,
    };

    let universe_str = adapter
        .get_string("strategy", "universe")
        .ok_or_else(|| RotorError::ConfigMissing {
            section: "strategy".into(),
            key: "universe".into(),
        })?;
    let universe = parse_symbols(&universe_str)?;

    let benchmark = adapter
        .get_string("simulation", "benchmark")
        .ok_or_else(|| RotorError::ConfigMissing {
            section: "simulation".into(),
            key: "benchmark".into(),
        })?
        .trim()
        .to_uppercase();

    let lookback_str = adapter
        .get_string("strategy", "momentum_lookback")
        .unwrap_or_else(|| "126d".to_string());
    let lookback = Lookback::parse(&lookback_str).map_err(|reason| RotorError::ConfigInvalid {
        section: "strategy".into(),
        key: "momentum_lookback".into(),
        reason,
    })?;

    Ok(SimulationConfig {
        universe,
        benchmark,
        warmup_start,
        start_date,
        end_date,
        lookback,
        sma_window: adapter.get_int("strategy", "sma_window", 135) as usize,
        top_n: adapter.get_int("strategy", "top_n", 3) as usize,
        cash_annual_rate: adapter.get_double("simulation", "cash_annual_return", 0.0),
        risk_free_rate: adapter.get_double("simulation", "risk_free_rate", 0.0),
    })
}

pub fn build_live_config(adapter: &dyn ConfigPort) -> LiveConfig {
    LiveConfig {
        equity: adapter.get_double("live", "equity", 0.0),
        positions_file: adapter.get_string("live", "positions_file"),
    }
}

fn parse_config_date(value: &str, section: &str, key: &str) -> Result<NaiveDate, RotorError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| RotorError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: "invalid date format (expected YYYY-MM-DD)".to_string(),
    })
}

fn print_summary(metrics: &[(String, Metrics)]) {
    let Some((_, strategy)) = metrics.first() else {
        return;
    };

    eprintln!("\n=== Strategy Performance ===");
    eprintln!("CAGR:             {}", fmt_pct(strategy.cagr));
    eprintln!("Volatility:       {}", fmt_pct(strategy.volatility));
    eprintln!("Sharpe Ratio:     {}", fmt_ratio(strategy.sharpe));
    eprintln!("Sortino Ratio:    {}", fmt_ratio(strategy.sortino));
    eprintln!("Calmar Ratio:     {}", fmt_ratio(strategy.calmar));
    eprintln!("Max Drawdown:     {}", fmt_pct(strategy.max_drawdown));
    eprintln!("Best Year:        {}", fmt_pct(strategy.best_year));
    eprintln!("Worst Year:       {}", fmt_pct(strategy.worst_year));
    eprintln!("Win Rate:         {}", fmt_pct(strategy.win_rate));

    if metrics.len() > 1 {
        eprintln!("\n=== Reference Series ===");
        for (name, m) in &metrics[1..] {
            eprintln!(
                "  {}: CAGR {}, Sharpe {}, MaxDD {}",
                name,
                fmt_pct(m.cagr),
                fmt_ratio(m.sharpe),
                fmt_pct(m.max_drawdown),
            );
        }
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "n/a".to_string(),
    }
}

fn fmt_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

fn fmt_price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

fn fmt_signed_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.2}%", v * 100.0),
        None => "n/a".to_string(),
    }
}

fn run_signal(
    config_path: &PathBuf,
    as_of_arg: Option<&str>,
    lookback_override: Option<&str>,
    execute: bool,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_simulation_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let mut config = match build_simulation_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if let Some(s) = lookback_override {
        config.lookback = match Lookback::parse(s) {
            Ok(l) => l,
            Err(reason) => {
                eprintln!("error: invalid --lookback: {reason}");
                return ExitCode::from(2);
            }
        };
    }

    let as_of_requested = match as_of_arg {
        Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(_) => {
                eprintln!("error: invalid --as-of date (expected YYYY-MM-DD)");
                return ExitCode::from(2);
            }
        },
        None => None,
    };

    let prices_dir = match adapter.get_string("data", "prices_dir") {
        Some(dir) => dir,
        None => {
            let e = RotorError::ConfigMissing {
                section: "data".into(),
                key: "prices_dir".into(),
            };
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let data_port = CsvDataAdapter::new(PathBuf::from(&prices_dir));

    // Stage 2: Resolve the as-of date (default: latest observation on file)
    let as_of = match as_of_requested {
        Some(d) => d,
        None => {
            let mut latest: Option<NaiveDate> = None;
            for symbol in &config.universe {
                if let Ok(Some((_, last, _))) = data_port.data_range(symbol) {
                    latest = Some(latest.map_or(last, |prev| prev.max(last)));
                }
            }
            match latest {
                Some(d) => d,
                None => {
                    let e = RotorError::EmptyUniverse;
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            }
        }
    };

    // Stage 3: Load the warm-start window
    let warm_days = config.lookback.warm_start_trading_days(config.sma_window);
    let calendar_days = trading_days_to_calendar_days(warm_days);
    let window_start = as_of
        .checked_sub_days(Days::new(calendar_days as u64))
        .unwrap_or(NaiveDate::MIN);

    eprintln!(
        "Evaluating signal as of {} (lookback {}, history from {})",
        as_of, config.lookback, window_start
    );

    let validation = match validate_universe(&data_port, config.universe.clone(), window_start, as_of)
    {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    config.universe = validation.symbols();
    let prices = validation.series;

    // Whole-universe history check; individual thin members are simply
    // ineligible, but when nobody can clear the trend window the signal
    // is meaningless.
    let required = config.sma_window + 1;
    let best = prices
        .iter()
        .map(|series| series.observations_up_to(as_of).len())
        .max()
        .unwrap_or(0);
    if best < required {
        let e = RotorError::InsufficientHistory {
            symbol: "universe".to_string(),
            observations: best,
            required,
        };
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 4: Evaluate the rotation rule
    let scores = ranking::score_universe(
        &prices,
        &config.universe,
        as_of,
        config.lookback,
        config.sma_window,
    );
    let target = decision::decide_from_scores(&config.universe, &scores, config.top_n, as_of);

    // Stage 5: Print the signal table, momentum descending
    let mut table: Vec<_> = scores.iter().collect();
    table.sort_by(|a, b| {
        b.momentum
            .partial_cmp(&a.momentum)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    eprintln!("\n=== Signal {} ===", as_of);
    for score in &table {
        let series = find_series(&prices, &score.symbol);
        let close = series.and_then(|s| s.price_on_or_before(as_of));
        let sma = series.and_then(|s| indicator::sma(s, as_of, config.sma_window));
        eprintln!(
            "  {:<6} close {:>9}  momentum {:>8}  sma {:>9}  trend {}",
            score.symbol,
            fmt_price(close),
            fmt_signed_pct(score.momentum),
            fmt_price(sma),
            if score.trend_pass { "Y" } else { "N" },
        );
    }

    if target.selected.is_empty() {
        eprintln!("\nSelected: none (no eligible members)");
    } else {
        eprintln!("\nSelected: {}", target.selected.join(", "));
    }

    eprintln!("\nTarget weights:");
    for symbol in &config.universe {
        eprintln!("  {:<6} {:>7.2}%", symbol, target.weight(symbol) * 100.0);
    }
    eprintln!("  {:<6} {:>7.2}%", "CASH", target.cash_weight * 100.0);

    if !execute {
        eprintln!("\nDry run: no orders submitted (pass --execute to trade)");
        return ExitCode::SUCCESS;
    }

    // Stage 6: Plan and submit orders
    if let Err(e) = validate_live_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let live = build_live_config(&adapter);

    let broker = match PaperBrokerAdapter::from_config(&live) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let equity = match broker.account_equity() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let positions = match broker.open_positions() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let orders = plan_rebalance(&target.weights, equity, &positions);
    if orders.is_empty() {
        eprintln!("\nNo orders needed");
        return ExitCode::SUCCESS;
    }

    eprintln!("\nSubmitting {} orders:", orders.len());
    for order in &orders {
        if let Err(e) = broker.submit(order) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_simulation_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let config = match build_simulation_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nParsed parameters:");
    eprintln!("  universe:          {}", config.universe.join(", "));
    eprintln!("  benchmark:         {}", config.benchmark);
    eprintln!(
        "  window:            {} to {}",
        config.start_date, config.end_date
    );
    eprintln!("  warmup from:       {}", config.warmup_start);
    eprintln!("  momentum lookback: {}", config.lookback);
    eprintln!("  sma window:        {}", config.sma_window);
    eprintln!("  top n:             {}", config.top_n);
    eprintln!("  cash rate:         {:.4}", config.cash_annual_rate);
    eprintln!("  risk-free rate:    {:.4}", config.risk_free_rate);

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_info(config_path: &PathBuf, symbol_override: Option<&str>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let prices_dir = match adapter.get_string("data", "prices_dir") {
        Some(dir) => dir,
        None => {
            let e = RotorError::ConfigMissing {
                section: "data".into(),
                key: "prices_dir".into(),
            };
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let data_port = CsvDataAdapter::new(PathBuf::from(&prices_dir));

    let symbols = resolve_symbols(symbol_override, &adapter);
    if symbols.is_empty() {
        eprintln!("error: no symbols configured");
        return ExitCode::from(2);
    }

    for symbol in &symbols {
        match data_port.data_range(symbol) {
            Ok(Some((first, last, count))) => {
                println!("{}: {} observations, {} to {}", symbol, count, first, last);
            }
            Ok(None) => {
                eprintln!("{}: no data found", symbol);
            }
            Err(e) => {
                eprintln!("error reading {}: {}", symbol, e);
            }
        }
    }
    ExitCode::SUCCESS
}

/// Universe members plus the benchmark, or just the override symbol.
pub fn resolve_symbols(symbol_override: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    if let Some(s) = symbol_override {
        return vec![s.trim().to_uppercase()];
    }

    let mut symbols: Vec<String> = match config.get_string("strategy", "universe") {
        Some(raw) => raw
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect(),
        None => Vec::new(),
    };

    if let Some(benchmark) = config.get_string("simulation", "benchmark") {
        let benchmark = benchmark.trim().to_uppercase();
        if !benchmark.is_empty() && !symbols.contains(&benchmark) {
            symbols.push(benchmark);
        }
    }

    symbols
}
