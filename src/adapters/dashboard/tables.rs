//! HTML table rendering for the dashboard.
//!
//! Hand-rendered tables: summary metrics per series, calendar-year and
//! monthly return grids, the holdings timeline and the rebalance log.

use crate::domain::analytics::{self, Metrics};
use crate::domain::config::SimulationConfig;
use crate::domain::decision::RebalanceDecision;
use chrono::NaiveDate;
use std::collections::BTreeMap;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Two-decimal percent, or an em dash for unavailable values.
pub fn to_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "—".to_string(),
    }
}

pub fn to_num(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "—".to_string(),
    }
}

pub fn render_headline_cards(strategy_metrics: &Metrics) -> String {
    let cards = [
        ("CAGR", to_pct(strategy_metrics.cagr)),
        ("Max Drawdown", to_pct(strategy_metrics.max_drawdown)),
        ("Sharpe", to_num(strategy_metrics.sharpe)),
        ("Sortino", to_num(strategy_metrics.sortino)),
    ];

    let mut out = String::from("<div class=\"cards\">\n");
    for (label, value) in cards {
        out.push_str(&format!(
            "  <div class=\"card\"><div class=\"card-value\">{}</div><div class=\"card-label\">{}</div></div>\n",
            value, label
        ));
    }
    out.push_str("</div>\n");
    out
}

pub fn render_summary_table(rows: &[(String, Metrics)]) -> String {
    let mut out = String::from(
        "<table>\n  <tr><th>Series</th><th>CAGR</th><th>Volatility</th><th>Sharpe</th>\
         <th>Sortino</th><th>Calmar</th><th>Max Drawdown</th><th>Best Year</th>\
         <th>Worst Year</th><th>Win Rate</th></tr>\n",
    );
    for (name, m) in rows {
        out.push_str(&format!(
            "  <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            name,
            to_pct(m.cagr),
            to_pct(m.volatility),
            to_num(m.sharpe),
            to_num(m.sortino),
            to_num(m.calmar),
            to_pct(m.max_drawdown),
            to_pct(m.best_year),
            to_pct(m.worst_year),
            to_pct(m.win_rate),
        ));
    }
    out.push_str("</table>\n");
    out
}

/// One row per calendar year, one column per series.
pub fn render_yearly_table(dates: &[NaiveDate], series: &[(&str, &[f64])]) -> String {
    let per_series: Vec<(&str, BTreeMap<i32, f64>)> = series
        .iter()
        .map(|&(name, returns)| {
            (
                name,
                analytics::yearly_returns(dates, returns).into_iter().collect(),
            )
        })
        .collect();

    let mut years: Vec<i32> = per_series
        .iter()
        .flat_map(|(_, yearly)| yearly.keys().copied())
        .collect();
    years.sort_unstable();
    years.dedup();

    if years.is_empty() {
        return "<p>No data in window.</p>\n".to_string();
    }

    let mut out = String::from("<table>\n  <tr><th>Year</th>");
    for (name, _) in &per_series {
        out.push_str(&format!("<th>{}</th>", name));
    }
    out.push_str("</tr>\n");

    for year in years {
        out.push_str(&format!("  <tr><td>{}</td>", year));
        for (_, yearly) in &per_series {
            out.push_str(&format!("<td>{}</td>", to_pct(yearly.get(&year).copied())));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

/// Year rows by Jan..Dec columns for a single return series.
pub fn render_monthly_table(dates: &[NaiveDate], returns: &[f64]) -> String {
    let monthly: BTreeMap<(i32, u32), f64> = analytics::monthly_returns(dates, returns)
        .into_iter()
        .collect();
    if monthly.is_empty() {
        return "<p>No data in window.</p>\n".to_string();
    }

    let min_year = monthly.keys().map(|k| k.0).min().unwrap_or(0);
    let max_year = monthly.keys().map(|k| k.0).max().unwrap_or(0);

    let mut out = String::from("<table>\n  <tr><th>Year</th>");
    for label in MONTH_LABELS {
        out.push_str(&format!("<th>{}</th>", label));
    }
    out.push_str("</tr>\n");

    for year in min_year..=max_year {
        out.push_str(&format!("  <tr><td>{}</td>", year));
        for month in 1..=12u32 {
            out.push_str(&format!(
                "<td>{}</td>",
                to_pct(monthly.get(&(year, month)).copied())
            ));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

/// One row per rebalance date: adopted weight per universe member plus cash.
pub fn render_holdings_table(decisions: &[RebalanceDecision], universe: &[String]) -> String {
    if decisions.is_empty() {
        return "<p>No rebalances in window.</p>\n".to_string();
    }

    let mut out = String::from("<table>\n  <tr><th>Date</th>");
    for symbol in universe {
        out.push_str(&format!("<th>{}</th>", symbol));
    }
    out.push_str("<th>CASH</th></tr>\n");

    for decision in decisions {
        out.push_str(&format!("  <tr><td>{}</td>", decision.date));
        for symbol in universe {
            out.push_str(&format!("<td>{}</td>", to_pct(Some(decision.weight(symbol)))));
        }
        out.push_str(&format!(
            "<td>{}</td></tr>\n",
            to_pct(Some(decision.cash_weight))
        ));
    }
    out.push_str("</table>\n");
    out
}

/// Selections, cash sleeve count, and per-member momentum and trend flags
/// for each rebalance.
pub fn render_rebalance_log(
    decisions: &[RebalanceDecision],
    universe: &[String],
    top_n: usize,
) -> String {
    if decisions.is_empty() {
        return "<p>No rebalances in window.</p>\n".to_string();
    }

    let mut out = String::from("<table>\n  <tr><th>Date</th>");
    for i in 1..=top_n {
        out.push_str(&format!("<th>Top{}</th>", i));
    }
    out.push_str("<th>Cash Sleeves</th>");
    for symbol in universe {
        out.push_str(&format!("<th>Mom {}</th>", symbol));
    }
    for symbol in universe {
        out.push_str(&format!("<th>Trend {}</th>", symbol));
    }
    out.push_str("</tr>\n");

    for decision in decisions {
        out.push_str(&format!("  <tr><td>{}</td>", decision.date));
        for i in 0..top_n {
            out.push_str(&format!(
                "<td>{}</td>",
                decision.selected.get(i).map(String::as_str).unwrap_or("")
            ));
        }
        out.push_str(&format!("<td>{}</td>", decision.cash_sleeve_count(top_n)));
        for symbol in universe {
            out.push_str(&format!(
                "<td>{}</td>",
                to_pct(decision.momentum.get(symbol).copied().flatten())
            ));
        }
        for symbol in universe {
            let flag = if decision.trend_pass.get(symbol).copied().unwrap_or(false) {
                "Y"
            } else {
                "N"
            };
            out.push_str(&format!("<td>{}</td>", flag));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

pub fn render_methodology(config: &SimulationConfig) -> String {
    format!(
        "<p class=\"methodology\">Universe {universe}; monthly rebalance on the last trading \
         date of each month, {start} to {end}. Momentum lookback {lookback}, trend filter \
         close &gt; SMA({sma}), top {top_n} ranked sleeves at {sleeve:.2}% each. Sleeves \
         failing the trend filter and unfilled sleeves stay in cash accruing {cash:.2}% \
         annually.</p>\n",
        universe = config.universe.join(", "),
        start = config.start_date,
        end = config.end_date,
        lookback = config.lookback,
        sma = config.sma_window,
        top_n = config.top_n,
        sleeve = 100.0 / config.top_n as f64,
        cash = config.cash_annual_rate * 100.0,
    )
}
