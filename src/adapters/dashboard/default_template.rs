//! Built-in dashboard template.
//!
//! A single self-contained HTML page with `{{PLACEHOLDER}}` markers. No
//! scripts; charts are inline SVG and tables are plain HTML.

pub fn template() -> &'static str {
    DEFAULT_TEMPLATE
}

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{TITLE}}</title>
<style>
  body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 2rem auto; max-width: 960px; padding: 0 1rem; color: #111827; }
  h1 { font-size: 1.6rem; margin-bottom: 0.25rem; }
  h2 { font-size: 1.15rem; margin-top: 2rem; border-bottom: 1px solid #e5e7eb; padding-bottom: 0.3rem; }
  .period { color: #6b7280; margin-top: 0; }
  table { border-collapse: collapse; font-size: 0.85rem; margin-top: 0.5rem; }
  th, td { border: 1px solid #e5e7eb; padding: 4px 8px; text-align: right; white-space: nowrap; }
  th:first-child, td:first-child { text-align: left; }
  tr:nth-child(even) { background: #f9fafb; }
  .cards { display: flex; gap: 1rem; margin-top: 1rem; }
  .card { border: 1px solid #e5e7eb; border-radius: 8px; padding: 1rem; flex: 1; text-align: center; }
  .card-value { font-size: 1.4rem; font-weight: 600; }
  .card-label { color: #6b7280; font-size: 0.8rem; margin-top: 0.25rem; }
  .scroll { overflow-x: auto; }
  .methodology { color: #6b7280; font-size: 0.8rem; margin-top: 2.5rem; }
  svg { max-width: 100%; height: auto; margin-top: 0.5rem; }
</style>
</head>
<body>
<h1>{{TITLE}}</h1>
<p class="period">{{PERIOD}}</p>

{{HEADLINE_CARDS}}

<h2>Performance Summary</h2>
<div class="scroll">
{{SUMMARY_TABLE}}
</div>

<h2>Equity Curves</h2>
{{EQUITY_CHART}}

<h2>Drawdowns</h2>
{{DRAWDOWN_CHART}}

<h2>Calendar Year Returns</h2>
{{YEARLY_TABLE}}

<h2>Monthly Returns</h2>
<div class="scroll">
{{MONTHLY_TABLE}}
</div>

<h2>Holdings by Rebalance</h2>
<div class="scroll">
{{HOLDINGS_TABLE}}
</div>

<h2>Rebalance Log</h2>
<div class="scroll">
{{REBALANCE_LOG}}
</div>

{{METHODOLOGY}}
</body>
</html>
"#;
