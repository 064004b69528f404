//! Inline SVG chart rendering for the dashboard.

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 260.0;
const PADDING: f64 = 40.0;

/// Line colors, assigned to series in display order.
const SERIES_COLORS: [&str; 4] = ["#2563eb", "#9ca3af", "#f59e0b", "#10b981"];

/// Renders every series as a polyline on a shared scale. Series may have
/// different lengths; each spans the full plot width.
pub fn multi_line_chart(series: &[(&str, &[f64])]) -> String {
    let has_points = series.iter().any(|(_, values)| !values.is_empty());
    if !has_points {
        return "<p>No chart data available.</p>".to_string();
    }

    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for (_, values) in series {
        for &v in *values {
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }
    }

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;
    let range = max_v - min_v;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };

    let mut svg = format!(
        r#"<svg viewBox="0 0 {WIDTH:.0} {HEIGHT:.0}" xmlns="http://www.w3.org/2000/svg">"#
    );
    svg.push('\n');
    svg.push_str(&format!(
        r##"  <line x1="{left:.1}" y1="{top:.1}" x2="{left:.1}" y2="{bottom:.1}" stroke="#9ca3af" stroke-width="1"/>"##,
        left = PADDING,
        top = PADDING,
        bottom = HEIGHT - PADDING
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r##"  <line x1="{left:.1}" y1="{bottom:.1}" x2="{right:.1}" y2="{bottom:.1}" stroke="#9ca3af" stroke-width="1"/>"##,
        left = PADDING,
        right = WIDTH - PADDING,
        bottom = HEIGHT - PADDING
    ));
    svg.push('\n');

    for (i, &(name, values)) in series.iter().enumerate() {
        let color = SERIES_COLORS[i % SERIES_COLORS.len()];

        if !values.is_empty() {
            let scale_x = if values.len() > 1 {
                plot_width / (values.len() - 1) as f64
            } else {
                0.0
            };
            let points: Vec<String> = values
                .iter()
                .enumerate()
                .map(|(j, v)| {
                    let x = PADDING + j as f64 * scale_x;
                    let y = HEIGHT - PADDING - (v - min_v) * scale_y;
                    format!("{:.1},{:.1}", x, y)
                })
                .collect();
            svg.push_str(&format!(
                r#"  <polyline fill="none" stroke="{}" stroke-width="1.5" points="{}"/>"#,
                color,
                points.join(" ")
            ));
            svg.push('\n');
        }

        let legend_x = PADDING + i as f64 * 130.0;
        svg.push_str(&format!(
            r##"  <rect x="{x:.1}" y="10" width="10" height="10" fill="{color}"/><text x="{tx:.1}" y="19" font-size="11" fill="#374151">{name}</text>"##,
            x = legend_x,
            tx = legend_x + 14.0,
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>");
    svg
}
