//! SVG line chart of portfolio value over time

use crate::error::Result;
use crate::projection::{SimulationResult, MONTHS_PER_YEAR};
use log::info;
use std::path::Path;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 400.0;
const PADDING: f64 = 56.0;
const STOCK_COLOR: &str = "#d62728";
const BOND_COLOR: &str = "#1f77b4";

/// Unit of the x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartAxis {
    Month,
    Year,
}

impl ChartAxis {
    fn label(self) -> &'static str {
        match self {
            ChartAxis::Month => "Month",
            ChartAxis::Year => "Year",
        }
    }
}

struct Series {
    label: &'static str,
    color: &'static str,
    /// Label every n-th point with its value
    label_every: usize,
    points: Vec<(u32, f64)>,
}

fn scale_x(t: u32, max_t: u32) -> f64 {
    if max_t == 0 {
        return PADDING;
    }
    PADDING + (t as f64 / max_t as f64) * (WIDTH - 2.0 * PADDING)
}

fn scale_y(value: f64, max_v: f64) -> f64 {
    if max_v <= 0.0 {
        return HEIGHT - PADDING;
    }
    HEIGHT - PADDING - (value / max_v) * (HEIGHT - 2.0 * PADDING)
}

/// Sample the time series at the chosen unit, values in thousands
///
/// Starts from the empty portfolio at t = 0.
fn sample(result: &SimulationResult, axis: ChartAxis) -> (Vec<(u32, f64)>, Vec<(u32, f64)>) {
    let mut stock = vec![(0, 0.0)];
    let mut bond = vec![(0, 0.0)];

    for row in &result.months {
        let t = match axis {
            ChartAxis::Month => row.month,
            ChartAxis::Year if row.month_in_year as usize == MONTHS_PER_YEAR => row.year,
            ChartAxis::Year => continue,
        };
        stock.push((t, row.stock_balance / 1000.0));
        bond.push((t, row.bond_balance / 1000.0));
    }

    (stock, bond)
}

/// Render the chart; the bond line is drawn only when `show_bond` is set
pub fn render_chart(result: &SimulationResult, axis: ChartAxis, show_bond: bool) -> String {
    let (stock, bond) = sample(result, axis);
    let mut series = vec![Series {
        label: "Stock",
        color: STOCK_COLOR,
        label_every: if axis == ChartAxis::Year { 1 } else { MONTHS_PER_YEAR },
        points: stock,
    }];
    if show_bond {
        series.push(Series {
            label: "Bond",
            color: BOND_COLOR,
            label_every: if axis == ChartAxis::Year { 5 } else { 5 * MONTHS_PER_YEAR },
            points: bond,
        });
    }

    let max_t = series[0].points.last().map(|(t, _)| *t).unwrap_or(0);
    let max_v = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(_, v)| *v))
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:#444}}</style>"#,
        w = WIDTH,
        h = HEIGHT
    );

    // Axes
    svg.push_str(&format!(
        r##"<line x1="{x0:.2}" y1="{y0:.2}" x2="{x1:.2}" y2="{y0:.2}" stroke="#000" stroke-width="1" />"##,
        x0 = PADDING,
        x1 = WIDTH - PADDING,
        y0 = HEIGHT - PADDING
    ));
    svg.push_str(&format!(
        r##"<line x1="{x0:.2}" y1="{y0:.2}" x2="{x0:.2}" y2="{y1:.2}" stroke="#000" stroke-width="1" />"##,
        x0 = PADDING,
        y0 = HEIGHT - PADDING,
        y1 = PADDING
    ));
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
        x = WIDTH / 2.0,
        y = HEIGHT - PADDING / 3.0,
        label = axis.label()
    ));
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" transform="rotate(-90 {x:.2} {y:.2})">Property (unit : k)</text>"#,
        x = PADDING / 3.0,
        y = HEIGHT / 2.0
    ));

    for (idx, s) in series.iter().enumerate() {
        let coords = s
            .points
            .iter()
            .filter(|(_, v)| v.is_finite())
            .map(|(t, v)| format!("{:.2},{:.2}", scale_x(*t, max_t), scale_y(*v, max_v)))
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!(
            r#"<polyline fill="none" stroke="{color}" stroke-width="1.5" points="{coords}" />"#,
            color = s.color,
            coords = coords
        ));

        for (t, v) in s.points.iter().filter(|(t, _)| *t as usize % s.label_every == 0) {
            svg.push_str(&format!(
                r#"<text x="{x:.2}" y="{y:.2}" text-anchor="start" font-size="9">{v:.2}K</text>"#,
                x = scale_x(*t, max_t) + 2.0,
                y = scale_y(*v, max_v) - 3.0,
                v = v
            ));
        }

        // Legend
        let ly = PADDING + 14.0 + 16.0 * idx as f64;
        svg.push_str(&format!(
            r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="1.5" />"#,
            x1 = PADDING + 10.0,
            x2 = PADDING + 30.0,
            y = ly - 4.0,
            color = s.color
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="start">{label}</text>"#,
            x = PADDING + 36.0,
            y = ly,
            label = s.label
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Render and write the chart to `path`
pub fn write_chart<P: AsRef<Path>>(
    path: P,
    result: &SimulationResult,
    axis: ChartAxis,
    show_bond: bool,
) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, render_chart(result, axis, show_bond))?;
    info!("Chart written to {}", path.display());
    Ok(())
}
