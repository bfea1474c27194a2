//! Presentation of simulation results: text report, CSV export, SVG chart

mod chart;
mod export;
mod text;

pub use chart::{render_chart, write_chart, ChartAxis};
pub use export::{write_months, write_months_csv};
pub use text::{format_scenario, format_summary, format_year_line};
