//! Line-oriented text report

use crate::projection::{SimulationConfig, SimulationSummary, YearSummary};
use crate::scenario::ScenarioSummary;
use std::fmt::Write;

fn pct(value: f64) -> f64 {
    value * 100.0
}

/// One report line for a completed year
pub fn format_year_line(year: &YearSummary) -> String {
    format!(
        "Year {:>3} | market {:>8.2}% | property {:>16.2} | ROI {:>9.4}% | annualized ROI {:>8.4}% | stock {:>9.4}% ({:>8.4}%/yr)",
        year.year,
        pct(year.annual_return),
        year.total_property,
        pct(year.total_roi),
        pct(year.annualized_roi),
        pct(year.stock_cumulative_return),
        pct(year.stock_annualized_return),
    )
}

/// Final summary block
pub fn format_summary(summary: &SimulationSummary, config: &SimulationConfig) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "Summary ({} years, {} months):", summary.years, summary.months);
    let _ = writeln!(out, "  Monthly Investment: {:.2}", config.monthly_contribution);
    let _ = writeln!(out, "  Annual Bonus: {:.2}", config.annual_bonus);
    let _ = writeln!(out, "  Stock Ratio: {:.2}", config.stock_ratio);
    let _ = writeln!(out, "  Total Invested: {:.2}", summary.total_contributed);
    let _ = writeln!(out, "  Final Stock: {:.2}", summary.final_stock_balance);
    let _ = writeln!(out, "  Final Bond: {:.2}", summary.final_bond_balance);
    let _ = writeln!(out, "  Bond Interest Paid: {:.2}", summary.total_bond_interest);
    let _ = writeln!(out, "  Total Property: {:.2}", summary.final_property);
    let _ = writeln!(out, "  Total ROI: {:.4}%", pct(summary.total_roi));
    let _ = writeln!(out, "  Annualized ROI: {:.4}%", pct(summary.annualized_roi));
    let _ = writeln!(
        out,
        "  Stock Total Return Rate: {:.4}%",
        pct(summary.stock_cumulative_return)
    );
    let _ = write!(
        out,
        "  Stock Annualized Rate of Return: {:.4}%",
        pct(summary.stock_annualized_return)
    );
    out
}

/// Distribution block for a multi-trial run
pub fn format_scenario(summary: &ScenarioSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Scenario Summary ({} trials):", summary.trials);
    let _ = writeln!(out, "  Mean Total Property: {:.2}", summary.mean_final_property);
    let _ = writeln!(out, "  Mean Total ROI: {:.4}%", pct(summary.mean_total_roi));
    for (p, value) in &summary.percentiles {
        let _ = writeln!(out, "  P{:<2}: {:.2}", p, value);
    }
    let _ = write!(
        out,
        "  Best seed: {}  Worst seed: {}",
        summary.best_seed, summary.worst_seed
    );
    out
}
