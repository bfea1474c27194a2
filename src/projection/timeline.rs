//! Time series output structures for simulations

use serde::{Deserialize, Serialize};

/// One simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    /// Absolute month index (1-based)
    pub month: u32,
    /// Projection year (1-based)
    pub year: u32,
    /// Month within the year (1-12)
    pub month_in_year: u32,
    pub contribution: f64,
    pub stock_factor: f64,
    pub stock_balance: f64,
    /// End-of-month bond balance; month 12 includes the settled interest
    pub bond_balance: f64,
}

/// Metrics recorded at the end of each projection year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    /// Annual stock return drawn from the historical series
    pub annual_return: f64,
    pub stock_balance: f64,
    pub bond_balance: f64,
    pub total_property: f64,
    pub total_contributed: f64,
    pub total_roi: f64,
    pub annualized_roi: f64,
    pub stock_cumulative_return: f64,
    pub stock_annualized_return: f64,
    pub bond_interest: f64,
}

/// Complete simulation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub months: Vec<MonthRow>,
    pub years: Vec<YearSummary>,
}

impl SimulationResult {
    pub fn new() -> Self {
        Self {
            months: Vec::new(),
            years: Vec::new(),
        }
    }

    pub fn add_month(&mut self, row: MonthRow) {
        self.months.push(row);
    }

    pub fn add_year(&mut self, summary: YearSummary) {
        self.years.push(summary);
    }

    /// Ending metrics of the run
    pub fn summary(&self) -> SimulationSummary {
        let last = self.years.last();
        let total_bond_interest: f64 = self.years.iter().map(|y| y.bond_interest).sum();

        SimulationSummary {
            years: self.years.len() as u32,
            months: self.months.len() as u32,
            final_stock_balance: last.map(|y| y.stock_balance).unwrap_or(0.0),
            final_bond_balance: last.map(|y| y.bond_balance).unwrap_or(0.0),
            final_property: last.map(|y| y.total_property).unwrap_or(0.0),
            total_contributed: last.map(|y| y.total_contributed).unwrap_or(0.0),
            total_roi: last.map(|y| y.total_roi).unwrap_or(0.0),
            annualized_roi: last.map(|y| y.annualized_roi).unwrap_or(0.0),
            stock_cumulative_return: last.map(|y| y.stock_cumulative_return).unwrap_or(0.0),
            stock_annualized_return: last.map(|y| y.stock_annualized_return).unwrap_or(0.0),
            total_bond_interest,
        }
    }
}

impl Default for SimulationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub years: u32,
    pub months: u32,
    pub final_stock_balance: f64,
    pub final_bond_balance: f64,
    pub final_property: f64,
    pub total_contributed: f64,
    pub total_roi: f64,
    pub annualized_roi: f64,
    pub stock_cumulative_return: f64,
    pub stock_annualized_return: f64,
    pub total_bond_interest: f64,
}
