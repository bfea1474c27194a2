//! Core simulation engine for monthly contribution projections

use super::factors::{
    validate_ratio, MonthlyFactorGenerator, MonthlyFactorSet, DEFAULT_FACTOR_RATIO,
    DEFAULT_MAX_ITER, MONTHS_PER_YEAR,
};
use super::state::PortfolioState;
use super::timeline::{MonthRow, SimulationResult, YearSummary};
use crate::error::{ProjectionError, Result};
use crate::returns::AnnualReturnSeries;
use log::{debug, info, trace};
use rand::Rng;

/// Default amount invested every month
pub const DEFAULT_MONTHLY_CONTRIBUTION: f64 = 40_000.0;

/// Default bonus invested in the last month of each year
pub const DEFAULT_ANNUAL_BONUS: f64 = 140_000.0;

/// Default investment horizon in years
pub const DEFAULT_YEARS: u32 = 15;

/// Default fixed bond yield, paid once a year
pub const DEFAULT_BOND_ANNUAL_RATE: f64 = 0.04;

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Amount contributed every month
    pub monthly_contribution: f64,

    /// Extra contribution added in month 12 of each year
    pub annual_bonus: f64,

    /// Fraction of each contribution directed to stock; the rest goes to bond
    pub stock_ratio: f64,

    /// Investment horizon
    pub years: u32,

    /// Fixed bond yield applied to each year's bond contributions
    pub bond_annual_rate: f64,

    /// Tight band half-width for generated monthly factors
    pub factor_ratio: f64,

    /// Attempt budget for each year's factor search
    pub max_search_iterations: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            monthly_contribution: DEFAULT_MONTHLY_CONTRIBUTION,
            annual_bonus: DEFAULT_ANNUAL_BONUS,
            stock_ratio: 1.0,
            years: DEFAULT_YEARS,
            bond_annual_rate: DEFAULT_BOND_ANNUAL_RATE,
            factor_ratio: DEFAULT_FACTOR_RATIO,
            max_search_iterations: DEFAULT_MAX_ITER,
        }
    }
}

impl SimulationConfig {
    /// Reject configurations the simulation loop cannot run
    pub fn validate(&self) -> Result<()> {
        if self.years == 0 {
            return Err(ProjectionError::invalid("investment horizon must be at least one year"));
        }
        if !(0.0..=1.0).contains(&self.stock_ratio) {
            return Err(ProjectionError::invalid(format!(
                "stock ratio must be in [0, 1], got {}",
                self.stock_ratio
            )));
        }
        for (name, value) in [
            ("monthly contribution", self.monthly_contribution),
            ("annual bonus", self.annual_bonus),
            ("bond annual rate", self.bond_annual_rate),
        ] {
            if !value.is_finite() {
                return Err(ProjectionError::invalid(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        validate_ratio(self.factor_ratio)
    }

    pub fn generator(&self) -> MonthlyFactorGenerator {
        MonthlyFactorGenerator::new(self.factor_ratio, self.max_search_iterations)
    }

    /// Funds injected in month `j` (0-based) of a year
    pub fn funds_for_month(&self, j: usize) -> f64 {
        if j == MONTHS_PER_YEAR - 1 {
            self.monthly_contribution + self.annual_bonus
        } else {
            self.monthly_contribution
        }
    }
}

/// Main simulation engine
#[derive(Debug, Clone)]
pub struct PortfolioSimulator {
    series: AnnualReturnSeries,
    config: SimulationConfig,
}

impl PortfolioSimulator {
    /// Create a simulator; fails fast on invalid configuration
    pub fn new(series: AnnualReturnSeries, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { series, config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn series(&self) -> &AnnualReturnSeries {
        &self.series
    }

    /// Run the projection, drawing each year's monthly path from `rng`
    ///
    /// Any factor search failure aborts the run; no partial result is returned.
    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SimulationResult> {
        let generator = self.config.generator();
        let mut result = SimulationResult::new();
        let mut state = PortfolioState::new();

        info!(
            "Simulating {} years: {:.2}/month, bonus {:.2}, stock ratio {:.2}",
            self.config.years,
            self.config.monthly_contribution,
            self.config.annual_bonus,
            self.config.stock_ratio
        );

        for year_index in 0..self.config.years as usize {
            let annual_return = self.series.rate_for_year(year_index);
            let factors = generator.generate(rng, 1.0 + annual_return)?;
            self.run_year(&mut state, &mut result, year_index, annual_return, &factors);
        }

        info!("Final property: {:.2}", state.total_property());
        Ok(result)
    }

    /// Replay a fixed monthly path, one factor set per year
    pub fn simulate_path(&self, path: &[MonthlyFactorSet]) -> Result<SimulationResult> {
        if path.len() != self.config.years as usize {
            return Err(ProjectionError::invalid(format!(
                "factor path covers {} years but horizon is {}",
                path.len(),
                self.config.years
            )));
        }

        let mut result = SimulationResult::new();
        let mut state = PortfolioState::new();

        for (year_index, factors) in path.iter().enumerate() {
            let annual_return = factors.product() - 1.0;
            self.run_year(&mut state, &mut result, year_index, annual_return, factors);
        }

        Ok(result)
    }

    /// Apply one year of contributions, growth and bond settlement
    fn run_year(
        &self,
        state: &mut PortfolioState,
        result: &mut SimulationResult,
        year_index: usize,
        annual_return: f64,
        factors: &MonthlyFactorSet,
    ) {
        let year = year_index as u32 + 1;
        let mut bond_interest = 0.0;

        state.begin_year();

        for j in 0..MONTHS_PER_YEAR {
            let funds = self.config.funds_for_month(j);
            let stock_factor = factors.factor(j);
            state.apply_month(funds, self.config.stock_ratio, stock_factor);

            // Bond interest is paid once, at the close of the year
            if j == MONTHS_PER_YEAR - 1 {
                bond_interest = state.settle_bond_interest(self.config.bond_annual_rate);
            }

            let row = MonthRow {
                month: (year_index * MONTHS_PER_YEAR + j) as u32 + 1,
                year,
                month_in_year: j as u32 + 1,
                contribution: funds,
                stock_factor,
                stock_balance: state.stock_balance,
                bond_balance: state.bond_balance,
            };
            trace!(
                "Month {}: stock {:.2}, bond {:.2}",
                row.month,
                row.stock_balance,
                row.bond_balance
            );
            result.add_month(row);
        }

        let years_elapsed = year as f64;
        let total_roi = state.total_roi();
        let stock_cumulative_return = state.cumulative_stock_return_rate - 1.0;

        let summary = YearSummary {
            year,
            annual_return,
            stock_balance: state.stock_balance,
            bond_balance: state.bond_balance,
            total_property: state.total_property(),
            total_contributed: state.total_contributed,
            total_roi,
            annualized_roi: total_roi / years_elapsed,
            stock_cumulative_return,
            stock_annualized_return: stock_cumulative_return / years_elapsed,
            bond_interest,
        };
        debug!(
            "Year {}: property {:.2}, ROI {:.4}",
            summary.year, summary.total_property, summary.total_roi
        );
        result.add_year(summary);
    }
}
