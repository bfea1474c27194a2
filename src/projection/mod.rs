//! Projection engine: monthly factor generation and portfolio simulation

mod engine;
mod factors;
mod state;
mod timeline;

pub use engine::{
    PortfolioSimulator, SimulationConfig, DEFAULT_ANNUAL_BONUS, DEFAULT_BOND_ANNUAL_RATE,
    DEFAULT_MONTHLY_CONTRIBUTION, DEFAULT_YEARS,
};
pub use factors::{
    generate_monthly_factors, MonthlyFactorGenerator, MonthlyFactorSet, DEFAULT_FACTOR_RATIO,
    DEFAULT_MAX_ITER, MIN_NORMAL_MONTHS, MONTHS_PER_YEAR, WIDE_BAND,
};
pub use state::PortfolioState;
pub use timeline::{MonthRow, SimulationResult, SimulationSummary, YearSummary};
