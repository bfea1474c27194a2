//! Portfolio Projection - Monthly-contribution stock/bond growth projections
//!
//! This library provides:
//! - Historical annual return series loading
//! - Monthly factor generation by constrained rejection sampling
//! - Monthly portfolio simulation with annual bond settlement
//! - Multi-seed scenario runs
//! - Text, CSV and SVG reporting

pub mod error;
pub mod returns;
pub mod projection;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use returns::AnnualReturnSeries;
pub use projection::{
    generate_monthly_factors, MonthlyFactorGenerator, MonthlyFactorSet, PortfolioSimulator,
    SimulationConfig, SimulationResult,
};
pub use scenario::ScenarioRunner;
