//! Historical annual return series

mod loader;

pub use loader::{load_default_series, load_series, load_series_from_reader, DEFAULT_RETURNS_PATH};

use crate::error::{ProjectionError, Result};

/// Ordered historical annual returns as fractions (0.08 = 8%)
///
/// Indexed cyclically: a projection longer than the series wraps back to
/// the first observation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualReturnSeries {
    rates: Vec<f64>,
}

impl AnnualReturnSeries {
    /// Build a series from annual return fractions
    pub fn new(rates: Vec<f64>) -> Result<Self> {
        if rates.is_empty() {
            return Err(ProjectionError::invalid("annual return series is empty"));
        }
        if let Some((idx, rate)) = rates.iter().enumerate().find(|(_, r)| !r.is_finite()) {
            return Err(ProjectionError::invalid(format!(
                "annual return at row {} is not finite ({})",
                idx + 1,
                rate
            )));
        }
        // Growth factor 1 + r must stay positive
        if let Some((idx, rate)) = rates.iter().enumerate().find(|(_, r)| **r <= -1.0) {
            return Err(ProjectionError::invalid(format!(
                "annual return at row {} loses the whole portfolio ({})",
                idx + 1,
                rate
            )));
        }
        Ok(Self { rates })
    }

    /// Build a series from percentage values (8.2 = 8.2%)
    pub fn from_percentages(percentages: &[f64]) -> Result<Self> {
        Self::new(percentages.iter().map(|p| p / 100.0).collect())
    }

    /// Annual return for a zero-based projection year
    pub fn rate_for_year(&self, year_index: usize) -> f64 {
        self.rates[year_index % self.rates.len()]
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Always false; empty series are rejected at construction
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Arithmetic mean of the annual returns
    pub fn mean(&self) -> f64 {
        self.rates.iter().sum::<f64>() / self.rates.len() as f64
    }
}
