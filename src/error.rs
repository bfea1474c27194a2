//! Error types for projection runs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("Monthly factor search exhausted: no conforming set for target factor {target} with band {ratio} after {attempts} attempts")]
    SearchExhausted { target: f64, ratio: f64, attempts: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ProjectionError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ProjectionError::InvalidConfiguration(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
