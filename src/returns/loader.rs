//! Load annual returns from a CSV table
//!
//! The table carries a `Rate` column in percentage units; any other
//! columns (e.g. `Year`) are ignored.

use super::AnnualReturnSeries;
use crate::error::{ProjectionError, Result};
use csv::Reader;
use log::info;
use std::path::Path;

/// Default location of the historical return table
pub const DEFAULT_RETURNS_PATH: &str = "data/annual_returns.csv";

/// Raw CSV row; only the rate column is read
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Rate")]
    rate: f64,
}

fn collect_rates<R: std::io::Read>(mut reader: Reader<R>) -> Result<AnnualReturnSeries> {
    let mut percentages = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        percentages.push(row.rate);
    }

    if percentages.is_empty() {
        return Err(ProjectionError::invalid("return table contains no rows"));
    }

    AnnualReturnSeries::from_percentages(&percentages)
}

/// Load an annual return series from a CSV file
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<AnnualReturnSeries> {
    let path = path.as_ref();
    let series = collect_rates(Reader::from_path(path)?)?;
    info!("Loaded {} annual returns from {}", series.len(), path.display());
    Ok(series)
}

/// Load an annual return series from any reader (e.g., string buffer)
pub fn load_series_from_reader<R: std::io::Read>(reader: R) -> Result<AnnualReturnSeries> {
    collect_rates(Reader::from_reader(reader))
}

/// Load the series from the default data/annual_returns.csv location
pub fn load_default_series() -> Result<AnnualReturnSeries> {
    load_series(DEFAULT_RETURNS_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_load_from_reader() {
        let data = "Year,Rate\n2019,31.49\n2020,18.40\n2021,28.71\n2022,-18.11\n";
        let series = load_series_from_reader(data.as_bytes()).unwrap();

        assert_eq!(series.len(), 4);
        assert_relative_eq!(series.rates()[0], 0.3149);
        assert_relative_eq!(series.rates()[3], -0.1811);
    }

    #[test]
    fn test_header_only_is_invalid() {
        let err = load_series_from_reader("Rate\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_non_numeric_rate_is_csv_error() {
        let err = load_series_from_reader("Rate\nabc\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ProjectionError::Csv(_)));
    }

    #[test]
    fn test_load_default_series() {
        let series = load_default_series().expect("Failed to load default returns");
        assert!(series.len() >= 30);
        assert!(series.rates().iter().all(|r| r.abs() < 1.0));
    }
}
