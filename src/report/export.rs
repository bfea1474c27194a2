//! CSV export of the monthly time series

use crate::error::Result;
use crate::projection::MonthRow;
use csv::Writer;
use log::info;
use std::path::Path;

/// Write monthly rows (with header) to any writer
pub fn write_months<W: std::io::Write>(writer: W, rows: &[MonthRow]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write monthly rows to a CSV file
pub fn write_months_csv<P: AsRef<Path>>(path: P, rows: &[MonthRow]) -> Result<()> {
    let path = path.as_ref();
    write_months(std::fs::File::create(path)?, rows)?;
    info!("Wrote {} monthly rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows() {
        let rows = vec![MonthRow {
            month: 1,
            year: 1,
            month_in_year: 1,
            contribution: 100.0,
            stock_factor: 1.01,
            stock_balance: 101.0,
            bond_balance: 0.0,
        }];
        let mut buf = Vec::new();
        write_months(&mut buf, &rows).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("month,year,month_in_year,contribution,stock_factor,stock_balance,bond_balance")
        );
        assert_eq!(lines.next(), Some("1,1,1,100.0,1.01,101.0,0.0"));
    }
}
