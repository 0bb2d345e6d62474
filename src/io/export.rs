//! Write run artifacts: the CSV export and the text report.
//!
//! The CSV reproduces the mart query result verbatim (same columns, same
//! order) so spreadsheets and downstream scripts see exactly what the charts
//! were built from.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::domain::ComparisonRow;
use crate::error::AppError;

/// Write the raw mart rows to CSV. Headers come from the serde renames on
/// `ComparisonRow`, i.e. the mart column names.
pub fn write_rows_csv(path: &Path, rows: &[ComparisonRow]) -> Result<(), AppError> {
    let file = fs::File::create(path).map_err(|e| {
        AppError::config(format!(
            "Failed to create CSV export '{}': {e}",
            path.display()
        ))
    })?;
    write_rows_to(file, rows)
}

fn write_rows_to<W: Write>(writer: W, rows: &[ComparisonRow]) -> Result<(), AppError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer
            .serialize(row)
            .map_err(|e| AppError::config(format!("Failed to write CSV row: {e}")))?;
    }
    csv_writer
        .flush()
        .map_err(|e| AppError::config(format!("Failed to flush CSV export: {e}")))
}

/// Write the composed report text verbatim (UTF-8).
pub fn write_report_txt(path: &Path, report: &str) -> Result<(), AppError> {
    fs::write(path, report).map_err(|e| {
        AppError::config(format!(
            "Failed to write report '{}': {e}",
            path.display()
        ))
    })
}
