//! Output formatting and persistence for analysis reports.
//!
//! Supports pretty-printing, JSON serialization, and CSV export of the
//! augmented table.

use tracing::{debug, info};

use crate::analyzers::types::AnalysisReport;
use crate::dataset::Dataset;
use crate::error::Result;
use csv::WriterBuilder;
use std::fs::File;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &AnalysisReport) {
    debug!("{:#?}", report);
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(report: &AnalysisReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes the report as pretty-printed JSON, replacing any existing file.
pub fn write_json(path: &str, report: &AnalysisReport) -> Result<()> {
    debug!(path, "Writing JSON report");
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

/// Writes a table to CSV with a header row, replacing any existing file.
/// Missing cells are written as empty fields.
pub fn write_table_csv(path: &str, table: &Dataset) -> Result<()> {
    debug!(path, rows = table.row_count(), "Writing CSV table");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().from_writer(file);

    writer.write_record(table.headers())?;
    for row in 0..table.row_count() {
        writer.write_record(table.row(row).iter().map(|c| c.to_string()))?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes the augmented table (input plus Total, Percentage, Grade) to CSV.
pub fn write_augmented_csv(path: &str, report: &AnalysisReport) -> Result<()> {
    write_table_csv(path, &report.table)
}
