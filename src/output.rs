//! Output formatting and export for the summary report.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use anyhow::Result;
use tracing::{debug, info};

use crate::report::{ReportRow, SummaryReport};
use csv::WriterBuilder;
use std::fs::File;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &SummaryReport) {
    debug!("{:#?}", report);
}

/// Serializes the report as pretty-printed JSON.
pub fn report_json(report: &SummaryReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(report: &SummaryReport) -> Result<()> {
    info!("{}", report_json(report)?);
    Ok(())
}

/// Writes report rows to a CSV file with a header line, replacing any
/// existing file.
pub fn write_csv(path: &str, rows: &[ReportRow]) -> Result<()> {
    debug!(path, rows = rows.len(), "Writing CSV report");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path, rows = rows.len(), "CSV report written");
    Ok(())
}
