//! YAML export of the monthly summary

use crate::error::{MonitorError, MonitorResult};
use crate::export::json::SummaryExport;
use crate::reports::MonthlySummaryReport;
use std::io::Write;

/// Export a monthly summary to YAML
pub fn export_summary_yaml<W: Write>(
    report: &MonthlySummaryReport,
    writer: &mut W,
) -> MonitorResult<()> {
    let export = SummaryExport::from_report(report);

    writeln!(writer, "# Expense Monitor Summary: {}", export.month)
        .map_err(|e| MonitorError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| MonitorError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| MonitorError::Export(e.to_string()))?;

    Ok(())
}
