//! JSON export of the monthly summary
//!
//! Amounts are written as decimal strings ("45.50") so the output does not
//! depend on how amounts are stored internally.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{MonitorError, MonitorResult};
use crate::models::Money;
use crate::reports::MonthlySummaryReport;
use crate::services::BudgetStatus;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Monthly summary as written to JSON and YAML
#[derive(Debug, Clone, Serialize)]
pub struct SummaryExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub month: String,
    pub expense_count: usize,
    pub rows: Vec<SummaryExportRow>,
    pub total_spent: String,
    pub total_budgeted: Option<String>,
    pub exceeded: Vec<String>,
}

/// One category line of the export
#[derive(Debug, Clone, Serialize)]
pub struct SummaryExportRow {
    pub category: String,
    pub budget: Option<String>,
    pub spent: String,
    pub remaining: Option<String>,
    pub status: BudgetStatus,
}

fn amount(value: Money) -> String {
    value.to_string()
}

impl SummaryExport {
    /// Build the export structure from a generated report
    pub fn from_report(report: &MonthlySummaryReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            month: report.month.clone(),
            expense_count: report.expense_count,
            rows: report
                .rows
                .iter()
                .map(|row| SummaryExportRow {
                    category: row.category.clone(),
                    budget: row.budget.map(amount),
                    spent: amount(row.spent),
                    remaining: row.remaining.map(amount),
                    status: row.status,
                })
                .collect(),
            total_spent: amount(report.total_spent),
            total_budgeted: report.total_budgeted.map(amount),
            exceeded: report.exceeded.clone(),
        }
    }
}

/// Export a monthly summary to JSON
pub fn export_summary_json<W: Write>(
    report: &MonthlySummaryReport,
    writer: &mut W,
) -> MonitorResult<()> {
    let export = SummaryExport::from_report(report);

    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| MonitorError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| MonitorError::Export(e.to_string()))?;

    Ok(())
}
