//! Export module for Expense Monitor
//!
//! - CSV: the expense and budget working-file formats
//! - JSON / YAML: machine-readable monthly summaries

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_budgets, export_expenses};
pub use json::{export_summary_json, SummaryExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_summary_yaml;
