//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the session and storage layers.

pub mod budget;
pub mod category;
pub mod expense;
pub mod summary;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use summary::{handle_chart_command, handle_summary_command, MonthArgs, SummaryArgs, SummaryFormat};

use crate::error::{MonitorError, MonitorResult};
use crate::services::ImportResult;

/// Turn a 1-based number from the command line into a 0-based index
pub(crate) fn to_index(number: usize) -> MonitorResult<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| MonitorError::Validation("Numbers start at 1".into()))
}

/// Print the loaded/skipped counts of an import, with the reason for each skip
pub(crate) fn print_import_result(kind: &str, result: &ImportResult) {
    println!(
        "Loaded {} {}. Skipped {} invalid row(s).",
        result.loaded, kind, result.skipped
    );
    for error in &result.errors {
        println!("  line {}: {}", error.line, error.message);
    }
}
