//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, budgets and category rules
//! for terminal display.

pub mod budget;
pub mod category;
pub mod expense;
pub mod report;

pub use budget::format_budget_list;
pub use category::format_rule_table;
pub use expense::{format_expense_line, format_expense_table};
