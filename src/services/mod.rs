//! Service layer for Expense Monitor
//!
//! The analysis core (categorization, row building, month filtering,
//! aggregation and budget comparison) plus the services built on it:
//! CSV import and category rule management.

pub mod analysis;
pub mod categorizer;
pub mod category;
pub mod import;
pub mod record;

pub use analysis::{
    aggregate, compare_to_budgets, exceeded_categories, filter_by_month, BudgetStatus,
    CategoryTotals, MonthlySummaryRow,
};
pub use categorizer::categorize;
pub use category::{CategoryService, KeywordChange, RuleEdit, RuleEditOutcome};
pub use import::{import_budgets, import_expenses, ImportResult, RowError};
pub use record::{build_budget_entry, build_record, is_header_row};
