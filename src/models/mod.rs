//! Core data models for Expense Monitor
//!
//! Expenses, category rules, budgets, and the value types they are built
//! from (money amounts and `YYYY-MM` month keys).

pub mod budget;
pub mod category;
pub mod expense;
pub mod money;
pub mod month;

pub use budget::{BudgetEntry, BudgetStore, MonthBudgets};
pub use category::{
    normalize_keywords, split_keywords, CategoryRule, CategoryRuleSet, CategoryValidationError,
    DefaultCategoryRule, DEFAULT_CATEGORY,
};
pub use expense::{ExpenseEdit, ExpenseRecord};
pub use money::{parse_amount, Money, MoneyParseError};
pub use month::{current_month, extract_month, is_month_key, month_from_parts};
