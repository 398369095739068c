//! Expense Monitor - expense categorization and budget tracking
//!
//! This library records expenses, assigns each one a category from an
//! ordered list of keyword rules, and compares each month's spending per
//! category against monthly budgets.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (money, months, expenses, rules, budgets)
//! - `services`: Categorization, record building, aggregation and rule management
//! - `session`: The working set of records, budgets and rules passed to every operation
//! - `storage`: CSV working files and imports
//! - `export`: CSV, JSON and YAML writers
//! - `reports`: Monthly summary and spending chart
//! - `display`: Terminal tables
//! - `config`: Configuration and path management
//! - `cli`: Command handlers for the `expense-monitor` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```
//! use expense_monitor::models::{CategoryRuleSet, Money};
//! use expense_monitor::session::Session;
//! use expense_monitor::services::BudgetStatus;
//!
//! let mut session = Session::new(CategoryRuleSet::default_rules());
//! session.add_expense("2025-11-02", "Coffee at Cafe", Money::from_cents(450))?;
//! session.set_budget("2025-11", "Food", Money::from_cents(5000))?;
//!
//! let rows = session.summary("2025-11");
//! assert_eq!(rows[0].category, "Food");
//! assert_eq!(rows[0].status, BudgetStatus::Ok);
//! # Ok::<(), expense_monitor::error::MonitorError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{MonitorError, MonitorResult};
pub use models::{extract_month, parse_amount};
pub use services::{aggregate, build_record, categorize, compare_to_budgets, filter_by_month};
pub use session::Session;
