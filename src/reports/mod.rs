//! Reports module for Expense Monitor
//!
//! Provides the monthly budget summary and the optional spending chart.

pub mod chart;
pub mod monthly_summary;

pub use chart::{chart_available, Capability, ChartBar, SpendingChart};
pub use monthly_summary::MonthlySummaryReport;
