//! Monthly Summary Report
//!
//! Spending per category for one month next to that month's budgets, with
//! totals and the list of categories that went over budget.

use std::io::Write;

use serde::Serialize;

use crate::error::{MonitorError, MonitorResult};
use crate::models::Money;
use crate::services::{exceeded_categories, BudgetStatus, MonthlySummaryRow};
use crate::session::Session;

const TABLE_WIDTH: usize = 72;

/// Monthly Summary Report
#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummaryReport {
    /// Month key (`YYYY-MM`)
    pub month: String,
    /// One row per category with spending or a budget
    pub rows: Vec<MonthlySummaryRow>,
    /// Number of expenses in the month
    pub expense_count: usize,
    /// Spending across all categories
    pub total_spent: Money,
    /// Sum of the month's budgets, if any row has one
    pub total_budgeted: Option<Money>,
    /// Over-budget categories in row order
    pub exceeded: Vec<String>,
}

impl MonthlySummaryReport {
    /// Generate the report for a month
    pub fn generate(session: &Session, month: &str) -> Self {
        let expense_count = session.expenses_for_month(month).len();
        let rows = session.summary(month);

        let total_spent = rows.iter().map(|row| row.spent).sum();
        let budgets: Vec<Money> = rows.iter().filter_map(|row| row.budget).collect();
        let total_budgeted = if budgets.is_empty() {
            None
        } else {
            Some(budgets.into_iter().sum())
        };
        let exceeded = exceeded_categories(&rows)
            .into_iter()
            .map(String::from)
            .collect();

        Self {
            month: month.to_string(),
            rows,
            expense_count,
            total_spent,
            total_budgeted,
            exceeded,
        }
    }

    /// Check if the month has any expenses
    pub fn has_expenses(&self) -> bool {
        self.expense_count > 0
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let money = |amount: Money| amount.format_with_symbol(currency);
        let mut output = String::new();

        output.push_str("=== Monthly Summary ===\n");
        output.push_str(&format!("Month: {}\n", self.month));

        if !self.has_expenses() {
            output.push_str(&format!("No expenses found for month '{}'.\n", self.month));
        }

        output.push_str(&"-".repeat(TABLE_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>10} {:>10} {:>10}  {}\n",
            "Category", "Budget", "Spent", "Remain", "Status"
        ));
        output.push_str(&"-".repeat(TABLE_WIDTH));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<18} {:>10} {:>10} {:>10}  {}\n",
                row.category,
                row.budget.map(money).unwrap_or_default(),
                money(row.spent),
                row.remaining.map(money).unwrap_or_default(),
                row.status
            ));
        }

        output.push_str(&"-".repeat(TABLE_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>10} {:>10}\n",
            "TOTAL",
            self.total_budgeted.map(money).unwrap_or_default(),
            money(self.total_spent)
        ));

        if !self.exceeded.is_empty() {
            output.push_str(&format!(
                "WARNING: Budget exceeded in: {}\n",
                self.exceeded.join(", ")
            ));
        }

        output
    }

    /// Export the report to CSV format
    ///
    /// Rows without a budget leave the budget and remaining cells empty.
    pub fn export_csv<W: Write>(&self, writer: W) -> MonitorResult<()> {
        let export_error = |e: csv::Error| MonitorError::Export(e.to_string());
        let cell = |amount: Option<Money>| amount.map(|a| a.to_string()).unwrap_or_default();

        let mut out = csv::Writer::from_writer(writer);
        out.write_record(["month", "category", "budget", "spent", "remaining", "status"])
            .map_err(export_error)?;

        for row in &self.rows {
            out.write_record([
                self.month.as_str(),
                row.category.as_str(),
                cell(row.budget).as_str(),
                row.spent.to_string().as_str(),
                cell(row.remaining).as_str(),
                row.status.label(),
            ])
            .map_err(export_error)?;
        }

        out.write_record([
            self.month.as_str(),
            "TOTAL",
            cell(self.total_budgeted).as_str(),
            self.total_spent.to_string().as_str(),
            "",
            "",
        ])
        .map_err(export_error)?;

        out.flush()
            .map_err(|e| MonitorError::Export(e.to_string()))
    }

    /// Rows whose status is `status`
    pub fn rows_with_status(
        &self,
        status: BudgetStatus,
    ) -> impl Iterator<Item = &MonthlySummaryRow> {
        self.rows.iter().filter(move |row| row.status == status)
    }
}
