//! Expense display formatting
//!
//! Expenses are listed per month and numbered from 1 within the month; the
//! numbers are what `expense edit` and `expense delete` take.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{ExpenseRecord, Money};

use super::report::truncate;

const DESCRIPTION_WIDTH: usize = 40;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format one month of expenses as a numbered table with a total line
pub fn format_expense_table(month: &str, records: &[&ExpenseRecord], currency: &str) -> String {
    if records.is_empty() {
        return format!("No expenses found for month '{}'.\n", month);
    }

    let rows = records.iter().enumerate().map(|(i, record)| ExpenseRow {
        number: i + 1,
        date: record.date().to_string(),
        description: truncate(record.description(), DESCRIPTION_WIDTH),
        category: record.category().to_string(),
        amount: record.amount().format_with_symbol(currency),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(0), Alignment::right())
        .modify(Columns::single(4), Alignment::right());

    let total: Money = records.iter().map(|r| r.amount()).sum();

    let mut output = format!("Expenses for {}\n", month);
    output.push_str(&table.to_string());
    output.push('\n');
    output.push_str(&format!(
        "{} expense(s), total {}\n",
        records.len(),
        total.format_with_symbol(currency)
    ));
    output
}

/// Format a single expense for confirmation messages
pub fn format_expense_line(record: &ExpenseRecord, currency: &str) -> String {
    format!(
        "{}  {}  {}  [{}]",
        record.date(),
        record.description(),
        record.amount().format_with_symbol(currency),
        record.category()
    )
}
