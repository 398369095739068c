//! Expense CLI commands
//!
//! Implements CLI commands for recording, listing, editing and importing
//! expenses. Expenses are addressed by month and their number in that
//! month's listing.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_expense_line, format_expense_table};
use crate::error::MonitorResult;
use crate::models::{current_month, extract_month, parse_amount, ExpenseEdit};
use crate::storage::{import_expenses_file, Storage};

use super::{print_import_result, to_index};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses for a month
    List {
        /// Month (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Record a new expense
    Add {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Description; the category is chosen from it
        description: String,
        /// Amount (e.g., "4.50" or "4,50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Edit an expense
    Edit {
        /// Month the expense is listed under (YYYY-MM)
        month: String,
        /// Expense number from `expense list`
        number: usize,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Month the expense is listed under (YYYY-MM)
        month: String,
        /// Expense number from `expense list`
        number: usize,
    },

    /// Delete every expense
    Clear,

    /// Import expenses from a CSV file (date,description,amount)
    Import {
        /// Path to CSV file
        file: String,
    },
}

impl ExpenseCommands {
    /// Check if the command rewrites the expense file
    pub fn modifies_file(&self) -> bool {
        !matches!(self, Self::List { .. })
    }
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> MonitorResult<()> {
    let currency = settings.currency_symbol.as_str();
    let (mut session, report) = storage.load_session(settings.category_rules.clone())?;
    if cmd.modifies_file() {
        storage.ensure_expenses_writable(&report)?;
    }

    match cmd {
        ExpenseCommands::List { month } => {
            let month = match month {
                Some(month) => extract_month(&month)?,
                None => current_month(),
            };
            let records = session.expenses_for_month(&month);
            print!("{}", format_expense_table(&month, &records, currency));
        }

        ExpenseCommands::Add {
            date,
            description,
            amount,
        } => {
            let amount = parse_amount(&amount)?;
            let line = {
                let record = session.add_expense(&date, &description, amount)?;
                format_expense_line(record, currency)
            };
            storage.save_expenses(session.records())?;
            println!("Added expense: {}", line);
        }

        ExpenseCommands::Edit {
            month,
            number,
            date,
            description,
            amount,
        } => {
            let edit = ExpenseEdit {
                date,
                description,
                amount: amount.as_deref().map(parse_amount).transpose()?,
            };

            if edit.is_empty() {
                println!("No changes specified. Use --date, --description, or --amount.");
                return Ok(());
            }

            let line = {
                let record = session.edit_expense(&month, to_index(number)?, edit)?;
                format_expense_line(record, currency)
            };
            storage.save_expenses(session.records())?;
            println!("Updated expense: {}", line);
        }

        ExpenseCommands::Delete { month, number } => {
            let removed = session.delete_expense(&month, to_index(number)?)?;
            storage.save_expenses(session.records())?;
            println!("Deleted expense: {}", format_expense_line(&removed, currency));
        }

        ExpenseCommands::Clear => {
            let count = session.clear_expenses();
            storage.save_expenses(session.records())?;
            println!("Deleted {} expense(s).", count);
        }

        ExpenseCommands::Import { file } => {
            let (records, result) = import_expenses_file(&file, session.rules())?;
            session.extend_records(records);
            storage.save_expenses(session.records())?;
            print_import_result("expense(s)", &result);
        }
    }

    Ok(())
}
