//! Budget CLI commands
//!
//! Implements CLI commands for setting, editing, listing and importing
//! monthly category budgets.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_budget_list;
use crate::error::MonitorResult;
use crate::models::{extract_month, parse_amount};
use crate::storage::{import_budgets_file, Storage};

use super::print_import_result;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List budgets, for one month or all months
    List {
        /// Month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Set the budget for a category in a month
    Set {
        /// Month (YYYY-MM)
        month: String,
        /// Category name
        category: String,
        /// Amount (e.g., "100" or "100.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Rename a budget's category or change its amount
    Edit {
        /// Month (YYYY-MM)
        month: String,
        /// Current category name
        category: String,
        /// New category name
        #[arg(short, long)]
        rename: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
    },

    /// Remove the budget for a category in a month
    Remove {
        /// Month (YYYY-MM)
        month: String,
        /// Category name
        category: String,
    },

    /// Remove every budget
    Clear,

    /// Import budgets from a CSV file (month,category,budget)
    Import {
        /// Path to CSV file
        file: String,
    },
}

impl BudgetCommands {
    /// Check if the command rewrites the budget file
    pub fn modifies_file(&self) -> bool {
        !matches!(self, Self::List { .. })
    }
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> MonitorResult<()> {
    let currency = settings.currency_symbol.as_str();
    let (mut session, report) = storage.load_session(settings.category_rules.clone())?;
    if cmd.modifies_file() {
        storage.ensure_budgets_writable(&report)?;
    }

    match cmd {
        BudgetCommands::List { month } => {
            let month = month.as_deref().map(extract_month).transpose()?;
            print!(
                "{}",
                format_budget_list(&session, month.as_deref(), currency)
            );
        }

        BudgetCommands::Set {
            month,
            category,
            amount,
        } => {
            let amount = parse_amount(&amount)?;
            let previous = session.set_budget(&month, &category, amount)?;
            storage.save_budgets(session.budgets())?;

            let month = extract_month(&month)?;
            match previous {
                Some(old) => println!(
                    "Updated budget for {} in {}: {} -> {}",
                    category.trim(),
                    month,
                    old.format_with_symbol(currency),
                    amount.format_with_symbol(currency)
                ),
                None => println!(
                    "Set budget for {} in {}: {}",
                    category.trim(),
                    month,
                    amount.format_with_symbol(currency)
                ),
            }
        }

        BudgetCommands::Edit {
            month,
            category,
            rename,
            amount,
        } => {
            if rename.is_none() && amount.is_none() {
                println!("No changes specified. Use --rename or --amount.");
                return Ok(());
            }

            let amount = amount.as_deref().map(parse_amount).transpose()?;
            let entry = session.edit_budget(&month, &category, rename.as_deref(), amount)?;
            storage.save_budgets(session.budgets())?;
            println!(
                "Updated budget: {} {} {}",
                entry.month,
                entry.category,
                entry.amount.format_with_symbol(currency)
            );
        }

        BudgetCommands::Remove { month, category } => {
            let amount = session.remove_budget(&month, &category)?;
            storage.save_budgets(session.budgets())?;
            println!(
                "Removed budget for {} ({})",
                category.trim(),
                amount.format_with_symbol(currency)
            );
        }

        BudgetCommands::Clear => {
            let count = session.clear_budgets();
            storage.save_budgets(session.budgets())?;
            println!("Removed {} budget(s).", count);
        }

        BudgetCommands::Import { file } => {
            let result = import_budgets_file(&file, session.budgets_mut())?;
            storage.save_budgets(session.budgets())?;
            print_import_result("budget(s)", &result);
        }
    }

    Ok(())
}
