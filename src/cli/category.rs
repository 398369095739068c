//! Category CLI commands
//!
//! Implements CLI commands for managing the ordered category rule set. Rules
//! are stored in settings and every expense is categorized with the current
//! rules when the working file is loaded. A rename also rewrites the budget
//! file, because budgets are keyed by category name.

use clap::Subcommand;

use crate::config::{MonitorPaths, Settings};
use crate::display::format_rule_table;
use crate::error::MonitorResult;
use crate::models::split_keywords;
use crate::services::{categorize, CategoryService, KeywordChange, RuleEdit};
use crate::storage::Storage;

use super::to_index;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List category rules in priority order
    List,

    /// Add a rule with the lowest priority
    Add {
        /// Category name
        name: String,
        /// Comma separated keywords (e.g., "uber,taxi")
        #[arg(short, long)]
        keywords: String,
    },

    /// Edit a rule
    Edit {
        /// Rule number from `category list`
        number: usize,
        /// New category name
        #[arg(short, long)]
        rename: Option<String>,
        /// Comma separated keywords to add
        #[arg(short, long, conflicts_with = "remove")]
        add: Option<String>,
        /// Comma separated keywords to remove
        #[arg(long)]
        remove: Option<String>,
    },

    /// Delete a rule
    Delete {
        /// Rule number from `category list`
        number: usize,
    },

    /// Show which category a description would get
    Test {
        /// Expense description
        description: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    paths: &MonitorPaths,
    settings: &mut Settings,
    cmd: CategoryCommands,
) -> MonitorResult<()> {
    let (mut session, report) = storage.load_session(settings.category_rules.clone())?;
    let mut service = CategoryService::new(&mut session);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_rule_table(service.rules()));
            return Ok(());
        }

        CategoryCommands::Test { description } => {
            println!("{}", categorize(&description, service.rules()));
            return Ok(());
        }

        CategoryCommands::Add { name, keywords } => {
            let rule = service.add_rule(&name, split_keywords(&keywords))?;
            println!(
                "Added category: {} ({})",
                rule.name,
                rule.keywords.join(", ")
            );
        }

        CategoryCommands::Edit {
            number,
            rename,
            add,
            remove,
        } => {
            let keywords = match (add, remove) {
                (Some(add), _) => KeywordChange::Add(split_keywords(&add)),
                (None, Some(remove)) => KeywordChange::Remove(split_keywords(&remove)),
                (None, None) => KeywordChange::Keep,
            };

            if rename.is_none() && keywords == KeywordChange::Keep {
                println!("No changes specified. Use --rename, --add, or --remove.");
                return Ok(());
            }

            if rename.is_some() {
                storage.ensure_expenses_writable(&report)?;
                storage.ensure_budgets_writable(&report)?;
            }

            let outcome = service.edit_rule(to_index(number)?, RuleEdit { rename, keywords })?;
            if outcome.renamed() {
                println!(
                    "Renamed category: {} -> {} ({} expense(s) relabelled)",
                    outcome.previous_name, outcome.rule.name, outcome.relabelled
                );
                for month in &outcome.budget_conflicts {
                    println!(
                        "Warning: {} already had a budget for {}; kept it and dropped the one for {}",
                        month, outcome.rule.name, outcome.previous_name
                    );
                }
                storage.save_session(&session)?;
            } else {
                println!(
                    "Updated category: {} ({})",
                    outcome.rule.name,
                    outcome.rule.keywords.join(", ")
                );
            }
        }

        CategoryCommands::Delete { number } => {
            let removed = service.delete_rule(to_index(number)?)?;
            println!("Deleted category: {}", removed.name);
        }
    }

    settings.category_rules = session.rules().clone();
    settings.save(paths)?;

    Ok(())
}
