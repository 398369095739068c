use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_monitor::cli::{
    handle_budget_command, handle_category_command, handle_chart_command, handle_expense_command,
    handle_summary_command, BudgetCommands, CategoryCommands, ExpenseCommands, MonthArgs,
    SummaryArgs,
};
use expense_monitor::config::{MonitorPaths, Settings};
use expense_monitor::storage::Storage;

/// Environment variable holding the log filter (e.g. "debug")
const LOG_ENV: &str = "EXPENSE_MONITOR_LOG";

#[derive(Parser)]
#[command(
    name = "expense-monitor",
    version,
    about = "Categorize expenses and compare monthly spending against budgets",
    long_about = "Expense Monitor records expenses, assigns each one a category from \
                  keyword rules, and compares each month's spending per category \
                  against the budgets you set."
)]
struct Cli {
    /// Expense CSV file to use instead of the configured one
    #[arg(long, global = true)]
    expenses: Option<PathBuf>,

    /// Budget CSV file to use instead of the configured one
    #[arg(long, global = true)]
    budgets: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Category rule commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Show spending against budgets for a month
    Summary(SummaryArgs),

    /// Draw a text bar chart of spending per category
    Chart(MonthArgs),

    /// Show current configuration and paths
    Config,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = MonitorPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    if let Some(path) = cli.expenses {
        settings.expenses_file = Some(path);
    }
    if let Some(path) = cli.budgets {
        settings.budgets_file = Some(path);
    }

    let storage = Storage::from_settings(&paths, &settings);

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => {
            // Overrides apply to this run only; don't persist them with the rules
            let mut stored = Settings::load_or_create(&paths)?;
            handle_category_command(&storage, &paths, &mut stored, cmd)?;
        }
        Some(Commands::Summary(args)) => handle_summary_command(&storage, &settings, args)?,
        Some(Commands::Chart(month)) => handle_chart_command(&storage, &settings, month)?,
        Some(Commands::Config) => {
            println!("Expense Monitor Configuration");
            println!("=============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Expenses file:    {}", storage.expenses_path().display());
            println!("Budgets file:     {}", storage.budgets_path().display());
            println!();
            println!("Settings:");
            let currency = if settings.currency_symbol.is_empty() {
                "(none)"
            } else {
                settings.currency_symbol.as_str()
            };
            println!("  Currency symbol: {}", currency);
            println!("  Charts enabled:  {}", settings.charts_enabled);
            println!("  Category rules:  {}", settings.category_rules.len());
        }
        None => {
            println!("Expense Monitor - expense categorization and budget tracking");
            println!();
            println!("Run 'expense-monitor --help' for usage information.");
        }
    }

    Ok(())
}
