//! Storage layer for Expense Monitor
//!
//! Expenses and budgets live in two CSV working files. Missing working files
//! simply mean "nothing recorded yet"; files given to an explicit import must
//! exist and must not be empty.

pub mod file_io;

pub use file_io::{open_input, write_atomic, write_json_atomic};

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{MonitorPaths, Settings};
use crate::error::{MonitorError, MonitorResult};
use crate::export::{export_budgets, export_expenses};
use crate::models::{BudgetStore, CategoryRuleSet, ExpenseRecord};
use crate::services::{import_budgets, import_expenses, ImportResult};
use crate::session::Session;

/// Working expense and budget files
#[derive(Debug, Clone)]
pub struct Storage {
    expenses_path: PathBuf,
    budgets_path: PathBuf,
}

impl Storage {
    /// Create a Storage over explicit file paths
    pub fn new(expenses_path: impl Into<PathBuf>, budgets_path: impl Into<PathBuf>) -> Self {
        Self {
            expenses_path: expenses_path.into(),
            budgets_path: budgets_path.into(),
        }
    }

    /// Storage over the files named in settings (or the defaults)
    pub fn from_settings(paths: &MonitorPaths, settings: &Settings) -> Self {
        Self::new(settings.expenses_path(paths), settings.budgets_path(paths))
    }

    pub fn expenses_path(&self) -> &Path {
        &self.expenses_path
    }

    pub fn budgets_path(&self) -> &Path {
        &self.budgets_path
    }

    /// Load the working expenses, categorizing them with `rules`
    pub fn load_expenses(
        &self,
        rules: &CategoryRuleSet,
    ) -> MonitorResult<(Vec<ExpenseRecord>, ImportResult)> {
        if !self.expenses_path.exists() {
            return Ok((Vec::new(), ImportResult::default()));
        }

        let file = open_input(&self.expenses_path)?;
        let (records, result) = import_expenses(file, rules)?;
        info!(
            path = %self.expenses_path.display(),
            loaded = result.loaded,
            skipped = result.skipped,
            "loaded expenses"
        );
        Ok((records, result))
    }

    /// Load the working budgets
    pub fn load_budgets(&self) -> MonitorResult<(BudgetStore, ImportResult)> {
        let mut store = BudgetStore::new();
        if !self.budgets_path.exists() {
            return Ok((store, ImportResult::default()));
        }

        let file = open_input(&self.budgets_path)?;
        let result = import_budgets(file, &mut store)?;
        info!(
            path = %self.budgets_path.display(),
            loaded = result.loaded,
            skipped = result.skipped,
            "loaded budgets"
        );
        Ok((store, result))
    }

    /// Load both working files into a session
    ///
    /// Rows that fail validation are left out of the session and reported,
    /// both in the returned [`LoadReport`] and as warnings.
    pub fn load_session(&self, rules: CategoryRuleSet) -> MonitorResult<(Session, LoadReport)> {
        let (records, expenses) = self.load_expenses(&rules)?;
        let (budgets, budget_rows) = self.load_budgets()?;

        warn_skipped(&self.expenses_path, &expenses);
        warn_skipped(&self.budgets_path, &budget_rows);

        let report = LoadReport {
            expenses,
            budgets: budget_rows,
        };
        Ok((Session::with_data(records, budgets, rules), report))
    }

    /// Fail if rewriting the expense file would drop rows skipped on load
    pub fn ensure_expenses_writable(&self, report: &LoadReport) -> MonitorResult<()> {
        ensure_nothing_skipped(&self.expenses_path, &report.expenses)
    }

    /// Fail if rewriting the budget file would drop rows skipped on load
    pub fn ensure_budgets_writable(&self, report: &LoadReport) -> MonitorResult<()> {
        ensure_nothing_skipped(&self.budgets_path, &report.budgets)
    }

    /// Rewrite the expense working file
    pub fn save_expenses(&self, records: &[ExpenseRecord]) -> MonitorResult<()> {
        write_atomic(&self.expenses_path, |writer| export_expenses(records, writer))?;
        info!(path = %self.expenses_path.display(), count = records.len(), "saved expenses");
        Ok(())
    }

    /// Rewrite the budget working file
    pub fn save_budgets(&self, store: &BudgetStore) -> MonitorResult<()> {
        write_atomic(&self.budgets_path, |writer| export_budgets(store, writer))?;
        info!(path = %self.budgets_path.display(), count = store.len(), "saved budgets");
        Ok(())
    }

    /// Rewrite both working files
    pub fn save_session(&self, session: &Session) -> MonitorResult<()> {
        self.save_expenses(session.records())?;
        self.save_budgets(session.budgets())
    }
}

/// Counts from loading the two working files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub expenses: ImportResult,
    pub budgets: ImportResult,
}

impl LoadReport {
    /// Check if either working file had rows that were left out
    pub fn has_skipped(&self) -> bool {
        self.expenses.skipped > 0 || self.budgets.skipped > 0
    }
}

fn warn_skipped(path: &Path, result: &ImportResult) {
    if result.skipped == 0 {
        return;
    }
    warn!(
        path = %path.display(),
        loaded = result.loaded,
        skipped = result.skipped,
        "invalid rows in working file were skipped"
    );
    for error in &result.errors {
        warn!(path = %path.display(), line = error.line, "{}", error.message);
    }
}

fn ensure_nothing_skipped(path: &Path, result: &ImportResult) -> MonitorResult<()> {
    if result.skipped == 0 {
        return Ok(());
    }
    let lines: Vec<String> = result.errors.iter().map(|e| e.line.to_string()).collect();
    Err(MonitorError::Storage(format!(
        "{} has {} invalid row(s) (line {}); fix or remove them before making changes",
        path.display(),
        result.skipped,
        lines.join(", ")
    )))
}

fn ensure_not_empty(path: &Path, result: &ImportResult) -> MonitorResult<()> {
    if result.is_empty_input() {
        return Err(MonitorError::Import(format!(
            "File is empty: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Read an expense file given by the user
pub fn import_expenses_file<P: AsRef<Path>>(
    path: P,
    rules: &CategoryRuleSet,
) -> MonitorResult<(Vec<ExpenseRecord>, ImportResult)> {
    let path = path.as_ref();
    let (records, result) = import_expenses(open_input(path)?, rules)?;
    ensure_not_empty(path, &result)?;
    info!(
        path = %path.display(),
        loaded = result.loaded,
        skipped = result.skipped,
        "imported expenses"
    );
    Ok((records, result))
}

/// Read a budget file given by the user into `store`
pub fn import_budgets_file<P: AsRef<Path>>(
    path: P,
    store: &mut BudgetStore,
) -> MonitorResult<ImportResult> {
    let path = path.as_ref();
    let result = import_budgets(open_input(path)?, store)?;
    ensure_not_empty(path, &result)?;
    info!(
        path = %path.display(),
        loaded = result.loaded,
        skipped = result.skipped,
        "imported budgets"
    );
    Ok(result)
}
