//! Monthly analysis pipeline
//!
//! filter by month → aggregate per category → compare against budgets.
//! None of these functions mutate their inputs; rows are rebuilt on every
//! call so that changed records or budgets are always reflected.

use serde::Serialize;
use std::fmt;

use crate::models::{BudgetStore, ExpenseRecord, Money};

/// Select the records of one month, keeping their original order
pub fn filter_by_month<'a, I>(records: I, month: &str) -> Vec<&'a ExpenseRecord>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    records
        .into_iter()
        .filter(|record| record.is_in_month(month))
        .collect()
}

/// Spending per category, in the order categories were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals {
    totals: Vec<(String, Money)>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount to a category, starting unseen categories at zero
    pub fn add(&mut self, category: &str, amount: Money) {
        match self.totals.iter_mut().find(|(name, _)| name == category) {
            Some((_, total)) => *total += amount,
            None => self.totals.push((category.to_string(), amount)),
        }
    }

    /// Total for a category, if any record fell into it
    pub fn get(&self, category: &str) -> Option<Money> {
        self.totals
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
    }

    /// Total for a category, zero when nothing was spent
    pub fn spent(&self, category: &str) -> Money {
        self.get(category).unwrap_or_default()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.totals
            .iter()
            .map(|(name, total)| (name.as_str(), *total))
    }

    /// Sum over all categories
    pub fn grand_total(&self) -> Money {
        self.totals.iter().map(|(_, total)| *total).sum()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Sum amounts per category
pub fn aggregate<'a, I>(records: I) -> CategoryTotals
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut totals = CategoryTotals::new();
    for record in records {
        totals.add(record.category(), record.amount());
    }
    totals
}

/// How spending in a category compares with its budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "BUDGET EXCEEDED")]
    Exceeded,
    #[serde(rename = "NO BUDGET")]
    NoBudget,
}

impl BudgetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Exceeded => "BUDGET EXCEEDED",
            Self::NoBudget => "NO BUDGET",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One category line of a monthly summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummaryRow {
    pub category: String,
    /// `None` when the month has no budget for this category
    pub budget: Option<Money>,
    pub spent: Money,
    /// `budget - spent`; `None` without a budget
    pub remaining: Option<Money>,
    pub status: BudgetStatus,
}

impl MonthlySummaryRow {
    fn new(category: &str, budget: Option<Money>, spent: Money) -> Self {
        let remaining = budget.map(|budget| budget - spent);
        let status = match remaining {
            None => BudgetStatus::NoBudget,
            Some(remaining) if remaining.is_negative() => BudgetStatus::Exceeded,
            Some(_) => BudgetStatus::Ok,
        };

        Self {
            category: category.to_string(),
            budget,
            spent,
            remaining,
            status,
        }
    }

    pub fn is_exceeded(&self) -> bool {
        self.status == BudgetStatus::Exceeded
    }
}

/// Join spending totals with the month's budgets
///
/// Rows cover every category with spending (in totals order) followed by
/// budgeted categories without spending (in budget order).
pub fn compare_to_budgets(
    totals: &CategoryTotals,
    budgets: &BudgetStore,
    month: &str,
) -> Vec<MonthlySummaryRow> {
    let month_budgets = budgets.month(month);

    let mut rows: Vec<MonthlySummaryRow> = totals
        .iter()
        .map(|(category, spent)| {
            let budget = month_budgets.and_then(|b| b.get(category));
            MonthlySummaryRow::new(category, budget, spent)
        })
        .collect();

    if let Some(month_budgets) = month_budgets {
        for (category, budget) in month_budgets.iter() {
            if !totals.contains(category) {
                rows.push(MonthlySummaryRow::new(category, Some(budget), Money::zero()));
            }
        }
    }

    rows
}

/// Names of the over-budget categories, in row order
pub fn exceeded_categories(rows: &[MonthlySummaryRow]) -> Vec<&str> {
    rows.iter()
        .filter(|row| row.is_exceeded())
        .map(|row| row.category.as_str())
        .collect()
}
