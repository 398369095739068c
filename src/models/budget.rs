//! Budget store model
//!
//! Budgets are kept as a two-level lookup: month key → category → amount.
//! There is at most one amount per (month, category); setting it again
//! overwrites. Within a month, categories keep the order they were first
//! set in so that listings and summaries come out the same every time.

use serde::Serialize;
use std::collections::BTreeMap;

use super::money::Money;

/// One budget line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetEntry {
    /// Month key (`YYYY-MM`)
    pub month: String,
    /// Category name
    pub category: String,
    /// Budgeted amount
    pub amount: Money,
}

/// Budgets for a single month, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MonthBudgets {
    entries: Vec<(String, Money)>,
}

impl MonthBudgets {
    /// Look up the budget for a category
    pub fn get(&self, category: &str) -> Option<Money> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, amount)| *amount)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    /// Set a budget, returning the previous amount if there was one
    ///
    /// An overwritten category keeps its original position.
    pub fn set(&mut self, category: impl Into<String>, amount: Money) -> Option<Money> {
        let category = category.into();
        match self.entries.iter_mut().find(|(name, _)| *name == category) {
            Some((_, existing)) => Some(std::mem::replace(existing, amount)),
            None => {
                self.entries.push((category, amount));
                None
            }
        }
    }

    /// Remove a category's budget
    pub fn remove(&mut self, category: &str) -> Option<Money> {
        let index = self.entries.iter().position(|(name, _)| name == category)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate over (category, amount) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.entries
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
    }

    /// Category names in insertion order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// (category, amount) pairs sorted by category name, ignoring case
    pub fn sorted(&self) -> Vec<(&str, Money)> {
        let mut items: Vec<_> = self.iter().collect();
        items.sort_by_key(|(name, _)| name.to_lowercase());
        items
    }

    /// Sum of all budgets in this month
    pub fn total(&self) -> Money {
        self.entries.iter().map(|(_, amount)| *amount).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All budgets, keyed by month
///
/// Months iterate in sorted order. Lookups return `None` for a missing month
/// or category rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BudgetStore {
    months: BTreeMap<String, MonthBudgets>,
}

impl BudgetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Budgets for one month, if any were set
    pub fn month(&self, month: &str) -> Option<&MonthBudgets> {
        self.months.get(month)
    }

    /// Look up the budget for (month, category)
    pub fn get(&self, month: &str, category: &str) -> Option<Money> {
        self.months.get(month).and_then(|m| m.get(category))
    }

    /// Set the budget for (month, category), returning the previous amount
    pub fn set(
        &mut self,
        month: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
    ) -> Option<Money> {
        self.months
            .entry(month.into())
            .or_default()
            .set(category, amount)
    }

    /// Remove the budget for (month, category)
    ///
    /// A month left without budgets is dropped.
    pub fn remove(&mut self, month: &str, category: &str) -> Option<Money> {
        let month_budgets = self.months.get_mut(month)?;
        let removed = month_budgets.remove(category);
        if month_budgets.is_empty() {
            self.months.remove(month);
        }
        removed
    }

    /// Move every month's budget for `from` to `to`
    ///
    /// When `to` already has a budget in a month, that value is kept, the
    /// `from` budget is dropped, and the month is returned as a conflict.
    pub fn rename_category(&mut self, from: &str, to: &str) -> Vec<String> {
        let mut conflicts = Vec::new();

        for (month, budgets) in self.months.iter_mut() {
            let Some(amount) = budgets.remove(from) else {
                continue;
            };
            if budgets.contains(to) {
                conflicts.push(month.clone());
            } else {
                budgets.set(to, amount);
            }
        }

        self.months.retain(|_, budgets| !budgets.is_empty());
        conflicts
    }

    /// Month keys in sorted order
    pub fn months(&self) -> impl Iterator<Item = &str> {
        self.months.keys().map(String::as_str)
    }

    /// All entries, months sorted and categories in insertion order
    pub fn entries(&self) -> impl Iterator<Item = BudgetEntry> + '_ {
        self.months.iter().flat_map(|(month, budgets)| {
            budgets.iter().map(move |(category, amount)| BudgetEntry {
                month: month.clone(),
                category: category.to_string(),
                amount,
            })
        })
    }

    /// Total number of (month, category) budgets
    pub fn len(&self) -> usize {
        self.months.values().map(MonthBudgets::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn clear(&mut self) {
        self.months.clear();
    }
}
