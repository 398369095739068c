//! Expense record model
//!
//! An expense carries the user-supplied date, description and amount plus
//! two derived fields: the `YYYY-MM` month taken from the date, and the
//! category chosen by the rule set from the description. The derived fields
//! are only ever written together with the field they come from.

use serde::Serialize;
use std::fmt;

use super::category::CategoryRuleSet;
use super::money::Money;
use super::month::extract_month;
use crate::error::{MonitorError, MonitorResult};
use crate::services::categorize;

/// A single expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseRecord {
    date: String,
    description: String,
    amount: Money,
    category: String,
    month: String,
}

/// Requested changes to an expense; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseEdit {
    pub date: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Money>,
}

impl ExpenseEdit {
    /// Check if the edit changes nothing
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.description.is_none() && self.amount.is_none()
    }
}

impl ExpenseRecord {
    /// Create a new expense, deriving its month and category
    ///
    /// Fails with `InvalidDate` when the date has no `YYYY-MM` prefix.
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: Money,
        rules: &CategoryRuleSet,
    ) -> MonitorResult<Self> {
        let date = date.into().trim().to_string();
        let description = description.into().trim().to_string();
        let month = extract_month(&date)?;
        let category = categorize(&description, rules);

        Ok(Self {
            date,
            description,
            amount,
            category,
            month,
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// The `YYYY-MM` key derived from the date
    pub fn month(&self) -> &str {
        &self.month
    }

    /// Check if this expense belongs to `month` (exact key equality)
    pub fn is_in_month(&self, month: &str) -> bool {
        self.month == month
    }

    /// Apply an edit, recomputing derived fields for whatever changed
    ///
    /// Every provided value is validated before anything is written, so a
    /// failed edit leaves the record untouched.
    pub fn apply_edit(&mut self, edit: ExpenseEdit, rules: &CategoryRuleSet) -> MonitorResult<()> {
        let new_date = match edit.date {
            Some(date) => {
                let date = date.trim().to_string();
                let month = extract_month(&date)?;
                Some((date, month))
            }
            None => None,
        };

        let new_description = match edit.description {
            Some(description) => {
                let description = description.trim().to_string();
                let category = categorize(&description, rules);
                Some((description, category))
            }
            None => None,
        };

        if let Some((date, month)) = new_date {
            self.date = date;
            self.month = month;
        }
        if let Some((description, category)) = new_description {
            self.description = description;
            self.category = category;
        }
        if let Some(amount) = edit.amount {
            self.amount = amount;
        }

        Ok(())
    }

    /// Re-derive the category from the description with a (changed) rule set
    ///
    /// Returns true if the category changed.
    pub fn recategorize(&mut self, rules: &CategoryRuleSet) -> bool {
        let category = categorize(&self.description, rules);
        if category != self.category {
            self.category = category;
            true
        } else {
            false
        }
    }

    /// Relabel this expense after its category was renamed
    pub(crate) fn relabel_category(&mut self, from: &str, to: &str) -> bool {
        if self.category == from {
            self.category = to.to_string();
            true
        } else {
            false
        }
    }

    /// Description safe for a single-line CSV row (CR/LF replaced by spaces)
    pub fn single_line_description(&self) -> String {
        self.description.replace(&['\r', '\n'][..], " ")
    }

    /// Check that a description is acceptable for manual entry
    pub fn validate_description(description: &str) -> MonitorResult<()> {
        if description.trim().is_empty() {
            return Err(MonitorError::Validation(
                "Description cannot be empty".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]",
            self.date, self.description, self.amount, self.category
        )
    }
}
