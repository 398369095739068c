//! Working session
//!
//! A [`Session`] owns everything the analysis needs: the expense records,
//! the budget store and the active rule set. It is created by the caller
//! and passed explicitly to every operation, so nothing depends on global
//! state.

use tracing::info;

use crate::error::{MonitorError, MonitorResult};
use crate::models::{
    extract_month, BudgetEntry, BudgetStore, CategoryRuleSet, ExpenseEdit, ExpenseRecord, Money,
};
use crate::services::{aggregate, compare_to_budgets, filter_by_month, CategoryTotals, MonthlySummaryRow};

/// Expense records, budgets and category rules for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    records: Vec<ExpenseRecord>,
    budgets: BudgetStore,
    rules: CategoryRuleSet,
}

impl Session {
    /// Create an empty session using `rules` for categorization
    pub fn new(rules: CategoryRuleSet) -> Self {
        Self {
            records: Vec::new(),
            budgets: BudgetStore::new(),
            rules,
        }
    }

    /// Create a session from already loaded data
    pub fn with_data(
        records: Vec<ExpenseRecord>,
        budgets: BudgetStore,
        rules: CategoryRuleSet,
    ) -> Self {
        Self {
            records,
            budgets,
            rules,
        }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn budgets(&self) -> &BudgetStore {
        &self.budgets
    }

    pub fn rules(&self) -> &CategoryRuleSet {
        &self.rules
    }

    /// Budgets for bulk loading; later entries overwrite earlier ones
    pub fn budgets_mut(&mut self) -> &mut BudgetStore {
        &mut self.budgets
    }

    pub(crate) fn parts_mut(
        &mut self,
    ) -> (&mut Vec<ExpenseRecord>, &mut BudgetStore, &mut CategoryRuleSet) {
        (&mut self.records, &mut self.budgets, &mut self.rules)
    }

    // === Expenses ===

    /// Add an expense entered by hand
    pub fn add_expense(
        &mut self,
        date: &str,
        description: &str,
        amount: Money,
    ) -> MonitorResult<&ExpenseRecord> {
        ExpenseRecord::validate_description(description)?;
        let record = ExpenseRecord::new(date, description, amount, &self.rules)?;
        info!(month = record.month(), category = record.category(), "added expense");

        self.records.push(record);
        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    /// Append records produced by an import
    pub fn extend_records(&mut self, records: impl IntoIterator<Item = ExpenseRecord>) {
        self.records.extend(records);
    }

    /// Records of one month in their original order
    pub fn expenses_for_month(&self, month: &str) -> Vec<&ExpenseRecord> {
        filter_by_month(&self.records, month)
    }

    /// Months that have at least one expense, sorted
    pub fn expense_months(&self) -> Vec<String> {
        let mut months: Vec<String> = self.records.iter().map(|r| r.month().to_string()).collect();
        months.sort();
        months.dedup();
        months
    }

    /// Position in `records` of the `index`-th expense (0-based) of `month`
    fn locate(&self, month: &str, index: usize) -> MonitorResult<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.is_in_month(month))
            .nth(index)
            .map(|(position, _)| position)
            .ok_or_else(|| MonitorError::expense_not_found(month, index + 1))
    }

    /// Edit the `index`-th expense (0-based) within `month`
    ///
    /// A failed edit leaves the record as it was.
    pub fn edit_expense(
        &mut self,
        month: &str,
        index: usize,
        edit: ExpenseEdit,
    ) -> MonitorResult<&ExpenseRecord> {
        let month = extract_month(month)?;
        let position = self.locate(&month, index)?;

        if let Some(description) = &edit.description {
            ExpenseRecord::validate_description(description)?;
        }

        let record = &mut self.records[position];
        record.apply_edit(edit, &self.rules)?;
        Ok(record)
    }

    /// Delete the `index`-th expense (0-based) within `month`
    pub fn delete_expense(&mut self, month: &str, index: usize) -> MonitorResult<ExpenseRecord> {
        let month = extract_month(month)?;
        let position = self.locate(&month, index)?;
        Ok(self.records.remove(position))
    }

    /// Remove every expense, returning how many were removed
    pub fn clear_expenses(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    // === Budgets ===

    /// Set the budget for (month, category), returning the previous amount
    ///
    /// `month` may also be a full date; it is cut down to `YYYY-MM`.
    pub fn set_budget(
        &mut self,
        month: &str,
        category: &str,
        amount: Money,
    ) -> MonitorResult<Option<Money>> {
        let month = extract_month(month)?;
        let category = validate_budget_category(category)?;
        Ok(self.budgets.set(month, category, amount))
    }

    /// Rename and/or change an existing budget
    pub fn edit_budget(
        &mut self,
        month: &str,
        category: &str,
        new_category: Option<&str>,
        new_amount: Option<Money>,
    ) -> MonitorResult<BudgetEntry> {
        let month = extract_month(month)?;
        let category = category.trim();
        let current = self
            .budgets
            .get(&month, category)
            .ok_or_else(|| MonitorError::budget_not_found(&month, category))?;

        let new_category = match new_category {
            Some(name) => validate_budget_category(name)?,
            None => category,
        };
        let amount = new_amount.unwrap_or(current);

        if new_category == category {
            self.budgets.set(month.clone(), category, amount);
        } else {
            self.budgets.remove(&month, category);
            self.budgets.set(month.clone(), new_category, amount);
        }

        Ok(BudgetEntry {
            month,
            category: new_category.to_string(),
            amount,
        })
    }

    /// Remove the budget for (month, category)
    pub fn remove_budget(&mut self, month: &str, category: &str) -> MonitorResult<Money> {
        let month = extract_month(month)?;
        let category = category.trim();
        self.budgets
            .remove(&month, category)
            .ok_or_else(|| MonitorError::budget_not_found(&month, category))
    }

    /// Remove every budget, returning how many were removed
    pub fn clear_budgets(&mut self) -> usize {
        let count = self.budgets.len();
        self.budgets.clear();
        count
    }

    // === Analysis ===

    /// Spending per category for a month
    pub fn monthly_totals(&self, month: &str) -> CategoryTotals {
        aggregate(filter_by_month(&self.records, month))
    }

    /// Budget comparison rows for a month
    pub fn summary(&self, month: &str) -> Vec<MonthlySummaryRow> {
        compare_to_budgets(&self.monthly_totals(month), &self.budgets, month)
    }
}

fn validate_budget_category(category: &str) -> MonitorResult<&str> {
    let category = category.trim();
    if category.is_empty() {
        return Err(MonitorError::Validation(
            "Budget category cannot be empty".into(),
        ));
    }
    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryRule;
    use crate::services::BudgetStatus;

    fn session() -> Session {
        Session::new(CategoryRuleSet::new(vec![
            CategoryRule::new("Transport", ["uber", "taxi"]),
            CategoryRule::new("Food", ["coffee", "cafe"]),
        ]))
    }

    fn cents(value: i64) -> Money {
        Money::from_cents(value)
    }

    #[test]
    fn test_add_expense() {
        let mut session = session();
        let record = session
            .add_expense("2025-11-02", "Coffee at Cafe", cents(450))
            .unwrap();
        assert_eq!(record.category(), "Food");
        assert_eq!(session.records().len(), 1);

        assert!(session.add_expense("bad", "Coffee", cents(1)).is_err());
        assert!(session.add_expense("2025-11-02", "  ", cents(1)).is_err());
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn test_edit_expense_within_month() {
        let mut session = session();
        session.add_expense("2025-11-02", "Coffee", cents(450)).unwrap();
        session.add_expense("2025-10-02", "Taxi", cents(900)).unwrap();
        session.add_expense("2025-11-03", "Uber", cents(1200)).unwrap();

        // Second November expense is the Uber ride
        let edit = ExpenseEdit {
            description: Some("Cafe".into()),
            ..Default::default()
        };
        let record = session.edit_expense("2025-11", 1, edit).unwrap();
        assert_eq!(record.category(), "Food");
        assert_eq!(record.amount(), cents(1200));

        let err = session
            .edit_expense("2025-11", 2, ExpenseEdit::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_edit_date_moves_expense_to_other_month() {
        let mut session = session();
        session.add_expense("2025-11-02", "Coffee", cents(450)).unwrap();

        let edit = ExpenseEdit {
            date: Some("2025-12-24".into()),
            ..Default::default()
        };
        session.edit_expense("2025-11", 0, edit).unwrap();

        assert!(session.expenses_for_month("2025-11").is_empty());
        assert_eq!(session.expenses_for_month("2025-12").len(), 1);
    }

    #[test]
    fn test_failed_edit_leaves_record() {
        let mut session = session();
        session.add_expense("2025-11-02", "Coffee", cents(450)).unwrap();
        let before = session.clone();

        let edit = ExpenseEdit {
            date: Some("nope".into()),
            amount: Some(cents(1)),
            ..Default::default()
        };
        assert!(session.edit_expense("2025-11", 0, edit).is_err());
        assert_eq!(session, before);
    }

    #[test]
    fn test_delete_and_clear_expenses() {
        let mut session = session();
        session.add_expense("2025-11-02", "Coffee", cents(450)).unwrap();
        session.add_expense("2025-11-03", "Uber", cents(1200)).unwrap();

        let removed = session.delete_expense("2025-11", 0).unwrap();
        assert_eq!(removed.description(), "Coffee");
        assert!(session.delete_expense("2025-11", 5).is_err());
        assert_eq!(session.clear_expenses(), 1);
        assert!(session.records().is_empty());
    }

    #[test]
    fn test_expense_months() {
        let mut session = session();
        session.add_expense("2025-11-02", "Coffee", cents(1)).unwrap();
        session.add_expense("2025-01-02", "Coffee", cents(1)).unwrap();
        session.add_expense("2025-11-09", "Coffee", cents(1)).unwrap();
        assert_eq!(session.expense_months(), vec!["2025-01", "2025-11"]);
    }

    #[test]
    fn test_budget_operations() {
        let mut session = session();
        assert_eq!(session.set_budget("2025-11-15", " Food ", cents(5000)).unwrap(), None);
        assert_eq!(session.budgets().get("2025-11", "Food"), Some(cents(5000)));
        assert!(session.set_budget("2025-11", "", cents(1)).is_err());
        assert!(session.set_budget("Nov", "Food", cents(1)).is_err());

        let entry = session
            .edit_budget("2025-11", "Food", Some("Groceries"), None)
            .unwrap();
        assert_eq!(entry.category, "Groceries");
        assert_eq!(entry.amount, cents(5000));
        assert_eq!(session.budgets().get("2025-11", "Food"), None);

        session
            .edit_budget("2025-11", "Groceries", None, Some(cents(6000)))
            .unwrap();
        assert_eq!(session.budgets().get("2025-11", "Groceries"), Some(cents(6000)));

        assert!(session
            .edit_budget("2025-11", "Rent", None, Some(cents(1)))
            .unwrap_err()
            .is_not_found());

        assert_eq!(session.remove_budget("2025-11", "Groceries").unwrap(), cents(6000));
        assert!(session.remove_budget("2025-11", "Groceries").is_err());

        session.set_budget("2025-11", "Food", cents(1)).unwrap();
        session.set_budget("2025-12", "Food", cents(1)).unwrap();
        assert_eq!(session.clear_budgets(), 2);
        assert!(session.budgets().is_empty());
    }

    #[test]
    fn test_summary_pipeline() {
        let mut session = session();
        session.add_expense("2025-11-02", "Coffee at Cafe", cents(450)).unwrap();
        session.add_expense("2025-11-03", "Uber ride", cents(1200)).unwrap();
        session.add_expense("2025-10-03", "Uber ride", cents(9900)).unwrap();
        session.set_budget("2025-11", "Food", cents(5000)).unwrap();

        let totals = session.monthly_totals("2025-11");
        assert_eq!(totals.get("Transport"), Some(cents(1200)));

        let rows = session.summary("2025-11");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Food");
        assert_eq!(rows[0].remaining, Some(cents(4550)));
        assert_eq!(rows[1].status, BudgetStatus::NoBudget);
    }
}
