//! Raw row validation
//!
//! Turns the fields of one delimited row into an [`ExpenseRecord`]. Counting
//! accepted and rejected rows is left to the caller.

use crate::error::{MonitorError, MonitorResult};
use crate::models::{extract_month, parse_amount, BudgetEntry, CategoryRuleSet, ExpenseRecord};

/// Header token of an expense file
pub const EXPENSE_HEADER_TOKEN: &str = "date";

/// Header token of a budget file
pub const BUDGET_HEADER_TOKEN: &str = "month";

/// Minimum number of fields in an expense row (date, description, amount)
pub const MIN_EXPENSE_FIELDS: usize = 3;

/// Minimum number of fields in a budget row (month, category, budget)
pub const MIN_BUDGET_FIELDS: usize = 3;

/// Build an expense from raw row fields
///
/// Only the first three fields are read; a stored category or month in the
/// trailing fields is ignored and recomputed. Every failure comes back as
/// `InvalidRow` carrying the underlying reason.
pub fn build_record<S: AsRef<str>>(
    fields: &[S],
    rules: &CategoryRuleSet,
) -> MonitorResult<ExpenseRecord> {
    if fields.len() < MIN_EXPENSE_FIELDS {
        return Err(MonitorError::InvalidRow(format!(
            "expected at least {} fields, found {}",
            MIN_EXPENSE_FIELDS,
            fields.len()
        )));
    }

    let date = fields[0].as_ref().trim();
    let description = fields[1].as_ref().trim();
    let amount =
        parse_amount(fields[2].as_ref()).map_err(|e| MonitorError::InvalidRow(e.to_string()))?;

    ExpenseRecord::new(date, description, amount, rules)
        .map_err(|e| MonitorError::InvalidRow(e.to_string()))
}

/// Build a budget line from raw `month,category,budget` fields
pub fn build_budget_entry<S: AsRef<str>>(fields: &[S]) -> MonitorResult<BudgetEntry> {
    if fields.len() < MIN_BUDGET_FIELDS {
        return Err(MonitorError::InvalidRow(format!(
            "expected at least {} fields, found {}",
            MIN_BUDGET_FIELDS,
            fields.len()
        )));
    }

    let month =
        extract_month(fields[0].as_ref()).map_err(|e| MonitorError::InvalidRow(e.to_string()))?;

    let category = fields[1].as_ref().trim();
    if category.is_empty() {
        return Err(MonitorError::InvalidRow("category is empty".into()));
    }

    let amount =
        parse_amount(fields[2].as_ref()).map_err(|e| MonitorError::InvalidRow(e.to_string()))?;

    Ok(BudgetEntry {
        month,
        category: category.to_string(),
        amount,
    })
}

/// Check whether a row is a header, i.e. its first field equals `token`
/// ignoring case
pub fn is_header_row<S: AsRef<str>>(fields: &[S], token: &str) -> bool {
    fields
        .first()
        .map(|first| first.as_ref().trim().eq_ignore_ascii_case(token))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryRule, Money};

    fn rules() -> CategoryRuleSet {
        CategoryRuleSet::new(vec![
            CategoryRule::new("Transport", ["uber", "taxi"]),
            CategoryRule::new("Food", ["coffee", "cafe"]),
        ])
    }

    #[test]
    fn test_build_valid_row() {
        let record = build_record(&["2025-11-02", "Coffee at Cafe", "4.50"], &rules()).unwrap();
        assert_eq!(record.month(), "2025-11");
        assert_eq!(record.category(), "Food");
        assert_eq!(record.amount(), Money::from_cents(450));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let record = build_record(&[" 2025-11-03 ", " Uber ride ", " 12,00 "], &rules()).unwrap();
        assert_eq!(record.date(), "2025-11-03");
        assert_eq!(record.description(), "Uber ride");
        assert_eq!(record.amount(), Money::from_cents(1200));
    }

    #[test]
    fn test_trailing_fields_ignored() {
        let record = build_record(
            &["2025-11-03", "Uber ride", "12.00", "Food", "1999-01"],
            &rules(),
        )
        .unwrap();
        assert_eq!(record.category(), "Transport");
        assert_eq!(record.month(), "2025-11");
    }

    #[test]
    fn test_too_few_fields() {
        let err = build_record(&["2025-11-02", "Coffee"], &rules()).unwrap_err();
        assert!(matches!(err, MonitorError::InvalidRow(_)));
        assert!(build_record::<&str>(&[], &rules()).is_err());
    }

    #[test]
    fn test_bad_amount_is_invalid_row() {
        let err = build_record(&["2025-11-02", "Coffee", "abc"], &rules()).unwrap_err();
        match err {
            MonitorError::InvalidRow(reason) => assert!(reason.contains("abc")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_date_is_invalid_row() {
        let err = build_record(&["02/11/2025", "Coffee", "1.00"], &rules()).unwrap_err();
        assert!(matches!(err, MonitorError::InvalidRow(_)));
    }

    #[test]
    fn test_negative_amount_accepted() {
        let record = build_record(&["2025-11-02", "Cafe refund", "-3.00"], &rules()).unwrap();
        assert_eq!(record.amount(), Money::from_cents(-300));
    }

    #[test]
    fn test_build_budget_entry() {
        let entry = build_budget_entry(&["2025-11", " Food ", "50"]).unwrap();
        assert_eq!(entry.month, "2025-11");
        assert_eq!(entry.category, "Food");
        assert_eq!(entry.amount, Money::from_cents(5000));

        // A full date is cut down to its month
        let entry = build_budget_entry(&["2025-11-15", "Rent", "899,999"]).unwrap();
        assert_eq!(entry.month, "2025-11");
        assert_eq!(entry.amount, Money::from_cents(90000));
    }

    #[test]
    fn test_build_budget_entry_rejects() {
        for fields in [
            vec!["2025-11", "Food"],
            vec!["Nov", "Food", "50"],
            vec!["2025-11", "  ", "50"],
            vec!["2025-11", "Food", "fifty"],
        ] {
            let err = build_budget_entry(&fields).unwrap_err();
            assert!(matches!(err, MonitorError::InvalidRow(_)), "{:?}", fields);
        }
    }

    #[test]
    fn test_is_header_row() {
        assert!(is_header_row(&["Date", "description", "amount"], EXPENSE_HEADER_TOKEN));
        assert!(is_header_row(&[" DATE "], EXPENSE_HEADER_TOKEN));
        assert!(is_header_row(&["month", "category", "budget"], BUDGET_HEADER_TOKEN));
        assert!(!is_header_row(&["2025-11-02", "x", "1"], EXPENSE_HEADER_TOKEN));
        assert!(!is_header_row::<&str>(&[], EXPENSE_HEADER_TOKEN));
    }
}
