//! CSV export of expenses and budgets
//!
//! Produces the same formats the importers read back: one record per line,
//! fields quoted only when they contain a delimiter or quote.

use std::io::Write;

use crate::error::{MonitorError, MonitorResult};
use crate::models::{BudgetStore, ExpenseRecord};

/// Header of the expense file
pub const EXPENSE_COLUMNS: [&str; 5] = ["date", "description", "amount", "category", "month"];

/// Header of the budget file
pub const BUDGET_COLUMNS: [&str; 3] = ["month", "category", "budget"];

fn export_error(e: impl std::fmt::Display) -> MonitorError {
    MonitorError::Export(e.to_string())
}

fn single_line(text: &str) -> String {
    text.replace(&['\r', '\n'][..], " ")
}

/// Write expenses with a `date,description,amount,category,month` header
///
/// Line breaks inside descriptions are replaced by spaces.
pub fn export_expenses<'a, W, I>(records: I, writer: W) -> MonitorResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(EXPENSE_COLUMNS).map_err(export_error)?;

    for record in records {
        let description = record.single_line_description();
        let amount = record.amount().to_string();
        let category = single_line(record.category());
        out.write_record([
            record.date(),
            description.as_str(),
            amount.as_str(),
            category.as_str(),
            record.month(),
        ])
        .map_err(export_error)?;
    }

    out.flush().map_err(export_error)
}

/// Write budgets with a `month,category,budget` header
///
/// Months come out sorted; categories keep their order within a month.
pub fn export_budgets<W: Write>(store: &BudgetStore, writer: W) -> MonitorResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(BUDGET_COLUMNS).map_err(export_error)?;

    for entry in store.entries() {
        let category = single_line(&entry.category);
        let amount = entry.amount.to_string();
        out.write_record([entry.month.as_str(), category.as_str(), amount.as_str()])
            .map_err(export_error)?;
    }

    out.flush().map_err(export_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryRuleSet, Money};
    use crate::services::{import_budgets, import_expenses};

    fn record(date: &str, description: &str, cents: i64) -> ExpenseRecord {
        ExpenseRecord::new(
            date,
            description,
            Money::from_cents(cents),
            &CategoryRuleSet::default_rules(),
        )
        .unwrap()
    }

    #[test]
    fn test_export_expenses() {
        let records = vec![
            record("2025-11-02", "Coffee at Cafe", 450),
            record("2025-11-03", "Refund", -1200),
        ];

        let mut output = Vec::new();
        export_expenses(&records, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(
            text,
            "date,description,amount,category,month\n\
             2025-11-02,Coffee at Cafe,4.50,Food,2025-11\n\
             2025-11-03,Refund,-12.00,Other,2025-11\n"
        );
    }

    #[test]
    fn test_export_strips_line_breaks() {
        let records = vec![record("2025-11-02", "Lunch\nwith\r\nteam", 100)];

        let mut output = Vec::new();
        export_expenses(&records, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Lunch with  team"));
    }

    #[test]
    fn test_description_with_comma_reads_back() {
        let records = vec![record("2025-11-02", "Coffee, large", 450)];

        let mut output = Vec::new();
        export_expenses(&records, &mut output).unwrap();

        let (loaded, result) =
            import_expenses(output.as_slice(), &CategoryRuleSet::default_rules()).unwrap();
        assert_eq!(result.loaded, 1);
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_export_budgets_sorted_by_month() {
        let mut store = BudgetStore::new();
        store.set("2025-12", "Food", Money::from_cents(5000));
        store.set("2025-01", "Rent", Money::from_cents(90000));
        store.set("2025-01", "Bus", Money::from_cents(2550));

        let mut output = Vec::new();
        export_budgets(&store, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(
            text,
            "month,category,budget\n\
             2025-01,Rent,900.00\n\
             2025-01,Bus,25.50\n\
             2025-12,Food,50.00\n"
        );

        let mut reloaded = BudgetStore::new();
        import_budgets(text.as_bytes(), &mut reloaded).unwrap();
        assert_eq!(reloaded, store);
    }
}
