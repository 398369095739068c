//! CSV import
//!
//! Bulk-loads expense and budget rows. A bad row is counted, logged and
//! skipped; it never stops the rest of the file from loading.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use super::record::{
    build_budget_entry, build_record, is_header_row, BUDGET_HEADER_TOKEN, EXPENSE_HEADER_TOKEN,
};
use crate::error::{MonitorError, MonitorResult};
use crate::models::{BudgetStore, CategoryRuleSet, ExpenseRecord};

/// A rejected input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line number in the input
    pub line: u64,
    pub message: String,
}

/// Counts from a completed import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    /// Rows turned into records
    pub loaded: usize,
    /// Rows rejected as invalid
    pub skipped: usize,
    /// Whether a header row was found and skipped
    pub header_skipped: bool,
    /// Why each skipped row was rejected
    pub errors: Vec<RowError>,
}

impl ImportResult {
    /// Check if the input had no rows at all
    pub fn is_empty_input(&self) -> bool {
        self.loaded == 0 && self.skipped == 0 && !self.header_skipped
    }

    fn reject(&mut self, line: u64, error: &MonitorError) {
        debug!(line, %error, "skipping row");
        self.skipped += 1;
        self.errors.push(RowError {
            line,
            message: error.to_string(),
        });
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

/// Walk the rows of a CSV input, handing each data row to `handle`
///
/// Blank lines are ignored and a header in the first row is skipped.
fn for_each_row<R, F>(reader: R, header_token: &str, mut handle: F) -> MonitorResult<ImportResult>
where
    R: Read,
    F: FnMut(&StringRecord) -> MonitorResult<()>,
{
    let mut result = ImportResult::default();
    let mut first_row = true;

    for (index, row) in csv_reader(reader).records().enumerate() {
        let fallback_line = index as u64 + 1;
        let record = match row {
            Ok(record) => record,
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(fallback_line);
                if !e.is_io_error() {
                    result.reject(line, &MonitorError::InvalidRow(e.to_string()));
                    first_row = false;
                    continue;
                }
                return Err(MonitorError::Import(e.to_string()));
            }
        };

        if is_blank(&record) {
            continue;
        }

        let fields: Vec<&str> = record.iter().collect();
        if first_row {
            first_row = false;
            if is_header_row(&fields, header_token) {
                result.header_skipped = true;
                continue;
            }
        }

        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(fallback_line);
        match handle(&record) {
            Ok(()) => result.loaded += 1,
            Err(e) => result.reject(line, &e),
        }
    }

    Ok(result)
}

/// Read expense rows (`date,description,amount[,category,month]`)
///
/// Categories are always recomputed from `rules`.
pub fn import_expenses<R: Read>(
    reader: R,
    rules: &CategoryRuleSet,
) -> MonitorResult<(Vec<ExpenseRecord>, ImportResult)> {
    let mut records = Vec::new();

    let result = for_each_row(reader, EXPENSE_HEADER_TOKEN, |row| {
        let fields: Vec<&str> = row.iter().collect();
        records.push(build_record(&fields, rules)?);
        Ok(())
    })?;

    Ok((records, result))
}

/// Read budget rows (`month,category,budget`) into `store`
///
/// A later row for the same (month, category) overwrites an earlier one.
pub fn import_budgets<R: Read>(reader: R, store: &mut BudgetStore) -> MonitorResult<ImportResult> {
    for_each_row(reader, BUDGET_HEADER_TOKEN, |row| {
        let fields: Vec<&str> = row.iter().collect();
        let entry = build_budget_entry(&fields)?;
        store.set(entry.month, entry.category, entry.amount);
        Ok(())
    })
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
    fn test_import_expenses_counts() {
        let data = "date,description,amount,category,month\n\
                    2025-11-02,Coffee at Cafe,4.50\n\
                    \n\
                    2025-11-03,Uber ride,12.00,Food,2025-11\n\
                    2025-11-04,Broken\n\
                    not-a-date,Taxi,3.00\n\
                    2025-11-05,Cafe,abc\n";

        let (records, result) = import_expenses(data.as_bytes(), &rules()).unwrap();

        assert_eq!(result.loaded, 2);
        assert_eq!(result.skipped, 3);
        assert!(result.header_skipped);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].category(), "Transport");

        let lines: Vec<_> = result.errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![5, 6, 7]);
    }

    #[test]
    fn test_import_without_header() {
        let data = "2025-11-02,Coffee,4.50\n2025-11-03,Uber,12.00\n";
        let (records, result) = import_expenses(data.as_bytes(), &rules()).unwrap();

        assert_eq!(result.loaded, 2);
        assert_eq!(result.skipped, 0);
        assert!(!result.header_skipped);
        assert_eq!(records[0].amount(), Money::from_cents(450));
    }

    #[test]
    fn test_header_only_detected_on_first_row() {
        let data = "2025-11-02,Coffee,4.50\nDate,description,amount\n";
        let (_, result) = import_expenses(data.as_bytes(), &rules()).unwrap();
        assert_eq!(result.loaded, 1);
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn test_quoted_description_with_comma() {
        let data = "2025-11-02,\"Coffee, large\",4.50\n";
        let (records, _) = import_expenses(data.as_bytes(), &rules()).unwrap();
        assert_eq!(records[0].description(), "Coffee, large");
    }

    #[test]
    fn test_empty_input() {
        let (records, result) = import_expenses("".as_bytes(), &rules()).unwrap();
        assert!(records.is_empty());
        assert!(result.is_empty_input());

        let (_, result) = import_expenses("date,description,amount\n".as_bytes(), &rules()).unwrap();
        assert!(!result.is_empty_input());
    }

    #[test]
    fn test_import_budgets() {
        let data = "month,category,budget\n\
                    2025-11,Food,50\n\
                    2025-11,Transport,30,5\n\
                    2025-11,Food,60\n\
                    13-2025,Food,1\n\
                    2025-11,,10\n\
                    2025-12,Rent\n";

        let mut store = BudgetStore::new();
        let result = import_budgets(data.as_bytes(), &mut store).unwrap();

        assert_eq!(result.loaded, 3);
        assert_eq!(result.skipped, 3);
        assert_eq!(store.get("2025-11", "Food"), Some(Money::from_cents(6000)));
        assert_eq!(store.get("2025-11", "Transport"), Some(Money::from_cents(3000)));
        assert!(store.month("2025-12").is_none());
    }
}
