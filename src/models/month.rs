//! Month keys
//!
//! Expenses and budgets are grouped by a `YYYY-MM` text key. The key is taken
//! from the first seven characters of a date without any calendar checks:
//! "2025-13" and "2025-00" are accepted as long as the positions hold digits.

use chrono::Datelike;

use crate::error::{MonitorError, MonitorResult};

/// Length of a `YYYY-MM` month key
pub const MONTH_KEY_LEN: usize = 7;

/// Extract the `YYYY-MM` month key from a date such as `2025-11-01`
///
/// Also accepts a bare month key, so the same function normalizes user-entered
/// months and budget rows.
///
/// # Examples
/// ```
/// use expense_monitor::models::extract_month;
/// assert_eq!(extract_month("2025-11-01").unwrap(), "2025-11");
/// assert!(extract_month("not-a-date").is_err());
/// ```
pub fn extract_month(date: &str) -> MonitorResult<String> {
    let s = date.trim();
    let bytes = s.as_bytes();

    if bytes.len() < MONTH_KEY_LEN {
        return Err(MonitorError::InvalidDate(s.to_string()));
    }

    let year_ok = bytes[..4].iter().all(u8::is_ascii_digit);
    let separator_ok = bytes[4] == b'-';
    let month_ok = bytes[5..MONTH_KEY_LEN].iter().all(u8::is_ascii_digit);

    if !(year_ok && separator_ok && month_ok) {
        return Err(MonitorError::InvalidDate(s.to_string()));
    }

    // All checked bytes are ASCII, so slicing at 7 is a char boundary
    Ok(s[..MONTH_KEY_LEN].to_string())
}

/// Check whether text is exactly a `YYYY-MM` key
pub fn is_month_key(s: &str) -> bool {
    s.len() == MONTH_KEY_LEN && extract_month(s).is_ok()
}

/// Month key for today's local date
pub fn current_month() -> String {
    let today = chrono::Local::now().date_naive();
    format!("{:04}-{:02}", today.year(), today.month())
}

/// Build a month key from a separately entered year and month number
///
/// Unlike [`extract_month`], this path range-checks the month (1-12).
pub fn month_from_parts(year: &str, month: &str) -> MonitorResult<String> {
    let year = year.trim();
    let month = month.trim();

    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MonitorError::Validation(format!(
            "Invalid year '{}'. Use YYYY",
            year
        )));
    }

    let number: u32 = month
        .parse()
        .map_err(|_| MonitorError::Validation(format!("Invalid month '{}'", month)))?;
    if !(1..=12).contains(&number) {
        return Err(MonitorError::Validation(format!(
            "Invalid month {}. Please enter a value between 01 and 12",
            number
        )));
    }

    extract_month(&format!("{}-{:02}", year, number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_date() {
        assert_eq!(extract_month("2025-11-01").unwrap(), "2025-11");
        assert_eq!(extract_month("  2025-01-31  ").unwrap(), "2025-01");
    }

    #[test]
    fn test_extract_from_month_key() {
        assert_eq!(extract_month("2025-11").unwrap(), "2025-11");
    }

    #[test]
    fn test_extract_does_not_range_check() {
        assert_eq!(extract_month("2025-13-01").unwrap(), "2025-13");
        assert_eq!(extract_month("2025-00").unwrap(), "2025-00");
    }

    #[test]
    fn test_extract_rejects_malformed() {
        for input in ["not-a-date", "2025-1", "", "2025/11/01", "25-11-01", "2025-1a-01", "abcd-11"] {
            let err = extract_month(input).unwrap_err();
            assert!(
                matches!(err, MonitorError::InvalidDate(_)),
                "expected InvalidDate for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_extract_rejects_multibyte_without_panicking() {
        assert!(extract_month("2025-1é").is_err());
        assert!(extract_month("日本語のテキスト").is_err());
    }

    #[test]
    fn test_is_month_key() {
        assert!(is_month_key("2025-11"));
        assert!(!is_month_key("2025-11-01"));
        assert!(!is_month_key("2025-1"));
    }

    #[test]
    fn test_current_month_shape() {
        assert!(is_month_key(&current_month()));
    }

    #[test]
    fn test_month_from_parts() {
        assert_eq!(month_from_parts("2025", "3").unwrap(), "2025-03");
        assert_eq!(month_from_parts("2025", "11").unwrap(), "2025-11");
        assert!(month_from_parts("2025", "13").is_err());
        assert!(month_from_parts("2025", "0").is_err());
        assert!(month_from_parts("25", "01").is_err());
        assert!(month_from_parts("2025", "x").is_err());
    }
}
