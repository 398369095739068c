//! Custom error types for Expense Monitor
//!
//! Row-level failures (`InvalidAmount`, `InvalidDate`, `InvalidRow`) are
//! recoverable: callers skip the offending row and keep going. The remaining
//! variants cover the file, configuration and command layers.

use thiserror::Error;

/// The main error type for Expense Monitor operations
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Amount text could not be parsed as a number
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    /// Date text does not start with a `YYYY-MM` key
    #[error("Invalid date: '{0}'")]
    InvalidDate(String),

    /// A raw input row could not be turned into a record
    #[error("Invalid row: {0}")]
    InvalidRow(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user-supplied values
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl MonitorError {
    /// Create a "not found" error for category rules
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(month: &str, category: &str) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: format!("{} / {}", month, category),
        }
    }

    /// Create a "not found" error for expenses, addressed by month and 1-based number
    pub fn expense_not_found(month: &str, number: usize) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: format!("#{} in {}", number, month),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error only affects a single input row
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_) | Self::InvalidDate(_) | Self::InvalidRow(_)
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for MonitorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MonitorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for MonitorError {
    fn from(err: csv::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for Expense Monitor operations
pub type MonitorResult<T> = Result<T, MonitorError>;
