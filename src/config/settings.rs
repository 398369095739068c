//! User settings for Expense Monitor
//!
//! Holds the category rule set, the currency symbol used for display and
//! optional overrides for the working expense and budget files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::MonitorPaths;
use crate::error::MonitorError;
use crate::models::CategoryRuleSet;
use crate::storage::write_json_atomic;

/// User settings for Expense Monitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown before amounts (empty by default)
    #[serde(default)]
    pub currency_symbol: String,

    /// Category rules in priority order
    #[serde(default = "CategoryRuleSet::default_rules")]
    pub category_rules: CategoryRuleSet,

    /// Whether the text spending chart may be drawn
    #[serde(default = "default_charts_enabled")]
    pub charts_enabled: bool,

    /// Working expense file, if not the default under the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses_file: Option<PathBuf>,

    /// Working budget file, if not the default under the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgets_file: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_charts_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: String::new(),
            category_rules: CategoryRuleSet::default_rules(),
            charts_enabled: default_charts_enabled(),
            expenses_file: None,
            budgets_file: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &MonitorPaths) -> Result<Self, MonitorError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| MonitorError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MonitorError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MonitorPaths) -> Result<(), MonitorError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Expense file to work with
    pub fn expenses_path(&self, paths: &MonitorPaths) -> PathBuf {
        self.expenses_file
            .clone()
            .unwrap_or_else(|| paths.expenses_file())
    }

    /// Budget file to work with
    pub fn budgets_path(&self, paths: &MonitorPaths) -> PathBuf {
        self.budgets_file
            .clone()
            .unwrap_or_else(|| paths.budgets_file())
    }
}
