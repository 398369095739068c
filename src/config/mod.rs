//! Configuration module for Expense Monitor
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence (category rules, working files)

pub mod paths;
pub mod settings;

pub use paths::MonitorPaths;
pub use settings::Settings;
