//! Keyword categorization
//!
//! Rules are scanned front to back and the first rule with a keyword that
//! occurs in the lower-cased description wins. Keyword order inside a rule
//! and match position inside the description play no part in the result.

use crate::models::{CategoryRuleSet, DEFAULT_CATEGORY};

/// Pick the category for a description
///
/// Returns [`DEFAULT_CATEGORY`] when no rule matches.
///
/// # Examples
/// ```
/// use expense_monitor::models::{CategoryRule, CategoryRuleSet};
/// use expense_monitor::services::categorize;
///
/// let rules = CategoryRuleSet::new(vec![
///     CategoryRule::new("Transport", ["uber", "taxi"]),
///     CategoryRule::new("Food", ["coffee", "cafe"]),
/// ]);
/// assert_eq!(categorize("Coffee at Cafe", &rules), "Food");
/// assert_eq!(categorize("Bookshop", &rules), "Other");
/// ```
pub fn categorize(description: &str, rules: &CategoryRuleSet) -> String {
    let lowered = description.to_lowercase();

    rules
        .iter()
        .find(|rule| rule.matches_lowered(&lowered))
        .map(|rule| rule.name.clone())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}
