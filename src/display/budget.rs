//! Budget display formatting
//!
//! Budgets are shown per month with categories sorted by name (ignoring
//! case), next to what has been spent in that category so far.

use crate::models::Money;
use crate::session::Session;

use super::report::{format_percentage, separator};

/// Format budgets for one month, or for every month when `month` is `None`
pub fn format_budget_list(session: &Session, month: Option<&str>, currency: &str) -> String {
    let months: Vec<&str> = match month {
        Some(month) => vec![month],
        None => session.budgets().months().collect(),
    };

    let mut output = String::new();
    for month in months {
        let Some(budgets) = session.budgets().month(month) else {
            output.push_str(&format!("No budgets set for {}.\n", month));
            continue;
        };
        let totals = session.monthly_totals(month);

        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&format!("Budgets for {}\n", month));
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>8}\n",
            "Category", "Budget", "Spent", "Used"
        ));
        output.push_str(&separator(55));
        output.push('\n');

        for (category, amount) in budgets.sorted() {
            let spent = totals.spent(category);
            let used = if amount.is_positive() {
                format_percentage(spent.as_f64() / amount.as_f64() * 100.0)
            } else {
                "-".to_string()
            };
            output.push_str(&format!(
                "{:<20} {:>12} {:>12} {:>8}\n",
                category,
                amount.format_with_symbol(currency),
                spent.format_with_symbol(currency),
                used
            ));
        }

        let budgeted: Money = budgets.total();
        output.push_str(&separator(55));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12}\n",
            "TOTAL",
            budgeted.format_with_symbol(currency)
        ));
    }

    if output.is_empty() {
        output.push_str("No budgets found.\n");
    }
    output
}
