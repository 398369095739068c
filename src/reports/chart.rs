//! Spending chart
//!
//! A horizontal bar per category showing what was spent in a month, with a
//! `|` marking the budget where one is set. Charts are optional: callers
//! check [`chart_available`] first and the summary never relies on them.

use crate::config::Settings;
use crate::display::report::{format_bar, truncate};
use crate::models::Money;
use crate::session::Session;

const LABEL_WIDTH: usize = 16;

/// Whether charts can be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    Available,
    Unavailable(String),
}

impl Capability {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Check whether charts are enabled in settings
pub fn chart_available(settings: &Settings) -> Capability {
    if settings.charts_enabled {
        Capability::Available
    } else {
        Capability::Unavailable("Charts are disabled in settings".into())
    }
}

/// One bar of the chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    pub category: String,
    pub spent: Money,
    pub budget: Option<Money>,
}

/// Spending per category for one month
#[derive(Debug, Clone)]
pub struct SpendingChart {
    pub month: String,
    /// Bars sorted by category name, ignoring case
    pub bars: Vec<ChartBar>,
}

impl SpendingChart {
    /// Build the chart for a month from the session's expenses
    pub fn generate(session: &Session, month: &str) -> Self {
        let totals = session.monthly_totals(month);
        let month_budgets = session.budgets().month(month);

        let mut bars: Vec<ChartBar> = totals
            .iter()
            .map(|(category, spent)| ChartBar {
                category: category.to_string(),
                spent,
                budget: month_budgets.and_then(|b| b.get(category)),
            })
            .collect();
        bars.sort_by_key(|bar| bar.category.to_lowercase());

        Self {
            month: month.to_string(),
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Largest value the bars are scaled against
    fn scale(&self) -> Money {
        self.bars
            .iter()
            .flat_map(|bar| std::iter::once(bar.spent).chain(bar.budget))
            .max()
            .unwrap_or_default()
    }

    /// Render the chart with bars `width` characters wide
    pub fn format_terminal(&self, width: usize, currency: &str) -> String {
        let mut output = format!("Spending by Category ({})\n", self.month);

        if self.is_empty() {
            output.push_str("No categories found for the selected month.\n");
            return output;
        }

        let max = self.scale().as_f64();
        for bar in &self.bars {
            let mut line: Vec<char> = format_bar(bar.spent.as_f64(), max, width).chars().collect();

            if let Some(budget) = bar.budget {
                if max > 0.0 && budget.is_positive() {
                    let position = ((budget.as_f64() / max) * width as f64).round() as usize;
                    let position = position.min(width.saturating_sub(1));
                    if let Some(slot) = line.get_mut(position) {
                        *slot = '|';
                    }
                }
            }

            output.push_str(&format!(
                "{:<label$} {} {}\n",
                truncate(&bar.category, LABEL_WIDTH),
                line.into_iter().collect::<String>(),
                bar.spent.format_with_symbol(currency),
                label = LABEL_WIDTH
            ));
        }

        if self.bars.iter().any(|bar| bar.budget.is_some()) {
            output.push_str("(| marks the budget)\n");
        }

        output
    }
}
