//! Category rule display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{CategoryRuleSet, DEFAULT_CATEGORY};

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Keywords")]
    keywords: String,
}

/// Format the rule set as a numbered table in priority order
pub fn format_rule_table(rules: &CategoryRuleSet) -> String {
    if rules.is_empty() {
        return format!(
            "No category rules defined. Every expense is '{}'.\n",
            DEFAULT_CATEGORY
        );
    }

    let rows = rules.iter().enumerate().map(|(i, rule)| RuleRow {
        number: i + 1,
        name: rule.name.clone(),
        keywords: rule.keywords.join(", "),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(0), Alignment::right());

    let mut output = table.to_string();
    output.push('\n');
    output.push_str(&format!(
        "Rules are checked top to bottom; unmatched expenses are '{}'.\n",
        DEFAULT_CATEGORY
    ));
    output
}
