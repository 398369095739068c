//! Category rule service
//!
//! Adds, edits and deletes category rules. Renaming a rule carries the new
//! name through to the expenses and budgets that used the old one.

use tracing::{info, warn};

use crate::error::{MonitorError, MonitorResult};
use crate::models::{normalize_keywords, CategoryRule, CategoryRuleSet};
use crate::session::Session;

/// How an edit changes a rule's keywords
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeywordChange {
    #[default]
    Keep,
    /// Append keywords the rule does not have yet
    Add(Vec<String>),
    /// Drop keywords; at least one must remain
    Remove(Vec<String>),
}

/// Requested changes to a rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleEdit {
    pub rename: Option<String>,
    pub keywords: KeywordChange,
}

/// What an edit did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEditOutcome {
    pub rule: CategoryRule,
    /// Name before the edit
    pub previous_name: String,
    /// Expenses moved to the new name
    pub relabelled: usize,
    /// Months where the new name already had a budget; the existing value was kept
    pub budget_conflicts: Vec<String>,
}

impl RuleEditOutcome {
    pub fn renamed(&self) -> bool {
        self.previous_name != self.rule.name
    }
}

/// Service for category rule management
pub struct CategoryService<'a> {
    session: &'a mut Session,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    /// The rules in priority order
    pub fn rules(&self) -> &CategoryRuleSet {
        self.session.rules()
    }

    fn rule_at(&self, index: usize) -> MonitorResult<&CategoryRule> {
        self.session
            .rules()
            .get(index)
            .ok_or_else(|| MonitorError::category_not_found(format!("#{}", index + 1)))
    }

    /// Append a new rule with the lowest priority
    pub fn add_rule<I, S>(&mut self, name: &str, keywords: I) -> MonitorResult<CategoryRule>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rule = CategoryRule::new(name, keywords);
        rule.validate()
            .map_err(|e| MonitorError::Validation(e.to_string()))?;

        if self.session.rules().contains_name(&rule.name) {
            return Err(MonitorError::Duplicate {
                entity_type: "Category",
                identifier: rule.name,
            });
        }

        let (_, _, rules) = self.session.parts_mut();
        rules.push(rule.clone());
        info!(category = %rule.name, "added category rule");

        Ok(rule)
    }

    /// Edit the rule at `index` (0-based)
    pub fn edit_rule(&mut self, index: usize, edit: RuleEdit) -> MonitorResult<RuleEditOutcome> {
        let current = self.rule_at(index)?.clone();

        let name = match edit.rename.as_deref().map(str::trim) {
            None | Some("") => current.name.clone(),
            Some(new_name) => {
                let taken = self
                    .session
                    .rules()
                    .iter()
                    .enumerate()
                    .any(|(i, rule)| i != index && rule.has_name(new_name));
                if taken {
                    return Err(MonitorError::Duplicate {
                        entity_type: "Category",
                        identifier: new_name.to_string(),
                    });
                }
                new_name.to_string()
            }
        };

        let keywords = match edit.keywords {
            KeywordChange::Keep => current.keywords.clone(),
            KeywordChange::Add(extra) => {
                let extra = normalize_keywords(extra);
                if extra.is_empty() {
                    return Err(MonitorError::Validation(
                        "At least one keyword is required".into(),
                    ));
                }
                normalize_keywords(current.keywords.iter().chain(extra.iter()))
            }
            KeywordChange::Remove(dropped) => {
                let dropped = normalize_keywords(dropped);
                if dropped.is_empty() {
                    return Err(MonitorError::Validation(
                        "At least one keyword is required".into(),
                    ));
                }
                current
                    .keywords
                    .iter()
                    .filter(|kw| !dropped.contains(kw))
                    .cloned()
                    .collect()
            }
        };

        let rule = CategoryRule::new(name, keywords);
        if rule.keywords.is_empty() {
            return Err(MonitorError::Validation(
                "At least one keyword must remain".into(),
            ));
        }
        rule.validate()
            .map_err(|e| MonitorError::Validation(e.to_string()))?;

        let (records, budgets, rules) = self.session.parts_mut();
        rules.replace(index, rule.clone());

        let mut outcome = RuleEditOutcome {
            rule,
            previous_name: current.name,
            relabelled: 0,
            budget_conflicts: Vec::new(),
        };

        if outcome.renamed() {
            let (from, to) = (outcome.previous_name.as_str(), outcome.rule.name.as_str());
            outcome.relabelled = records
                .iter_mut()
                .filter_map(|record| record.relabel_category(from, to).then_some(()))
                .count();
            outcome.budget_conflicts = budgets.rename_category(from, to);

            for month in &outcome.budget_conflicts {
                warn!(
                    month = %month,
                    category = to,
                    "budget already exists for renamed category, keeping existing value"
                );
            }
            info!(from, to, relabelled = outcome.relabelled, "renamed category");
        }

        Ok(outcome)
    }

    /// Delete the rule at `index` (0-based)
    ///
    /// Expenses keep their current category until they are recategorized.
    pub fn delete_rule(&mut self, index: usize) -> MonitorResult<CategoryRule> {
        self.rule_at(index)?;
        let (_, _, rules) = self.session.parts_mut();
        let removed = rules
            .remove(index)
            .ok_or_else(|| MonitorError::category_not_found(format!("#{}", index + 1)))?;
        info!(category = %removed.name, "deleted category rule");
        Ok(removed)
    }

    /// Re-derive every expense's category from the current rules
    ///
    /// Returns the number of expenses whose category changed.
    pub fn recategorize_all(&mut self) -> usize {
        let (records, _, rules) = self.session.parts_mut();
        let changed = records
            .iter_mut()
            .filter_map(|record| record.recategorize(rules).then_some(()))
            .count();
        info!(changed, "recategorized expenses");
        changed
    }
}
