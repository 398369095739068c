//! Category rules
//!
//! A rule pairs a category name with the keywords that select it. Rules live
//! in an ordered rule set; a rule at a lower index has priority over every
//! rule after it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned when no rule matches a description
pub const DEFAULT_CATEGORY: &str = "Other";

/// Maximum length of a category name
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// A category name with the keywords that select it
///
/// Rules read from settings go through the same normalization and
/// validation as [`CategoryRule::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCategoryRule")]
pub struct CategoryRule {
    /// Category name
    pub name: String,

    /// Lower-cased keywords, matched as substrings of a description
    pub keywords: Vec<String>,
}

impl CategoryRule {
    /// Create a new rule, normalizing its keywords
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into().trim().to_string(),
            keywords: normalize_keywords(keywords),
        }
    }

    /// Check whether any keyword occurs in an already lower-cased description
    pub fn matches_lowered(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw.as_str()))
    }

    /// Check whether this rule's name equals `name`, ignoring case
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Validate the rule
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > MAX_CATEGORY_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if self.keywords.is_empty() {
            return Err(CategoryValidationError::NoKeywords);
        }

        Ok(())
    }
}

/// A rule as written in a settings file
#[derive(Deserialize)]
struct RawCategoryRule {
    name: String,
    #[serde(default)]
    keywords: Vec<String>,
}

impl TryFrom<RawCategoryRule> for CategoryRule {
    type Error = CategoryValidationError;

    fn try_from(raw: RawCategoryRule) -> Result<Self, Self::Error> {
        let rule = CategoryRule::new(raw.name, raw.keywords);
        rule.validate()?;
        Ok(rule)
    }
}

impl fmt::Display for CategoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Trim, lower-case and de-duplicate keywords, dropping empty ones
///
/// First occurrence wins, so the original keyword order is kept.
pub fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result: Vec<String> = Vec::new();
    for kw in keywords {
        let kw = kw.as_ref().trim().to_lowercase();
        if !kw.is_empty() && !result.contains(&kw) {
            result.push(kw);
        }
    }
    result
}

/// Split a comma separated keyword list ("uber, taxi,bus")
pub fn split_keywords(input: &str) -> Vec<String> {
    normalize_keywords(input.split(','))
}

/// Ordered sequence of category rules
///
/// Order is priority: categorization walks the rules front to back and the
/// first match wins, so this must stay a sequence and never become a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CategoryRuleSet(Vec<CategoryRule>);

impl CategoryRuleSet {
    /// Create a rule set from rules in priority order
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self(rules)
    }

    /// An empty rule set (every description falls back to the default category)
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// The built-in rule set
    pub fn default_rules() -> Self {
        Self(
            DefaultCategoryRule::all()
                .iter()
                .map(DefaultCategoryRule::to_rule)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over rules in priority order
    pub fn iter(&self) -> std::slice::Iter<'_, CategoryRule> {
        self.0.iter()
    }

    /// Get a rule by its 0-based position
    pub fn get(&self, index: usize) -> Option<&CategoryRule> {
        self.0.get(index)
    }

    /// Find the position of a rule by name (case-insensitive)
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|rule| rule.has_name(name))
    }

    /// Check whether a rule with this name exists (case-insensitive)
    pub fn contains_name(&self, name: &str) -> bool {
        self.position_of(name).is_some()
    }

    /// Append a rule with the lowest priority
    pub(crate) fn push(&mut self, rule: CategoryRule) {
        self.0.push(rule);
    }

    /// Replace the rule at `index`
    pub(crate) fn replace(&mut self, index: usize, rule: CategoryRule) -> Option<CategoryRule> {
        let slot = self.0.get_mut(index)?;
        Some(std::mem::replace(slot, rule))
    }

    /// Remove the rule at `index`
    pub(crate) fn remove(&mut self, index: usize) -> Option<CategoryRule> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a CategoryRuleSet {
    type Item = &'a CategoryRule;
    type IntoIter = std::slice::Iter<'a, CategoryRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<CategoryRule> for CategoryRuleSet {
    fn from_iter<I: IntoIterator<Item = CategoryRule>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Built-in category rules, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategoryRule {
    Housing,
    Transport,
    Food,
    Entertainment,
}

impl DefaultCategoryRule {
    /// Get all default rules in priority order
    pub fn all() -> &'static [Self] {
        &[Self::Housing, Self::Transport, Self::Food, Self::Entertainment]
    }

    /// Get the category name for this default rule
    pub fn name(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Transport => "Transport",
            Self::Food => "Food",
            Self::Entertainment => "Entertainment",
        }
    }

    /// Get the keywords for this default rule
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Housing => &["rent", "mortgage", "utility", "utilities"],
            Self::Transport => &["uber", "taxi", "bus", "train", "metro", "tram"],
            Self::Food => &["coffee", "cafe", "restaurant", "grocery", "supermarket", "food"],
            Self::Entertainment => &[
                "cinema",
                "movie",
                "concert",
                "subscription",
                "netflix",
                "spotify",
                "game",
            ],
        }
    }

    /// Create a CategoryRule from this default
    pub fn to_rule(&self) -> CategoryRule {
        CategoryRule::new(self.name(), self.keywords().iter().copied())
    }
}

/// Validation errors for category rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    NoKeywords,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(
                    f,
                    "Category name too long ({} chars, max {})",
                    len, MAX_CATEGORY_NAME_LEN
                )
            }
            Self::NoKeywords => write!(f, "At least one keyword is required"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
