use std::fmt;

use crate::error::RuleError;

// ---------------------------------------------------------------------------
// SearchMode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    Contains,
    NotContains,
}

impl SearchMode {
    pub const ALL: [SearchMode; 2] = [SearchMode::Contains, SearchMode::NotContains];

    pub fn label(self) -> &'static str {
        match self {
            SearchMode::Contains => "contains",
            SearchMode::NotContains => "does not contain",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SearchRule
// ---------------------------------------------------------------------------

/// One filter step: a column, its keywords and how they match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRule {
    pub column: Option<String>,
    pub keywords: Vec<String>,
    pub mode: SearchMode,
    /// Keyword text exactly as the user typed it.
    pub keyword_text: String,
}

impl SearchRule {
    pub fn new(column: &str, keywords: &str, mode: SearchMode) -> Self {
        let mut rule = SearchRule {
            column: Some(column.to_string()),
            mode,
            ..SearchRule::default()
        };
        rule.set_keywords(keywords);
        rule
    }

    /// Split on commas, trim, drop empty tokens. Order and duplicates are kept.
    pub fn set_keywords(&mut self, raw: &str) {
        self.keyword_text = raw.to_string();
        self.keywords = raw
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();
    }

    /// A rule without a column or keywords filters nothing.
    pub fn is_noop(&self) -> bool {
        self.column.as_deref().map_or(true, str::is_empty) || self.keywords.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SearchRuleList
// ---------------------------------------------------------------------------

/// Ordered rules; only the most recently added one can be removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRuleList {
    rules: Vec<SearchRule>,
}

impl SearchRuleList {
    /// A list holding one empty rule, the state a fresh session starts in.
    pub fn with_initial_rule() -> Self {
        let mut list = SearchRuleList::default();
        list.add_rule();
        list
    }

    pub fn rules(&self) -> &[SearchRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Append an empty rule and return its index.
    pub fn add_rule(&mut self) -> usize {
        self.rules.push(SearchRule::default());
        self.rules.len() - 1
    }

    /// Drop the highest-index rule. Does nothing on an empty list.
    pub fn remove_last_rule(&mut self) -> Option<SearchRule> {
        self.rules.pop()
    }

    pub fn set_rule_column(&mut self, index: usize, name: &str) -> Result<(), RuleError> {
        let rule = self.rule_mut(index)?;
        rule.column = (!name.is_empty()).then(|| name.to_string());
        Ok(())
    }

    pub fn set_rule_keywords(&mut self, index: usize, raw_text: &str) -> Result<(), RuleError> {
        self.rule_mut(index)?.set_keywords(raw_text);
        Ok(())
    }

    pub fn set_rule_mode(&mut self, index: usize, mode: SearchMode) -> Result<(), RuleError> {
        self.rule_mut(index)?.mode = mode;
        Ok(())
    }

    /// Forget every rule's column after a reload. Keywords and modes stay.
    pub fn refresh_for_new_dataset(&mut self, new_columns: &[String]) {
        log::debug!(
            "clearing column choice on {} search rule(s); {} column(s) now available",
            self.rules.len(),
            new_columns.len()
        );
        for rule in &mut self.rules {
            rule.column = None;
        }
    }

    fn rule_mut(&mut self, index: usize) -> Result<&mut SearchRule, RuleError> {
        let len = self.rules.len();
        self.rules
            .get_mut(index)
            .ok_or(RuleError::IndexOutOfRange { index, len })
    }
}
