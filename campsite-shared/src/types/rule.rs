//! Site rules.

use serde::{Deserialize, Serialize};

/// Which part of the site a rule applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    General,
    Camping,
    Fishing,
}

impl RuleCategory {
    /// Returns the category as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::General => "general",
            RuleCategory::Camping => "camping",
            RuleCategory::Fishing => "fishing",
        }
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single site rule.
///
/// Rules are displayed sorted ascending by `order`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: RuleCategory,
    pub order: i32,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: RuleCategory,
        order: i32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category,
            order,
        }
    }
}
