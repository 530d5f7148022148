//! Compiled pattern rules

use regex::Regex;
use serde::{Deserialize, Serialize};

/// What a rule was registered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    DelimiterStart,
    DelimiterEnd,
    KeywordSet,
    Pattern,
}

/// A named, compiled pattern with its display alias
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub pattern: Regex,
    pub alias: String,
    pub kind: RuleKind,
}

impl Rule {
    /// Create a rule; an empty alias falls back to the rule name
    pub fn new(name: impl Into<String>, pattern: Regex, alias: Option<&str>, kind: RuleKind) -> Self {
        let name = name.into();
        let alias = match alias {
            Some(a) if !a.is_empty() => a.to_string(),
            _ => name.clone(),
        };
        Self {
            name,
            pattern,
            alias,
            kind,
        }
    }
}
