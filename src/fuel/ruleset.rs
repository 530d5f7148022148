//! Rule sets ("fuels")
//!
//! A rule set is an ordered, immutable collection of compiled rules plus an
//! optional delimiter pair. It is built once per language definition, either
//! from a JSON definition or through [`RuleSetBuilder`], and shared read-only
//! across any number of tokenizations.
//!
//! Registration order is fixed: delimiter rules, then keyword groups, then
//! pattern rules. Re-registering a name replaces the rule but keeps its
//! original position.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use super::alias::AliasTable;
use super::regexp::{compile, csv_to_regex};
use super::rule::{Rule, RuleKind};
use crate::core::error::{LighterError, Result};
use crate::core::model::{DELIM_END, DELIM_START};

/// Alias given to delimiter-start tokens
pub const DELIM_START_ALIAS: &str = "de1";

/// Alias given to delimiter-end tokens
pub const DELIM_END_ALIAS: &str = "de2";

/// Keyword group definition: a csv word list compiled to `\b(w1|w2|…)\b`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub name: String,
    pub csv: String,

    #[serde(default, alias = "mod")]
    pub flags: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Explicit pattern rule definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    pub name: String,

    #[serde(alias = "pattern")]
    pub regex: String,

    #[serde(default)]
    pub flags: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Optional delimiter pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelimiterConfig {
    #[serde(default)]
    pub start: Option<String>,

    #[serde(default)]
    pub end: Option<String>,
}

/// Serializable language definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default, alias = "keywordGroups")]
    pub keyword_groups: Vec<KeywordGroup>,

    #[serde(default, alias = "patternRules")]
    pub pattern_rules: Vec<PatternRule>,

    #[serde(default)]
    pub delimiters: DelimiterConfig,

    /// Reserve delimiters for region scanning only
    #[serde(default)]
    pub strict: bool,
}

impl RuleSetConfig {
    /// Parse a JSON definition
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Read and parse a JSON definition file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_json(&content)?;
        if config.name.is_empty() {
            config.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(config)
    }

    /// Structural checks that no amount of rule compilation can fix
    pub fn validate(&self) -> Result<()> {
        let delims = &self.delimiters;
        if delims.start.is_some() != delims.end.is_some() {
            return Err(LighterError::InvalidDefinition(
                "delimiters need both a start and an end pattern".to_string(),
            ));
        }
        if self.strict && delims.start.is_none() {
            warn!(fuel = %self.name, "strict definition without delimiters produces no tokens");
        }
        let unnamed = self
            .keyword_groups
            .iter()
            .map(|g| g.name.as_str())
            .chain(self.pattern_rules.iter().map(|p| p.name.as_str()))
            .any(str::is_empty);
        if unnamed {
            return Err(LighterError::InvalidDefinition("every rule needs a name".to_string()));
        }
        Ok(())
    }

    /// Compile into a rule set
    pub fn build(&self) -> RuleSet {
        RuleSetBuilder::from_config(self.clone()).build()
    }
}

/// Immutable compiled rule set
#[derive(Debug)]
pub struct RuleSet {
    name: String,
    rules: IndexMap<String, Rule>,
    delim_start: Option<Regex>,
    delim_end: Option<Regex>,
    strict: bool,
    diagnostics: Vec<LighterError>,
}

impl RuleSet {
    pub fn builder(name: impl Into<String>) -> RuleSetBuilder {
        RuleSetBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Active rules in registration order
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// The delimiter pair, only when both ends are present
    pub fn delimiters(&self) -> Option<(&Regex, &Regex)> {
        match (&self.delim_start, &self.delim_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Rules dropped while building, as `MalformedRule` conditions
    pub fn diagnostics(&self) -> &[LighterError] {
        &self.diagnostics
    }

    /// Rule name → alias, including delimiter categories
    pub fn aliases(&self) -> AliasTable {
        let mut table: AliasTable = self
            .rules
            .values()
            .map(|rule| (rule.name.clone(), rule.alias.clone()))
            .collect();
        if self.delim_start.is_some() {
            table.insert(DELIM_START, DELIM_START_ALIAS);
        }
        if self.delim_end.is_some() {
            table.insert(DELIM_END, DELIM_END_ALIAS);
        }
        table
    }
}

/// Collects definitions and compiles them into a [`RuleSet`]
#[derive(Debug, Clone, Default)]
pub struct RuleSetBuilder {
    config: RuleSetConfig,
}

impl RuleSetBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: RuleSetConfig {
                name: name.into(),
                ..RuleSetConfig::default()
            },
        }
    }

    pub fn from_config(config: RuleSetConfig) -> Self {
        Self { config }
    }

    /// Add a keyword group
    pub fn keywords(mut self, name: &str, csv: &str, flags: &str, alias: &str) -> Self {
        self.config.keyword_groups.push(KeywordGroup {
            name: name.to_string(),
            csv: csv.to_string(),
            flags: flags.to_string(),
            alias: Some(alias.to_string()),
        });
        self
    }

    /// Add a pattern rule
    pub fn pattern(self, name: &str, regex: &str, alias: &str) -> Self {
        self.pattern_with_flags(name, regex, "", alias)
    }

    pub fn pattern_with_flags(mut self, name: &str, regex: &str, flags: &str, alias: &str) -> Self {
        self.config.pattern_rules.push(PatternRule {
            name: name.to_string(),
            regex: regex.to_string(),
            flags: flags.to_string(),
            alias: Some(alias.to_string()),
        });
        self
    }

    pub fn delimiters(mut self, start: &str, end: &str) -> Self {
        self.config.delimiters = DelimiterConfig {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        };
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    pub fn build(self) -> RuleSet {
        let config = self.config;
        let mut diagnostics = Vec::new();
        let mut rules: IndexMap<String, Rule> = IndexMap::new();

        let delim_start = compile_delimiter(DELIM_START, config.delimiters.start.as_deref(), &mut diagnostics);
        let delim_end = compile_delimiter(DELIM_END, config.delimiters.end.as_deref(), &mut diagnostics);

        if !config.strict {
            if let Some(re) = &delim_start {
                register(
                    &mut rules,
                    Rule::new(DELIM_START, re.clone(), Some(DELIM_START_ALIAS), RuleKind::DelimiterStart),
                );
            }
            if let Some(re) = &delim_end {
                register(
                    &mut rules,
                    Rule::new(DELIM_END, re.clone(), Some(DELIM_END_ALIAS), RuleKind::DelimiterEnd),
                );
            }
        }

        for group in &config.keyword_groups {
            if group.csv.trim().is_empty() {
                continue;
            }
            match compile(&csv_to_regex(&group.csv), &group.flags) {
                Ok(re) => register(
                    &mut rules,
                    Rule::new(&group.name, re, group.alias.as_deref(), RuleKind::KeywordSet),
                ),
                Err(source) => drop_rule(&group.name, source, &mut diagnostics),
            }
        }

        for pattern in &config.pattern_rules {
            match compile(&pattern.regex, &pattern.flags) {
                Ok(re) => register(
                    &mut rules,
                    Rule::new(&pattern.name, re, pattern.alias.as_deref(), RuleKind::Pattern),
                ),
                Err(source) => drop_rule(&pattern.name, source, &mut diagnostics),
            }
        }

        debug!(
            fuel = %config.name,
            rules = rules.len(),
            dropped = diagnostics.len(),
            strict = config.strict,
            "built rule set"
        );

        RuleSet {
            name: config.name,
            rules,
            delim_start,
            delim_end,
            strict: config.strict,
            diagnostics,
        }
    }
}

fn register(rules: &mut IndexMap<String, Rule>, rule: Rule) {
    // IndexMap::insert keeps the slot of an existing key
    rules.insert(rule.name.clone(), rule);
}

fn drop_rule(name: &str, source: regex::Error, diagnostics: &mut Vec<LighterError>) {
    warn!(rule = name, error = %source, "dropping malformed rule");
    diagnostics.push(LighterError::MalformedRule {
        rule: name.to_string(),
        source,
    });
}

fn compile_delimiter(
    name: &str,
    pattern: Option<&str>,
    diagnostics: &mut Vec<LighterError>,
) -> Option<Regex> {
    let pattern = pattern.filter(|p| !p.is_empty())?;
    match compile(pattern, "") {
        Ok(re) => Some(re),
        Err(source) => {
            drop_rule(name, source, diagnostics);
            None
        }
    }
}
