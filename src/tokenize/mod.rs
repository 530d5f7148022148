//! Tokenize module - Applies a rule set to source text
//!
//! Two strategies produce the same shape of output, an ordered,
//! non-overlapping token list:
//! - `sequential` (default): cursor-driven, never produces nested tokens
//! - `greedy`: collect every match, then purge overlaps
//!
//! Strict rule sets only scan the regions between delimiter pairs.
//!
//! Usage:
//! ```rust
//! use lighter::fuel::RuleSet;
//! use lighter::tokenize::{tokenize, Strategy};
//!
//! let rule_set = RuleSet::builder("demo").pattern("comment", "#.*", "co1").build();
//! let tokens = tokenize("foo # comment\nbar", &rule_set, Strategy::Sequential);
//! assert_eq!(tokens[0].text, "# comment");
//! assert_eq!(tokens[0].start, 4);
//! ```

pub mod greedy;
pub mod purge;
pub mod sequential;

use regex::{Captures, Regex};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::core::error::LighterError;
use crate::core::model::{Token, DELIM_END, DELIM_START};
use crate::fuel::{Rule, RuleSet};

pub use purge::purge;

/// Match-finding strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Exact, cursor-driven scan
    #[default]
    Sequential,
    /// Brute-force collection followed by a purge
    Greedy,
}

impl Strategy {
    /// Scan `text` with this strategy; offsets are relative to `text`
    pub fn scan(self, text: &str, rules: &[&Rule]) -> Vec<Token> {
        match self {
            Strategy::Sequential => sequential::scan(text, rules),
            Strategy::Greedy => greedy::scan(text, rules),
        }
    }

    pub fn available() -> &'static [&'static str] {
        &["sequential", "greedy"]
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Sequential => "sequential",
            Strategy::Greedy => "greedy",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" | "standard" | "exact" => Ok(Strategy::Sequential),
            "greedy" | "lazy" => Ok(Strategy::Greedy),
            _ => Err(format!(
                "Unknown strategy: {}. Available: {}",
                s,
                Strategy::available().join(", ")
            )),
        }
    }
}

/// Tokens plus the soft conditions met while producing them
#[derive(Debug, Default)]
pub struct TokenizeReport {
    pub tokens: Vec<Token>,
    pub issues: Vec<LighterError>,
}

/// Tokenize `source` with `rule_set`
pub fn tokenize(source: &str, rule_set: &RuleSet, strategy: Strategy) -> Vec<Token> {
    tokenize_report(source, rule_set, strategy).tokens
}

/// Tokenize and keep the soft conditions (unterminated delimiter regions)
pub fn tokenize_report(source: &str, rule_set: &RuleSet, strategy: Strategy) -> TokenizeReport {
    let rules: Vec<&Rule> = rule_set.rules().collect();
    let mut report = TokenizeReport::default();

    if !rule_set.is_strict() {
        report.tokens = strategy.scan(source, &rules);
    } else if let Some((start, end)) = rule_set.delimiters() {
        scan_regions(source, start, end, &rules, strategy, &mut report);
    } else {
        debug!(fuel = rule_set.name(), "strict fuel without a delimiter pair, nothing to scan");
    }

    debug!(
        fuel = rule_set.name(),
        %strategy,
        tokens = report.tokens.len(),
        "tokenized"
    );
    report
}

/// Scan only the text enclosed by delimiter pairs
fn scan_regions(
    source: &str,
    start_re: &Regex,
    end_re: &Regex,
    rules: &[&Rule],
    strategy: Strategy,
    report: &mut TokenizeReport,
) {
    let mut search = 0;
    while search <= source.len() {
        let Some(open) = start_re.find_at(source, search) else {
            break;
        };
        let Some(close) = end_re.find_at(source, open.end()) else {
            warn!(offset = open.start(), "unterminated delimiter region, stopping");
            report.issues.push(LighterError::UnterminatedDelimiter {
                offset: open.start(),
            });
            break;
        };

        debug!(start = open.end(), end = close.start(), "delimited region");
        if !open.is_empty() {
            report.tokens.push(Token::new(open.as_str(), DELIM_START, open.start()));
        }
        let region = &source[open.end()..close.start()];
        report.tokens.extend(
            strategy
                .scan(region, rules)
                .into_iter()
                .map(|token| token.shifted(open.end())),
        );
        if !close.is_empty() {
            report.tokens.push(Token::new(close.as_str(), DELIM_END, close.start()));
        }

        search = if close.end() > search {
            close.end()
        } else {
            next_boundary(source, search)
        };
    }
}

/// Token for a rule match.
///
/// A non-empty capture group 1 becomes the token text, positioned at its
/// first occurrence inside the whole match; otherwise the whole match is used.
/// Empty matches produce no token.
pub(crate) fn token_from_captures(caps: &Captures, category: &str) -> Option<Token> {
    let whole = caps.get(0)?;
    let (text, start) = match caps.get(1).filter(|group| !group.as_str().is_empty()) {
        Some(group) => {
            let at = whole
                .as_str()
                .find(group.as_str())
                .unwrap_or(group.start() - whole.start());
            (group.as_str(), whole.start() + at)
        }
        None => (whole.as_str(), whole.start()),
    };
    if text.is_empty() {
        return None;
    }
    Some(Token::new(text, category, start))
}

/// Byte offset of the character after `at`
pub(crate) fn next_boundary(text: &str, at: usize) -> usize {
    text.get(at..)
        .and_then(|rest| rest.chars().next())
        .map_or(at + 1, |c| at + c.len_utf8())
}
