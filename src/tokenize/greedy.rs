//! Greedy scanning
//!
//! Every rule is matched independently over the whole text. Duplicates and
//! overlaps are expected and resolved afterwards by [`purge`]. Faster than the
//! sequential scan but less precise.

use tracing::trace;

use super::purge::purge;
use super::token_from_captures;
use crate::core::model::Token;
use crate::fuel::Rule;

/// Collect every raw match of every rule, unordered and possibly overlapping
pub fn collect(text: &str, rules: &[&Rule]) -> Vec<Token> {
    let mut tokens = Vec::new();
    for rule in rules {
        let before = tokens.len();
        tokens.extend(
            rule.pattern
                .captures_iter(text)
                .filter_map(|caps| token_from_captures(&caps, &rule.name)),
        );
        trace!(rule = %rule.name, matches = tokens.len() - before, "collected");
    }
    tokens
}

/// Scan `text`, returning purged tokens with offsets relative to `text`
pub fn scan(text: &str, rules: &[&Rule]) -> Vec<Token> {
    purge(collect(text, rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuel::RuleSet;

    fn rules_of(rule_set: &RuleSet) -> Vec<&Rule> {
        rule_set.rules().collect()
    }

    #[test]
    fn test_collect_sees_overlaps() {
        let rule_set = RuleSet::builder("t")
            .pattern("comment", "#.*", "co1")
            .pattern("string", r#""[^"]*""#, "st0")
            .build();
        let raw = collect(r#"# say "hi""#, &rules_of(&rule_set));
        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn test_scan_purges_string_inside_comment() {
        let rule_set = RuleSet::builder("t")
            .pattern("comment", "#.*", "co1")
            .pattern("string", r#""[^"]*""#, "st0")
            .build();
        let tokens = scan(r#"x # say "hi""#, &rules_of(&rule_set));
        assert_eq!(tokens, vec![Token::new(r#"# say "hi""#, "comment", 2)]);
    }

    #[test]
    fn test_scan_keyword_inside_string_discarded() {
        let rule_set = RuleSet::builder("t")
            .keywords("keyword", "if", "", "kw1")
            .pattern("string", r#""[^"]*""#, "st0")
            .build();
        let tokens = scan(r#""a if b" if"#, &rules_of(&rule_set));
        let cats: Vec<&str> = tokens.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(cats, vec!["string", "keyword"]);
        assert_eq!(tokens[1].start, 9);
    }

    #[test]
    fn test_scan_uses_capture_group() {
        let rule_set = RuleSet::builder("t").pattern("call", r"\.(\w+)\s*\(", "me0").build();
        let tokens = scan("a.run() b.stop ()", &rules_of(&rule_set));
        assert_eq!(
            tokens,
            vec![Token::new("run", "call", 2), Token::new("stop", "call", 10)]
        );
    }

    #[test]
    fn test_empty_text() {
        let rule_set = RuleSet::builder("t").pattern("any", ".*", "x").build();
        assert!(scan("", &rules_of(&rule_set)).is_empty());
    }
}
