//! Common patterns shared by language definitions
//!
//! Plain pattern sources (inline flags included) so definitions can reuse
//! them in `pattern_rules`.

/// C style single-line comment. The comment itself is capture group 1.
pub const SLASH_COMMENTS: &str = r"(?m)(?:^|[^\\])(//.*)$";

/// Perl style single-line comment
pub const POUND_COMMENTS: &str = r"(?m)#.*$";

/// C style multi-line comment
pub const MULTI_COMMENTS: &str = r"/\*[\s\S]*?\*/";

/// Single-quoted string that may span lines
pub const MULTI_LINE_SINGLE_QUOTED_STRINGS: &str = r"'[^'\\]*(?:\\[\s\S][^'\\]*)*'";

/// Double-quoted string that may span lines
pub const MULTI_LINE_DOUBLE_QUOTED_STRINGS: &str = r#""[^"\\]*(?:\\[\s\S][^"\\]*)*""#;

/// Either quoting style, spanning lines
pub const MULTI_LINE_STRINGS: &str =
    r#"'[^'\\]*(?:\\[\s\S][^'\\]*)*'|"[^"\\]*(?:\\[\s\S][^"\\]*)*""#;

/// Single-quoted string on one line
pub const SINGLE_QUOTED_STRING: &str = r"'[^'\\\r\n]*(?:\\.[^'\\\r\n]*)*'";

/// Double-quoted string on one line
pub const DOUBLE_QUOTED_STRING: &str = r#""[^"\\\r\n]*(?:\\.[^"\\\r\n]*)*""#;

/// Either quoting style on one line
pub const STRINGS: &str =
    r#"'[^'\\\r\n]*(?:\\.[^'\\\r\n]*)*'|"[^"\\\r\n]*(?:\\.[^"\\\r\n]*)*""#;

/// `.property`; the name is capture group 1
pub const PROPERTIES: &str = r"(?i)\.(\w+)\s*";

/// `.method(`; the name is capture group 1
pub const METHOD_CALLS: &str = r"\.(\w+)\s*\(";

/// `function(`; the name is capture group 1
pub const FUNCTION_CALLS: &str = r"\b(\w+)\s*\(";

/// Any of `{}()[]`
pub const BRACKETS: &str = r"\{|\}|\(|\)|\[|\]";

/// Integers, decimals and hex literals
pub const NUMBERS: &str = r"(?i)\b((?:(\d+)?\.)?[0-9]+|0x[0-9A-F]+)\b";

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn first(pattern: &str, text: &str) -> Option<String> {
        Regex::new(pattern)
            .unwrap()
            .find(text)
            .map(|m| m.as_str().to_string())
    }

    fn group1(pattern: &str, text: &str) -> Option<String> {
        Regex::new(pattern)
            .unwrap()
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    #[test]
    fn test_all_patterns_compile() {
        for pattern in [
            SLASH_COMMENTS,
            POUND_COMMENTS,
            MULTI_COMMENTS,
            MULTI_LINE_SINGLE_QUOTED_STRINGS,
            MULTI_LINE_DOUBLE_QUOTED_STRINGS,
            MULTI_LINE_STRINGS,
            SINGLE_QUOTED_STRING,
            DOUBLE_QUOTED_STRING,
            STRINGS,
            PROPERTIES,
            METHOD_CALLS,
            FUNCTION_CALLS,
            BRACKETS,
            NUMBERS,
        ] {
            assert!(Regex::new(pattern).is_ok(), "failed: {}", pattern);
        }
    }

    #[test]
    fn test_slash_comment_group() {
        assert_eq!(
            group1(SLASH_COMMENTS, "x = 1; // note"),
            Some("// note".to_string())
        );
        assert_eq!(group1(SLASH_COMMENTS, "// top"), Some("// top".to_string()));
    }

    #[test]
    fn test_multi_comment_spans_lines() {
        assert_eq!(
            first(MULTI_COMMENTS, "a /* x\ny */ b"),
            Some("/* x\ny */".to_string())
        );
    }

    #[test]
    fn test_strings_single_line() {
        assert_eq!(
            first(STRINGS, r#"say "hi \"you\"" ok"#),
            Some(r#""hi \"you\"""#.to_string())
        );
        assert_eq!(first(STRINGS, "'a\nb'"), None);
        assert_eq!(
            first(MULTI_LINE_STRINGS, "'a\nb'"),
            Some("'a\nb'".to_string())
        );
    }

    #[test]
    fn test_calls() {
        assert_eq!(group1(FUNCTION_CALLS, "print (x)"), Some("print".to_string()));
        assert_eq!(group1(METHOD_CALLS, "obj.run()"), Some("run".to_string()));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(first(NUMBERS, "x = 0xFF;"), Some("0xFF".to_string()));
        assert_eq!(first(NUMBERS, "y = 3.14"), Some("3.14".to_string()));
    }
}
