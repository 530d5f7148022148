//! Regex construction helpers for language definitions

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Separator between words of a keyword csv list
static CSV_SEP: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*").expect("Invalid CSV_SEP regex"));

/// Compile `pattern` with a flags string.
///
/// Flags: `i` case-insensitive, `m` multi-line anchors, `s` dot matches
/// newline, `x` verbose. `g` and unknown flags are ignored; every rule is
/// already matched globally.
pub fn compile(pattern: &str, flags: &str) -> Result<Regex, regex::Error> {
    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            _ => {}
        }
    }
    builder.build()
}

/// Turn `"if, else,while"` into `\b(if|else|while)\b`
pub fn csv_to_regex(csv: &str) -> String {
    let words: Vec<&str> = CSV_SEP.split(csv).collect();
    format!(r"\b({})\b", words.join("|"))
}

/// Pattern for a single-line literal opened by `begin` and closed by `end`
/// (`begin` when omitted), with an optional escape sequence that lets the
/// closing text appear inside the literal.
pub fn delim_to_regex(begin: &str, escape: Option<&str>, end: Option<&str>, suffix: &str) -> String {
    let begin = regex::escape(begin);
    let end = end.map(regex::escape).unwrap_or_else(|| begin.clone());

    let body = match escape.map(regex::escape) {
        Some(esc) => format!(
            "{begin}[^{end}{esc}\\n]*(?:{esc}.[^{end}{esc}\\n]*)*{end}",
            begin = begin,
            end = end,
            esc = esc
        ),
        None => format!("{}[^{}\\n]*{}", begin, end, end),
    };
    format!("{}{}", body, suffix)
}

/// Case-insensitive, multi-line alternation of literal strings
pub fn strict_regex(literals: &[&str]) -> String {
    let escaped: Vec<String> = literals.iter().map(|l| regex::escape(l)).collect();
    format!("(?im)({})", escaped.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_flags() {
        let re = compile("^abc$", "gim").unwrap();
        assert!(re.is_match("x\nABC\ny"));

        let re = compile("^abc$", "g").unwrap();
        assert!(!re.is_match("x\nABC\ny"));
    }

    #[test]
    fn test_compile_dotall() {
        assert!(compile("a.b", "s").unwrap().is_match("a\nb"));
        assert!(!compile("a.b", "").unwrap().is_match("a\nb"));
    }

    #[test]
    fn test_compile_error() {
        assert!(compile("(open", "").is_err());
    }

    #[test]
    fn test_csv_to_regex() {
        assert_eq!(csv_to_regex("if, else,while"), r"\b(if|else|while)\b");

        let re = Regex::new(&csv_to_regex("if, else")).unwrap();
        assert!(re.is_match("x if y"));
        assert!(!re.is_match("elsewhere"));
    }

    #[test]
    fn test_delim_to_regex_with_escape() {
        let re = Regex::new(&delim_to_regex("\"", Some("\\"), None, "")).unwrap();
        let m = re.find(r#"say "a \" b" now"#).unwrap();
        assert_eq!(m.as_str(), r#""a \" b""#);
    }

    #[test]
    fn test_delim_to_regex_plain() {
        let re = Regex::new(&delim_to_regex("<", None, Some(">"), "")).unwrap();
        assert_eq!(re.find("a <tag> b").unwrap().as_str(), "<tag>");
        assert!(re.find("a <ta\ng> b").is_none());
    }

    #[test]
    fn test_strict_regex() {
        let pattern = strict_regex(&["<?php", "?>"]);
        let re = Regex::new(&pattern).unwrap();
        assert_eq!(re.find("x <?PHP y").unwrap().as_str(), "<?PHP");
        assert_eq!(re.find("y ?> z").unwrap().as_str(), "?>");
    }
}
