//! Highlight Model
//!
//! Tokenizers produce `Token`s; the layout pass turns them into `Line`s of
//! `Segment`s. Every output format renders from these types only.

use serde::{Deserialize, Serialize};

/// Category given to delimiter-start markers
pub const DELIM_START: &str = "delim-start";

/// Category given to delimiter-end markers
pub const DELIM_END: &str = "delim-end";

/// One highlighted span of source text (a "wick").
///
/// Offsets are byte offsets into the tokenized source. `end == start + length`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Matched text
    pub text: String,

    /// Name of the rule that produced this token
    pub category: String,

    pub start: usize,
    pub length: usize,
    pub end: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, category: impl Into<String>, start: usize) -> Self {
        let text = text.into();
        let length = text.len();
        Self {
            text,
            category: category.into(),
            start,
            length,
            end: start + length,
        }
    }

    /// Copy of this token moved `by` bytes to the right
    pub fn shifted(mut self, by: usize) -> Self {
        self.start += by;
        self.end += by;
        self
    }

    /// `other` starts at or after this token's end
    pub fn is_before(&self, other: &Token) -> bool {
        other.start >= self.end
    }

    /// `other` lies entirely inside this token
    pub fn contains(&self, other: &Token) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} - {}", self.start, self.text, self.end)
    }
}

/// A run of text inside a line, optionally styled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,

    /// Display category (alias), `None` for unstyled text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Stands in for an otherwise empty line; `text` is empty
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub placeholder: bool,
}

impl Segment {
    /// Create an unstyled segment
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: None,
            placeholder: false,
        }
    }

    /// Create a segment tagged with a display category
    pub fn styled(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: Some(category.into()),
            placeholder: false,
        }
    }

    /// Create the placeholder used for empty lines
    pub fn placeholder() -> Self {
        Self {
            text: String::new(),
            category: None,
            placeholder: true,
        }
    }

    /// Text to show; placeholders display as a single space
    pub fn display_text(&self) -> &str {
        if self.placeholder {
            " "
        } else {
            &self.text
        }
    }
}

/// One rendered source line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// 1-based line number, when numbering is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<usize>,

    /// Marked by the alternate-line selector
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub alt: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub first: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub last: bool,

    pub segments: Vec<Segment>,
}

impl Line {
    /// Source text of this line (without the line break)
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Line-structured render output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTree {
    pub lines: Vec<Line>,

    /// Alternate styling is applied on hover by the presentation layer
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hover: bool,
}

impl LineTree {
    /// Rebuild the source: line texts joined with `\n`
    pub fn source_text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Result of the layout pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Rendered {
    Lines(LineTree),
    Inline { segments: Vec<Segment> },
}

impl Rendered {
    /// Rebuild the source text exactly
    pub fn source_text(&self) -> String {
        match self {
            Rendered::Lines(tree) => tree.source_text(),
            Rendered::Inline { segments } => segments.iter().map(|s| s.text.as_str()).collect(),
        }
    }

    pub fn as_lines(&self) -> Option<&LineTree> {
        match self {
            Rendered::Lines(tree) => Some(tree),
            Rendered::Inline { .. } => None,
        }
    }
}

/// A soft condition reported alongside a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub code: String,
    pub message: String,
}

impl Issue {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::core::error::LighterError> for Issue {
    fn from(err: &crate::core::error::LighterError) -> Self {
        Issue::new(err.code(), err.to_string())
    }
}

/// One highlighted source block, ready for an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Where the source came from (`-` for stdin)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Fuel (rule set) name
    pub fuel: String,

    /// Flame (style prefix) name
    pub flame: String,

    pub rendered: Rendered,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
}

impl Block {
    pub fn new(fuel: impl Into<String>, rendered: Rendered) -> Self {
        Self {
            path: None,
            fuel: fuel.into(),
            flame: "standard".to_string(),
            rendered,
            issues: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_flame(mut self, flame: impl Into<String>) -> Self {
        self.flame = flame.into();
        self
    }

    pub fn with_issues(mut self, issues: Vec<Issue>) -> Self {
        self.issues = issues;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_offsets() {
        let token = Token::new("# comment", "comment", 4);
        assert_eq!(token.length, 9);
        assert_eq!(token.end, 13);
        assert_eq!(token.to_string(), "4 - # comment - 13");
    }

    #[test]
    fn test_token_shifted() {
        let token = Token::new("abc", "word", 2).shifted(10);
        assert_eq!(token.start, 12);
        assert_eq!(token.end, 15);
        assert_eq!(token.length, 3);
    }

    #[test]
    fn test_token_relations() {
        let outer = Token::new("0123456789", "string", 0);
        let inner = Token::new("234", "keyword", 2);
        let after = Token::new("x", "keyword", 10);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.is_before(&after));
        assert!(!outer.is_before(&inner));
    }

    #[test]
    fn test_token_multibyte_length() {
        let token = Token::new("héllo", "word", 0);
        assert_eq!(token.length, 6);
    }

    #[test]
    fn test_placeholder_display() {
        let seg = Segment::placeholder();
        assert_eq!(seg.text, "");
        assert_eq!(seg.display_text(), " ");
        assert_eq!(Segment::plain("x").display_text(), "x");
    }

    #[test]
    fn test_segment_serialization_skips_defaults() {
        let json = serde_json::to_string(&Segment::plain("foo")).unwrap();
        assert_eq!(json, r#"{"text":"foo"}"#);

        let json = serde_json::to_string(&Segment::styled("x", "kw1")).unwrap();
        assert_eq!(json, r#"{"text":"x","category":"kw1"}"#);
    }

    #[test]
    fn test_line_tree_source_text() {
        let tree = LineTree {
            lines: vec![
                Line {
                    segments: vec![Segment::plain("a"), Segment::styled("b", "kw")],
                    ..Line::default()
                },
                Line {
                    segments: vec![Segment::placeholder()],
                    ..Line::default()
                },
            ],
            hover: false,
        };
        assert_eq!(tree.source_text(), "ab\n");
    }

    #[test]
    fn test_rendered_tagged_serialization() {
        let rendered = Rendered::Inline {
            segments: vec![Segment::plain("x")],
        };
        let value = serde_json::to_value(&rendered).unwrap();
        assert_eq!(value["mode"], "inline");
        assert_eq!(rendered.source_text(), "x");
        assert!(rendered.as_lines().is_none());
    }

    #[test]
    fn test_issue_from_error() {
        let err = crate::core::error::LighterError::UnterminatedDelimiter { offset: 3 };
        let issue = Issue::from(&err);
        assert_eq!(issue.code, "UNTERMINATED_DELIMITER");
        assert!(issue.message.contains('3'));
    }

    #[test]
    fn test_block_builders() {
        let block = Block::new("js", Rendered::Inline { segments: Vec::new() })
            .with_path("a.js")
            .with_flame("dark")
            .with_issues(vec![Issue::new("X", "y")]);
        assert_eq!(block.path.as_deref(), Some("a.js"));
        assert_eq!(block.flame, "dark");
        assert_eq!(block.issues.len(), 1);
    }
}
