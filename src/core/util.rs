//! Source preparation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Leading and trailing blank lines
static BLANK_EDGES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A(?:[ \t\r\f\v]*\n)+|(?:\n[ \t\r\f\v]*)+\z").expect("Invalid BLANK_EDGES regex"));

/// Strip blank lines from the start and end of a block
pub fn chop(code: &str) -> Cow<'_, str> {
    BLANK_EDGES.replace_all(code, "")
}

/// Replace every tab with `spaces` spaces
pub fn tab_to_spaces(code: &str, spaces: usize) -> String {
    code.replace('\t', &" ".repeat(spaces))
}

/// Decode the three entities HTML-escaped code blocks carry
pub fn unescape_html(code: &str) -> String {
    code.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Escape text for HTML output
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Optional preparation steps applied to a block before tokenizing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Prepare {
    pub chop: bool,
    pub unescape_html: bool,
    /// Tab width; `None` keeps tabs
    pub indent: Option<usize>,
}

impl Prepare {
    pub fn apply(&self, code: &str) -> String {
        let mut code = if self.chop {
            chop(code).into_owned()
        } else {
            code.to_string()
        };
        if self.unescape_html {
            code = unescape_html(&code);
        }
        if let Some(spaces) = self.indent {
            code = tab_to_spaces(&code, spaces);
        }
        code
    }
}
