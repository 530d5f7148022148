//! Layout module - Turns source text and tokens into renderable lines
//!
//! The layout pass never loses text: joining the segment texts of every line
//! with `\n` (or concatenating the inline segments) gives back the source.
//! A line that would otherwise be empty carries one placeholder segment.

pub mod options;

use tracing::debug;

use crate::core::model::{Line, LineTree, Rendered, Segment, Token};
use crate::fuel::AliasTable;

pub use options::{AltLines, RenderMode, RenderOptions};

/// Lay out `source` using an ordered, non-overlapping token list
pub fn render(source: &str, tokens: &[Token], aliases: &AliasTable, options: &RenderOptions) -> Rendered {
    match options.mode {
        RenderMode::Inline => Rendered::Inline {
            segments: inline_segments(source, tokens, aliases),
        },
        RenderMode::Lines => Rendered::Lines(line_tree(source, tokens, aliases, options)),
    }
}

/// One flat segment sequence for the whole block
fn inline_segments(source: &str, tokens: &[Token], aliases: &AliasTable) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(tokens.len() * 2 + 1);
    let mut cursor = 0;
    for token in tokens {
        if token.start > cursor {
            segments.push(Segment::plain(&source[cursor..token.start]));
        }
        if !token.text.is_empty() {
            segments.push(Segment::styled(&token.text, aliases.resolve(&token.category)));
        }
        cursor = token.end;
    }
    if cursor < source.len() {
        segments.push(Segment::plain(&source[cursor..]));
    }
    segments
}

/// Builds lines one segment at a time
struct LineBuilder<'a> {
    lines: Vec<Line>,
    current: Line,
    options: &'a RenderOptions,
}

impl<'a> LineBuilder<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            lines: Vec::new(),
            current: Line::default(),
            options,
        }
    }

    /// Append `text`, closing the current line at every line break
    fn push(&mut self, text: &str, category: Option<&str>) {
        let mut pieces = text.split('\n').peekable();
        while let Some(piece) = pieces.next() {
            self.append(piece, category);
            if pieces.peek().is_some() {
                self.close();
            }
        }
    }

    fn append(&mut self, piece: &str, category: Option<&str>) {
        if piece.is_empty() {
            return;
        }
        let segment = match category {
            Some(category) => Segment::styled(piece, category),
            None => Segment::plain(piece),
        };
        self.current.segments.push(segment);
    }

    fn close(&mut self) {
        let mut line = std::mem::take(&mut self.current);
        if line.segments.is_empty() {
            line.segments.push(Segment::placeholder());
        }
        let number = self.lines.len() + 1;
        if self.options.line_numbers {
            line.number = Some(number);
        }
        if let Some(alt) = &self.options.alt_lines {
            line.alt = alt.marks(number);
        }
        self.lines.push(line);
    }

    fn finish(mut self) -> LineTree {
        self.close();
        if let Some(first) = self.lines.first_mut() {
            first.first = true;
        }
        if let Some(last) = self.lines.last_mut() {
            last.last = true;
        }
        LineTree {
            lines: self.lines,
            hover: matches!(self.options.alt_lines, Some(AltLines::Hover)),
        }
    }
}

fn line_tree(source: &str, tokens: &[Token], aliases: &AliasTable, options: &RenderOptions) -> LineTree {
    let mut builder = LineBuilder::new(options);
    let mut cursor = 0;

    for token in tokens {
        if token.start > cursor {
            builder.push(&source[cursor..token.start], None);
        }
        builder.push(&token.text, Some(aliases.resolve(&token.category)));
        cursor = token.end;
    }
    builder.push(source.get(cursor..).unwrap_or(""), None);

    let tree = builder.finish();
    debug!(lines = tree.lines.len(), tokens = tokens.len(), "laid out lines");
    tree
}
