//! Renderer module
//!
//! Renders highlighted blocks to different output formats: json, jsonl, html,
//! ansi, raw

use colored::{Color, Colorize};
use serde::Serialize;
use std::io::Write;

use crate::core::model::{Block, Issue, Line, Rendered, Segment, Token};
use crate::core::util::escape_html;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Html,
    Ansi,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            "ansi" | "term" | "terminal" => Ok(OutputFormat::Ansi),
            "raw" | "text" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// HTML container layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlMode {
    /// `<code>`
    Inline,
    #[default]
    Pre,
    /// `<ol>` with one `<li>` per line
    Ol,
    /// `<div>` lines with a number span
    Div,
    /// `<table>` rows with a number cell
    Table,
}

impl std::str::FromStr for HtmlMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inline" | "code" => Ok(HtmlMode::Inline),
            "pre" => Ok(HtmlMode::Pre),
            "ol" => Ok(HtmlMode::Ol),
            "div" => Ok(HtmlMode::Div),
            "table" => Ok(HtmlMode::Table),
            _ => Err(format!("Unknown html mode: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub color: bool,
    pub html_mode: HtmlMode,
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
            color: true,
            html_mode: HtmlMode::default(),
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self {
            pretty,
            ..Self::new(format)
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_html_mode(mut self, html_mode: HtmlMode) -> Self {
        self.html_mode = html_mode;
        self
    }
}

/// One JSONL record per rendered line
#[derive(Serialize)]
struct LineRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    index: usize,
    #[serde(flatten)]
    line: &'a Line,
}

/// Inline blocks become a single JSONL record
#[derive(Serialize)]
struct InlineRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    segments: &'a [Segment],
}

/// Soft issues of a block, emitted after its lines
#[derive(Serialize)]
struct IssuesRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    issues: &'a [Issue],
}

/// Renderer for highlighted blocks
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render blocks to a string
    pub fn render(&self, blocks: &[Block]) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(blocks),
            OutputFormat::Json => self.to_json(blocks),
            OutputFormat::Html => blocks
                .iter()
                .map(|b| self.render_html(b))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Ansi => blocks
                .iter()
                .map(|b| self.render_ansi(b))
                .collect::<Vec<_>>()
                .join("\n\n"),
            OutputFormat::Raw => Self::render_raw(blocks),
        }
    }

    /// Render a token list (json/jsonl as records, everything else one per line)
    pub fn render_tokens(&self, tokens: &[Token]) -> String {
        self.render_records(tokens, |t| format!("{}\t{}", t.category, t))
    }

    /// Render plain records: json/jsonl serialize them, other formats use `line`
    pub fn render_records<T, F>(&self, records: &[T], line: F) -> String
    where
        T: Serialize,
        F: Fn(&T) -> String,
    {
        match self.config.format {
            OutputFormat::Json => self.to_json(records),
            OutputFormat::Jsonl => records
                .iter()
                .filter_map(|r| self.to_json_line(r))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => records.iter().map(line).collect::<Vec<_>>().join("\n"),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, blocks: &[Block], mut writer: W) -> std::io::Result<()> {
        let output = self.render(blocks);
        writer.write_all(output.as_bytes())?;
        if !output.is_empty() && !output.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> String {
        let out = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        out.unwrap_or_else(|_| "[]".to_string())
    }

    fn to_json_line<T: Serialize>(&self, value: &T) -> Option<String> {
        if self.config.pretty {
            serde_json::to_string_pretty(value).ok()
        } else {
            serde_json::to_string(value).ok()
        }
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, blocks: &[Block]) -> String {
        let mut records = Vec::new();
        for block in blocks {
            let path = block.path.as_deref();
            match &block.rendered {
                Rendered::Lines(tree) => {
                    for (i, line) in tree.lines.iter().enumerate() {
                        records.extend(self.to_json_line(&LineRecord {
                            path,
                            index: i + 1,
                            line,
                        }));
                    }
                }
                Rendered::Inline { segments } => {
                    records.extend(self.to_json_line(&InlineRecord { path, segments }));
                }
            }
            if !block.issues.is_empty() {
                records.extend(self.to_json_line(&IssuesRecord {
                    path,
                    issues: &block.issues,
                }));
            }
        }
        records.join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render one block as HTML
    fn render_html(&self, block: &Block) -> String {
        let flame = block.flame.as_str();
        let mut out = String::new();

        let lines = match &block.rendered {
            Rendered::Inline { segments } => {
                let tag = if self.config.html_mode == HtmlMode::Inline { "code" } else { "pre" };
                out.push_str(&format!("<{} class=\"{}Lighter\">", tag, flame));
                push_spans(&mut out, segments);
                out.push_str(&format!("</{}>", tag));
                return out;
            }
            Rendered::Lines(tree) => &tree.lines,
        };

        match self.config.html_mode {
            HtmlMode::Inline | HtmlMode::Pre => {
                let tag = if self.config.html_mode == HtmlMode::Inline { "code" } else { "pre" };
                out.push_str(&format!("<{} class=\"{}Lighter\">", tag, flame));
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    push_spans(&mut out, &line.segments);
                }
                out.push_str(&format!("</{}>", tag));
            }
            HtmlMode::Ol => {
                out.push_str(&format!("<ol class=\"{}Lighter\">", flame));
                for line in lines {
                    out.push_str(&format!("<li class=\"{}\">", line_classes(flame, line)));
                    push_spans(&mut out, &line.segments);
                    out.push_str("</li>");
                }
                out.push_str("</ol>");
            }
            HtmlMode::Div => {
                out.push_str(&format!("<div class=\"{}Lighter\">", flame));
                for (i, line) in lines.iter().enumerate() {
                    out.push_str("<div>");
                    out.push_str(&format!(
                        "<span class=\"{}num\">{}</span>",
                        flame,
                        line.number.unwrap_or(i + 1)
                    ));
                    out.push_str(&format!("<span class=\"{}\">", line_classes(flame, line)));
                    push_spans(&mut out, &line.segments);
                    out.push_str("</span></div>");
                }
                out.push_str("</div>");
            }
            HtmlMode::Table => {
                out.push_str(&format!(
                    "<table class=\"{}Lighter\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\"><tbody>",
                    flame
                ));
                for (i, line) in lines.iter().enumerate() {
                    out.push_str(&format!(
                        "<tr><td class=\"{}num\">{}</td><td class=\"{}\">",
                        flame,
                        line.number.unwrap_or(i + 1),
                        line_classes(flame, line)
                    ));
                    push_spans(&mut out, &line.segments);
                    out.push_str("</td></tr>");
                }
                out.push_str("</tbody></table>");
            }
        }
        out
    }

    /// Render one block for a terminal
    fn render_ansi(&self, block: &Block) -> String {
        let paint = |segment: &Segment| -> String {
            let text = segment.display_text();
            match (&segment.category, self.config.color) {
                (Some(alias), true) => paint_alias(text, alias),
                _ => text.to_string(),
            }
        };

        match &block.rendered {
            Rendered::Inline { segments } => segments.iter().map(&paint).collect(),
            Rendered::Lines(tree) => {
                let width = tree.lines.len().to_string().len();
                tree.lines
                    .iter()
                    .map(|line| {
                        let body: String = line.segments.iter().map(&paint).collect();
                        match line.number {
                            Some(n) => {
                                let gutter = format!("{:>width$} │ ", n, width = width);
                                if self.config.color {
                                    format!("{}{}", gutter.dimmed(), body)
                                } else {
                                    format!("{}{}", gutter, body)
                                }
                            }
                            None => body,
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    }

    /// Render as raw output: the reconstructed source of each block
    fn render_raw(blocks: &[Block]) -> String {
        blocks
            .iter()
            .map(|b| b.rendered.source_text())
            .collect::<Vec<_>>()
            .join("\n---\n")
    }
}

fn push_spans(out: &mut String, segments: &[Segment]) {
    for segment in segments {
        let text = escape_html(segment.display_text());
        match &segment.category {
            Some(alias) => out.push_str(&format!("<span class=\"{}\">{}</span>", escape_html(alias), text)),
            None => out.push_str(&text),
        }
    }
}

fn line_classes(flame: &str, line: &Line) -> String {
    let mut classes = vec![format!("{}line", flame)];
    if line.first {
        classes.push(format!("{}first", flame));
    }
    if line.last {
        classes.push(format!("{}last", flame));
    }
    if line.alt {
        classes.push("alt".to_string());
    }
    classes.join(" ")
}

/// Terminal colour for a display alias, keyed on its family prefix
fn alias_color(alias: &str) -> Option<Color> {
    let family: String = alias.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    match family.as_str() {
        "kw" | "keyword" | "keywords" => Some(Color::Blue),
        "co" | "comment" => Some(Color::BrightBlack),
        "st" | "string" | "strings" => Some(Color::Green),
        "nu" | "number" | "numbers" => Some(Color::Magenta),
        "me" => Some(Color::Cyan),
        "br" | "sy" => Some(Color::Yellow),
        "de" => Some(Color::Red),
        _ => None,
    }
}

fn paint_alias(text: &str, alias: &str) -> String {
    match alias_color(alias) {
        Some(color) if alias.starts_with("kw1") => text.color(color).bold().to_string(),
        Some(color) if alias.starts_with("co") => text.color(color).italic().to_string(),
        Some(color) => text.color(color).to_string(),
        None => text.to_string(),
    }
}
