//! Layout options

use std::fmt;
use std::str::FromStr;

/// Whether output is split into lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// One flat segment sequence
    Inline,
    #[default]
    Lines,
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inline" | "flat" => Ok(RenderMode::Inline),
            "lines" => Ok(RenderMode::Lines),
            _ => Err(format!("Unknown mode: {}", s)),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Inline => write!(f, "inline"),
            RenderMode::Lines => write!(f, "lines"),
        }
    }
}

/// Selects lines that get alternate styling. Line numbers are 1-based.
#[derive(Debug, Clone, Copy)]
pub enum AltLines {
    Odd,
    Even,
    /// Every n-th line
    Every(usize),
    /// Applied on hover by the presentation layer; no line is pre-marked
    Hover,
    Predicate(fn(usize) -> bool),
}

impl AltLines {
    /// Whether line `number` (1-based) is marked
    pub fn marks(&self, number: usize) -> bool {
        match self {
            AltLines::Odd => number % 2 == 1,
            AltLines::Even => number % 2 == 0,
            AltLines::Every(n) => *n > 0 && number % n == 0,
            AltLines::Hover => false,
            AltLines::Predicate(f) => f(number),
        }
    }
}

/// Predicates never compare equal, not even to themselves
impl PartialEq for AltLines {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AltLines::Odd, AltLines::Odd)
            | (AltLines::Even, AltLines::Even)
            | (AltLines::Hover, AltLines::Hover) => true,
            (AltLines::Every(a), AltLines::Every(b)) => a == b,
            _ => false,
        }
    }
}

impl FromStr for AltLines {
    type Err = String;

    /// `odd`, `even`, `hover` or `every:N` (a leading `:` is accepted)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches(':').to_lowercase();
        match s.as_str() {
            "odd" => Ok(AltLines::Odd),
            "even" => Ok(AltLines::Even),
            "hover" => Ok(AltLines::Hover),
            _ => match s.strip_prefix("every:") {
                Some(n) => n
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .map(AltLines::Every)
                    .ok_or_else(|| format!("Invalid alt-lines interval: {}", n)),
                None => Err(format!("Unknown alt-lines selector: {}", s)),
            },
        }
    }
}

/// Layout configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub line_numbers: bool,
    pub alt_lines: Option<AltLines>,
}

impl RenderOptions {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_line_numbers(mut self, line_numbers: bool) -> Self {
        self.line_numbers = line_numbers;
        self
    }

    pub fn with_alt_lines(mut self, alt_lines: Option<AltLines>) -> Self {
        self.alt_lines = alt_lines;
        self
    }
}
