//! lighter - regex-driven syntax highlighting
//!
//! A *fuel* (rule set) describes what to highlight, a tokenizer turns source
//! text into non-overlapping tokens, and the layout pass groups them into
//! lines ready for an output format.

pub mod core;
pub mod fuel;
pub mod layout;
pub mod tokenize;

pub use crate::core::error::{LighterError, Result};
pub use crate::core::model::{Block, Issue, Line, LineTree, Rendered, Segment, Token};
pub use crate::fuel::{RuleSet, RuleSetBuilder};
pub use crate::layout::{render, AltLines, RenderMode, RenderOptions};
pub use crate::tokenize::{tokenize, Strategy};
