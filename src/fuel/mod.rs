//! Fuel module - Language definitions
//!
//! This module provides:
//! - Compiled pattern rules and rule sets
//! - JSON definition loading
//! - Alias tables for display categories
//! - Common patterns and regex helpers
//! - Built-in fuels

pub mod alias;
pub mod builtin;
pub mod common;
pub mod regexp;
pub mod rule;
pub mod ruleset;

pub use alias::AliasTable;
pub use rule::{Rule, RuleKind};
pub use ruleset::{RuleSet, RuleSetBuilder, RuleSetConfig};
