//! Built-in fuels
//!
//! Language definitions bundled with the crate, addressed by name. Aliases
//! follow the usual flame class names: `kw1`..`kw3` keywords, `co1`/`co2`
//! comments, `st0` strings, `nu0` numbers, `me0` methods and calls, `br0`
//! brackets, `sy0` symbols, `de1`/`de2` delimiters.

use tracing::warn;

use super::common;
use super::regexp::{delim_to_regex, strict_regex};
use super::ruleset::{RuleSet, RuleSetBuilder};
use crate::core::error::{LighterError, Result};

/// Fuel used when nothing else is requested
pub const STANDARD: &str = "standard";

/// Names of all built-in fuels
pub fn available_fuels() -> &'static [&'static str] {
    &[STANDARD, "js", "php", "css", "shell"]
}

/// Build a built-in fuel by name
pub fn fuel(name: &str) -> Result<RuleSet> {
    let builder = match name.to_lowercase().as_str() {
        "standard" | "plain" | "text" => RuleSetBuilder::new(STANDARD),
        "js" | "javascript" => javascript(),
        "php" => php(false),
        "php-strict" => php(true),
        "css" => css(),
        "shell" | "sh" | "bash" => shell(),
        _ => return Err(LighterError::UnknownFuel(name.to_string())),
    };
    Ok(builder.build())
}

/// Build a built-in fuel, falling back to `standard` for unknown names
pub fn fuel_or_standard(name: &str) -> RuleSet {
    match fuel(name) {
        Ok(rule_set) => rule_set,
        Err(e) => {
            warn!(error = %e, "falling back to the standard fuel");
            RuleSetBuilder::new(STANDARD).build()
        }
    }
}

/// Fuel and flame names from a `fuel:flame` class specifier.
///
/// Missing parts default to `standard`. With several space-separated classes
/// the first one wins.
pub fn parse_class(spec: &str) -> (String, String) {
    let first = spec.split_whitespace().next().unwrap_or("");
    let mut parts = first.splitn(2, ':');
    let pick = |part: Option<&str>| match part {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => STANDARD.to_string(),
    };
    let fuel = pick(parts.next());
    let flame = pick(parts.next());
    (fuel, flame)
}

fn javascript() -> RuleSetBuilder {
    RuleSet::builder("js")
        .keywords(
            "keywords",
            "break, case, catch, const, continue, default, delete, do, else, export, for, function, if, import, in, instanceof, let, new, return, switch, this, throw, try, typeof, var, void, while, with, yield",
            "",
            "kw1",
        )
        .keywords("literals", "true, false, null, undefined, NaN, Infinity", "", "kw2")
        .keywords(
            "builtins",
            "Array, Boolean, Date, Error, Function, JSON, Math, Number, Object, RegExp, String, console, document, window",
            "",
            "kw3",
        )
        .pattern("multiComments", common::MULTI_COMMENTS, "co1")
        .pattern("slashComments", common::SLASH_COMMENTS, "co2")
        .pattern("strings", common::STRINGS, "st0")
        .pattern("methodCalls", common::METHOD_CALLS, "me0")
        .pattern("properties", common::PROPERTIES, "me1")
        .pattern("numbers", common::NUMBERS, "nu0")
        .pattern("brackets", common::BRACKETS, "br0")
}

fn php(strict: bool) -> RuleSetBuilder {
    RuleSet::builder(if strict { "php-strict" } else { "php" })
        .delimiters(r"<\?(?:php|=)?", r"\?>")
        .strict(strict)
        .keywords(
            "keywords",
            "abstract, and, as, break, case, catch, class, clone, const, continue, declare, default, do, echo, else, elseif, extends, final, for, foreach, function, global, if, implements, include, include_once, instanceof, interface, namespace, new, or, print, private, protected, public, require, require_once, return, static, switch, throw, try, use, var, while, xor",
            "",
            "kw1",
        )
        .keywords("constants", "true, false, null, __FILE__, __LINE__, __CLASS__, __FUNCTION__", "i", "kw2")
        .pattern("multiComments", common::MULTI_COMMENTS, "co1")
        .pattern("slashComments", common::SLASH_COMMENTS, "co2")
        .pattern("poundComments", common::POUND_COMMENTS, "co2")
        .pattern("strings", common::MULTI_LINE_STRINGS, "st0")
        .pattern("variables", r"\$\w+", "kw3")
        .pattern("functionCalls", common::FUNCTION_CALLS, "me0")
        .pattern("numbers", common::NUMBERS, "nu0")
        .pattern("brackets", common::BRACKETS, "br0")
}

fn css() -> RuleSetBuilder {
    RuleSet::builder("css")
        .pattern("multiComments", common::MULTI_COMMENTS, "co1")
        .pattern("singleStrings", common::SINGLE_QUOTED_STRING, "st0")
        .pattern("doubleStrings", common::DOUBLE_QUOTED_STRING, "st0")
        .pattern("importants", &strict_regex(&["!important"]), "kw3")
        .pattern("selectors", r"(?m)([^{}\s;][^{};]*?)\s*\{", "kw1")
        .pattern("properties", r"([\w-]+)\s*:", "kw2")
        .pattern("units", r"\b\d+(?:\.\d+)?(?:px|em|rem|%|pt|vh|vw|s|ms)?\b", "nu0")
        .pattern("colors", r"(?i)#[0-9a-f]{3,8}\b", "nu0")
        .pattern("brackets", common::BRACKETS, "br0")
}

fn shell() -> RuleSetBuilder {
    RuleSet::builder("shell")
        .keywords(
            "keywords",
            "if, then, else, elif, fi, for, while, until, do, done, case, esac, in, function, return, exit, local, export",
            "",
            "kw1",
        )
        .keywords("builtins", "echo, cd, printf, read, set, unset, source, test, shift", "", "kw3")
        .pattern("poundComments", common::POUND_COMMENTS, "co1")
        .pattern("singleStrings", &delim_to_regex("'", None, None, ""), "st0")
        .pattern("doubleStrings", &delim_to_regex("\"", Some("\\"), None, ""), "st0")
        .pattern("variables", r"\$\{?\w+\}?", "kw2")
        .pattern("numbers", common::NUMBERS, "nu0")
}
