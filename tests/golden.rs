//! Golden tests for lighter
//!
//! These tests run the binary against checked-in fixtures and verify:
//! - Rendering is lossless (raw output reproduces the fixture)
//! - Known constructs land in the expected categories
//! - Token dumps stay byte-for-byte stable

use assert_cmd::Command;
use serde_json::Value;
use std::path::PathBuf;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Create a command for running the lighter binary
fn lighter_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lighter"));
    cmd.env_remove("LIGHTER_FUEL").env_remove("LIGHTER_FORMAT");
    cmd
}

/// Parse JSONL output into a vector of JSON values
fn parse_jsonl(output: &str) -> Vec<Value> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str::<Value>(l).ok())
        .collect()
}

/// Category of the first segment with exactly this text
fn category_of<'a>(records: &'a [Value], text: &str) -> Option<&'a str> {
    records
        .iter()
        .flat_map(|r| r["segments"].as_array().into_iter().flatten())
        .find(|s| s["text"] == text)
        .and_then(|s| s.get("category"))
        .and_then(|c| c.as_str())
}

fn run_stdout(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to run lighter");
    assert!(output.status.success(), "lighter failed: {:?}", output);
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Reconstruction ====================

    #[test]
    fn test_raw_reproduces_fixture() {
        for (name, strategy) in [("sample.js", "sequential"), ("sample.js", "greedy"), ("strict.php", "sequential")] {
            let expected = std::fs::read_to_string(fixture(name)).unwrap();
            let stdout = run_stdout(
                lighter_cmd()
                    .args(["--format", "raw", "render"])
                    .arg(fixture(name))
                    .args(["--strategy", strategy]),
            );
            assert_eq!(stdout, format!("{}\n", expected), "{} / {}", name, strategy);
        }
    }

    // ==================== Built-in Fuels ====================

    #[test]
    fn test_sample_js_categories() {
        let stdout = run_stdout(lighter_cmd().arg("render").arg(fixture("sample.js")));
        let records = parse_jsonl(&stdout);

        let source = std::fs::read_to_string(fixture("sample.js")).unwrap();
        assert_eq!(records.len(), 1 + source.matches('\n').count());

        assert_eq!(category_of(&records, "// greet someone"), Some("co2"));
        assert_eq!(category_of(&records, "function"), Some("kw1"));
        assert_eq!(category_of(&records, "return"), Some("kw1"));
        assert_eq!(category_of(&records, "\"hi \""), Some("st0"));
        assert_eq!(category_of(&records, "42"), Some("nu0"));
    }

    #[test]
    fn test_sample_js_blank_lines_hold_placeholders() {
        let stdout = run_stdout(lighter_cmd().arg("render").arg(fixture("sample.js")));
        let records = parse_jsonl(&stdout);

        // line 5 is empty and so is the line after the final break
        for index in [4, records.len() - 1] {
            let segments = records[index]["segments"].as_array().unwrap();
            assert_eq!(segments.len(), 1);
            assert_eq!(segments[0]["placeholder"], true);
            assert_eq!(segments[0]["text"], "");
        }
    }

    // ==================== Strict Regions ====================

    #[test]
    fn test_strict_php_tokens_golden() {
        let expected = std::fs::read_to_string(fixture("strict.php.tokens")).unwrap();
        let stdout = run_stdout(
            lighter_cmd()
                .args(["--format", "raw", "tokens"])
                .arg(fixture("strict.php"))
                .args(["--fuel", "php-strict"]),
        );
        assert_eq!(stdout, expected);
    }

    #[test]
    fn test_strict_php_leaves_outside_text_plain() {
        let stdout = run_stdout(
            lighter_cmd()
                .arg("render")
                .arg(fixture("strict.php"))
                .args(["--fuel", "php-strict"]),
        );
        let records = parse_jsonl(&stdout);
        let first = records[0]["segments"].as_array().unwrap();

        assert_eq!(first[0]["text"], "text ");
        assert!(first[0].get("category").is_none());
        assert_eq!(category_of(&records, "<?php"), Some("de1"));
        assert_eq!(category_of(&records, "?>"), Some("de2"));
        assert_eq!(category_of(&records, "echo"), Some("kw1"));
    }

    // ==================== JSON Definitions ====================

    #[test]
    fn test_ini_definition() {
        let stdout = run_stdout(
            lighter_cmd()
                .arg("render")
                .arg(fixture("settings.ini"))
                .arg("--fuel")
                .arg(fixture("defs/ini.json")),
        );
        let records = parse_jsonl(&stdout);

        assert_eq!(records.len(), 5);
        assert_eq!(category_of(&records, "[server]"), Some("kw1"));
        assert_eq!(category_of(&records, "; listen address"), Some("co1"));
        assert_eq!(category_of(&records, "host"), Some("me0"));
        assert_eq!(category_of(&records, "On"), Some("kw2"));
        assert_eq!(category_of(&records, " = localhost"), None);
    }

    #[test]
    fn test_broken_definition_is_reported() {
        let output = lighter_cmd()
            .arg("check")
            .arg(fixture("defs/broken.json"))
            .output()
            .unwrap();
        assert!(!output.status.success());

        let records = parse_jsonl(&String::from_utf8_lossy(&output.stdout));
        assert_eq!(records[0]["fuel"], "broken");
        assert_eq!(records[0]["rules"], 1);
        assert_eq!(records[0]["issues"][0]["code"], "MALFORMED_RULE");
    }

    #[test]
    fn test_broken_definition_still_renders() {
        let stdout = run_stdout(
            lighter_cmd()
                .args(["--format", "json", "render"])
                .arg(fixture("sample.js"))
                .arg("--fuel")
                .arg(fixture("defs/broken.json")),
        );
        let value: Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(value[0]["fuel"], "broken");
        assert_eq!(value[0]["issues"][0]["code"], "MALFORMED_RULE");
        assert_eq!(value[0]["rendered"]["mode"], "lines");
    }
}
