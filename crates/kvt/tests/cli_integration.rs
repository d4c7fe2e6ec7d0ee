//! End-to-end tests for the `kvt` binary.
//!
//! Each test points the binary at its own config file through `--config`
//! so that the user's configuration is never read.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const SCHEMA: &str = r#"
fallback_type = "text"

[[types]]
id = "price"
label = "Price"
aliases = ["preis"]
kind = "number"

[[types]]
id = "color"
label = "Color"
kind = "tag"
tags = ["red", "green"]

[[types]]
id = "text"
label = "Text"
kind = "regex"
"#;

fn kvt(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kvt"))
        .arg("--config")
        .arg(config)
        .arg("--no-color")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run kvt")
}

fn setup() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, SCHEMA).unwrap();
    (dir, path)
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ============================================================================
// parse / query
// ============================================================================

#[test]
fn test_parse_prints_entries_as_json() {
    let (_dir, config) = setup();
    let output = kvt(&config, &["--json", "parse", "preis:", "<", "20", "color:", "red", "sale"]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    let keys: Vec<&str> = json["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, ["price", "color", "text"]);
    assert_eq!(json["entries"][0]["edit_text"], "< 20");
    assert_eq!(json["leftover"], "");
}

#[test]
fn test_parse_table_reports_leftover() {
    let (_dir, config) = setup();
    let output = kvt(&config, &["parse", "price:", "cheap"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Not parsed: cheap"));
}

#[test]
fn test_query_prints_fragments() {
    let (_dir, config) = setup();
    let output = kvt(&config, &["--json", "query", "price:", ">=", "10"]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json[0]["key"], "price");
    assert_eq!(json[0]["fragment"]["type"], "number");
    assert_eq!(json[0]["fragment"]["key"], "gte");
    assert_eq!(json[0]["fragment"]["operand"], 10.0);
}

#[test]
fn test_query_rejects_unparsed_input() {
    let (_dir, config) = setup();
    let output = kvt(&config, &["query", "price:", "cheap"]);
    assert_eq!(output.status.code(), Some(1));
}

// ============================================================================
// suggest / types / apply
// ============================================================================

#[test]
fn test_suggest_unknown_key_reports_json_error() {
    let (_dir, config) = setup();
    let output = kvt(&config, &["--json", "suggest", "--key", "prise"]);
    assert_eq!(output.status.code(), Some(1));

    let json: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["code"], "KEY_VALUE_ERROR");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Did you mean 'price'?"));
}

#[test]
fn test_suggest_tag_values() {
    let (_dir, config) = setup();
    let output = kvt(&config, &["--json", "suggest", "--key", "color", "gr"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["items"][0]["value"], "green");
}

#[test]
fn test_types_lists_schema() {
    let (_dir, config) = setup();
    let output = kvt(&config, &["--json", "types"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[2]["fallback"], true);
}

#[test]
fn test_apply_modifier() {
    let (_dir, config) = setup();
    let output = kvt(&config, &["apply", "/3", "10", "--round", "up"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim(), "4");
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_invalid_config_exits_with_config_code() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let schema = "fallback_type = \"missing\"\n\
                  [[types]]\nid = \"a\"\nlabel = \"A\"\nkind = \"sort\"\n";
    fs::write(&path, schema).unwrap();

    let output = kvt(&path, &["types"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_config_init_writes_default_schema() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kvt").join("config.toml");

    let output = kvt(&path, &["config", "init"]);
    assert!(output.status.success());
    assert!(path.exists());

    let output = kvt(&path, &["config", "init"]);
    assert_eq!(output.status.code(), Some(5));

    let output = kvt(&path, &["--json", "types"]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output).as_array().unwrap().len(), 7);
}
