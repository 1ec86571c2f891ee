//! Runs the built binary against the demo document.
//!
//! Run with: cargo test -p pickline-cli --test cli_fixture

use std::path::PathBuf;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::Value;

const DEMO: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/predictions.json");

/// Run `pickline` isolated from the user's config file and environment.
fn pickline(args: &[&str]) -> Output {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pickline"));
    cmd.args(args)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("APPDATA", home.path())
        .env_remove("NO_COLOR")
        .env_remove("RUST_LOG");
    for (key, _) in std::env::vars() {
        if key.starts_with("PICKLINE_") {
            cmd.env_remove(key);
        }
    }
    cmd.output().expect("failed to run pickline")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn json(args: &[&str]) -> Value {
    let output = pickline(args);
    assert!(output.status.success(), "pickline {:?} failed: {:?}", args, output);
    serde_json::from_str(&stdout(&output)).expect("stdout should be JSON")
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_demo_json_dashboard() {
    let out = json(&[DEMO, "--json"]);

    assert_eq!(out["title"], "Midday Predictions");
    assert_eq!(out["session"], "Midday");
    assert_eq!(out["last_updated_display"], "11/19/2025 5:43 p.m (EST)");

    let dates: Vec<String> = out["history"]["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["display_date"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        dates,
        vec![
            "11/19/2025",
            "11/18/2025",
            "11/18/2025",
            "11/17/2025",
            "11/17/2025",
            "11/16/2025",
            "pending"
        ]
    );
    assert_eq!(out["history"]["dated_len"], 6);

    assert_eq!(
        strings(&out["game1"]["codes"]),
        vec!["007", "012", "058", "133", "319", "406", "924"]
    );
    assert_eq!(strings(&out["game1"]["rejected"]), vec!["n/a"]);
    assert_eq!(
        strings(&out["game2_targeted"]),
        vec!["024", "050", "123", "406", "999"]
    );
}

#[test]
fn test_demo_target_digit() {
    let out = json(&[DEMO, "--json", "-d", "9"]);
    assert_eq!(out["target"], 9);
    assert_eq!(
        strings(&out["game2_targeted"]),
        vec!["924", "950", "923", "906", "999"]
    );
    // Game 1 is never targeted
    assert_eq!(strings(&out["game1"]["codes"])[0], "007");
}

#[test]
fn test_demo_search() {
    let out = json(&[DEMO, "--json", "--find", "406"]);
    assert_eq!(out["search"]["query"], "406");
    assert_eq!(out["search"]["history"], serde_json::json!([2]));
    assert_eq!(out["search"]["game1"], serde_json::json!([5]));
    assert_eq!(out["search"]["game2"], serde_json::json!([3]));
}

#[test]
fn test_demo_text_output() {
    let output = pickline(&[DEMO, "--no-color", "--limit", "3"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Midday Predictions\n"));
    assert!(text.contains("11/19/2025  Mid  924"));
    assert!(text.contains("11/18/2025  Mid  772"));
    assert!(text.contains("... 4 older"));
    assert!(!text.contains('\x1b'), "no escape codes with --no-color");
}

#[test]
fn test_missing_source_is_empty_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let missing: PathBuf = dir.path().join("missing.json");
    let output = pickline(&[missing.to_str().unwrap(), "--json"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("warning"));
    let out: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(out["title"], "Today's Predictions");
    assert_eq!(out["history"]["entries"], serde_json::json!([]));
    assert_eq!(out["game1"]["codes"], serde_json::json!([]));
}

#[test]
fn test_parse_date_flag() {
    let out = json(&["--parse-date", "11/172025", "--json"]);
    assert_eq!(out["shape"], "slash-run-on-year");
    assert_eq!(out["ambiguous"], false);

    let out = json(&["--parse-date", "whenever", "--json"]);
    assert_eq!(out, Value::Null);
}

#[test]
fn test_shapes_flag() {
    let out = json(&["--shapes", "--json"]);
    let ids: Vec<&str> = out
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["slash", "slash-space-year", "slash-run-on-year", "iso-date", "general"]
    );
}

#[test]
fn test_invalid_target_is_usage_error() {
    let output = pickline(&[DEMO, "-d", "12"]);
    assert!(!output.status.success());
}
