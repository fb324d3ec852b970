//! CLI diff integration tests

use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write(temp_dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_turnhook-cli"))
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

const BEFORE: &str = r#"[
  {"id": "x", "name": "Goblin", "hp": 10, "max": 10, "current_max": 10, "status": ["poison"]},
  {"id": "z", "name": "Kobold", "hp": 4}
]"#;

const AFTER: &str = r#"[
  {"id": "x", "name": "Goblin", "hp": 7, "max": 10, "current_max": 10, "status": ["poison", "stun"]},
  {"id": "y", "name": "Orc", "hp": 15}
]"#;

#[test]
fn test_cli_diff_prints_summary() {
    let temp_dir = TempDir::new().unwrap();
    let before = write(&temp_dir, "before.json", BEFORE);
    let after = write(&temp_dir, "after.json", AFTER);

    let output = run(&["diff", before.to_str().unwrap(), after.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("## Roster Changes"));
    assert!(stdout.contains("**Added**: 1"));
    assert!(stdout.contains("**Removed**: 1"));
    assert!(stdout.contains("- **Orc** (`y`)"));
    assert!(stdout.contains("  - hp: 10 → 7"));
    assert!(stdout.contains("  - status: +stun"));
}

#[test]
fn test_cli_diff_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let before = write(&temp_dir, "before.json", BEFORE);
    let after = write(&temp_dir, "after.json", AFTER);

    let output = run(&[
        "diff",
        before.to_str().unwrap(),
        after.to_str().unwrap(),
        "--json",
    ]);

    assert!(output.status.success());
    let changes: Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = changes.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["combatant"]["id"], "x");
    assert_eq!(entries[1]["changes"][0]["property"], "creature-added");
    assert_eq!(entries[2]["changes"][0]["property"], "creature-removed");
}

#[test]
fn test_cli_diff_identical_files() {
    let temp_dir = TempDir::new().unwrap();
    let before = write(&temp_dir, "before.json", BEFORE);

    let output = run(&["diff", before.to_str().unwrap(), before.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("_No roster changes detected._"));
}

#[test]
fn test_cli_diff_rejects_non_array() {
    let temp_dir = TempDir::new().unwrap();
    let before = write(&temp_dir, "before.json", r#"{"id": "x"}"#);
    let after = write(&temp_dir, "after.json", AFTER);

    let output = run(&["diff", before.to_str().unwrap(), after.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_INVALID_SNAPSHOT"), "stderr: {}", stderr);
    assert!(stderr.contains("before.json"));
}

#[test]
fn test_cli_diff_strict_rejects_duplicate_ids() {
    let temp_dir = TempDir::new().unwrap();
    let dup = write(
        &temp_dir,
        "dup.json",
        r#"[{"id": "x", "name": "A"}, {"id": "x", "name": "B"}]"#,
    );
    let after = write(&temp_dir, "after.json", AFTER);

    let lenient = run(&["diff", dup.to_str().unwrap(), after.to_str().unwrap()]);
    assert!(lenient.status.success());

    let strict = run(&[
        "diff",
        dup.to_str().unwrap(),
        after.to_str().unwrap(),
        "--strict",
    ]);
    assert!(!strict.status.success());
    assert!(String::from_utf8_lossy(&strict.stderr).contains("ERR_DUPLICATE_COMBATANT_ID"));
}

#[test]
fn test_cli_diff_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let after = write(&temp_dir, "after.json", AFTER);
    let missing = temp_dir.path().join("nope.json");

    let output = run(&["diff", missing.to_str().unwrap(), after.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_IO"));
}
