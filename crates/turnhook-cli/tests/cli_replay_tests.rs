//! CLI replay integration tests

use serde_json::Value;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const SCRIPT: &str = r#"[
  {"event": "new-encounter", "order": [
    {"id": "x", "name": "Goblin", "hp": 10, "status": ["poison"]}
  ]},
  {"event": "start-encounter"},
  {"event": "update", "order": [
    {"id": "x", "name": "Goblin", "hp": 7, "status": ["poison", "stun"]},
    {"id": "y", "name": "Orc", "hp": 15}
  ]},
  {"event": "next"},
  {"event": "previous"}
]"#;

fn write(temp_dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Run the CLI from an empty directory with webhook env vars cleared.
fn run(temp_dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_turnhook-cli"))
        .current_dir(temp_dir.path())
        .env_remove("TURNHOOK_WEBHOOK")
        .env_remove("TURNHOOK_TIMEOUT_MS")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn json_lines(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_cli_replay_dry_run_prints_envelopes() {
    let temp_dir = TempDir::new().unwrap();
    let script = write(&temp_dir, "script.json", SCRIPT);

    let output = run(&temp_dir, &["replay", script.to_str().unwrap(), "--dry-run"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let events = json_lines(&output);
    assert_eq!(events.len(), 5);

    let types: Vec<&str> = events.iter().map(|e| e["eventType"].as_str().unwrap()).collect();
    assert_eq!(
        types,
        vec!["new-encounter", "start-encounter", "update", "next", "previous"]
    );
    let steps: Vec<u64> = events.iter().map(|e| e["step"].as_u64().unwrap()).collect();
    assert_eq!(steps, vec![0, 1, 2, 3, 4]);

    let encounter = &events[0]["encounter"]["id"];
    assert!(events.iter().all(|e| &e["encounter"]["id"] == encounter));

    let changes = events[2]["changes"].as_array().unwrap();
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0]["changes"][0]["property"], "hp");
    assert_eq!(changes[0]["changes"][1]["property"], "status");
    assert_eq!(changes[1]["changes"][0]["property"], "creature-added");

    // Steps without an order keep the last roster.
    assert_eq!(events[4]["order"].as_array().unwrap().len(), 2);
    assert!(events[3].get("changes").is_none());
}

#[test]
fn test_cli_replay_without_webhook_fails() {
    let temp_dir = TempDir::new().unwrap();
    let script = write(&temp_dir, "script.json", SCRIPT);

    let output = run(&temp_dir, &["replay", script.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No webhook configured"));
}

#[test]
fn test_cli_replay_rejects_unknown_event() {
    let temp_dir = TempDir::new().unwrap();
    let script = write(&temp_dir, "script.json", r#"[{"event": "update-stats"}]"#);

    let output = run(&temp_dir, &["replay", script.to_str().unwrap(), "--dry-run"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_SERIALIZATION"), "stderr: {}", stderr);
}

#[test]
fn test_cli_replay_bad_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let script = write(&temp_dir, "script.json", SCRIPT);
    let config = write(&temp_dir, "turnhook.toml", "timeout_ms = \"later\"\n");

    let output = run(
        &temp_dir,
        &[
            "replay",
            script.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_SETTINGS"));
}

#[test]
fn test_cli_replay_posts_to_webhook_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/hook", listener.local_addr().unwrap());

    let script = write(
        &temp_dir,
        "script.json",
        r#"[{"event": "start-encounter", "order": [{"id": "x", "name": "Goblin"}]}]"#,
    );
    let config = write(
        &temp_dir,
        "turnhook.toml",
        &format!("webhook = \"{}\"\ntimeout_ms = 2000\n", url),
    );

    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|l| {
                        l.to_ascii_lowercase()
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap();
                if buf.len() >= end + 4 + length {
                    stream
                        .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\n\r\n")
                        .unwrap();
                    return String::from_utf8_lossy(&buf[end + 4..end + 4 + length]).to_string();
                }
            }
            assert!(n > 0, "connection closed early");
        }
    });

    let output = run(
        &temp_dir,
        &[
            "replay",
            script.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--linger-ms",
            "1500",
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let body: Value = serde_json::from_str(&server.join().unwrap()).unwrap();
    assert_eq!(body["eventType"], "start-encounter");
    assert_eq!(body["step"], 0);
    assert_eq!(body["order"][0]["id"], "x");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Replayed 1 events"));
}
