#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use turnhook_core::settings::{ENV_TIMEOUT_MS, ENV_WEBHOOK};
use turnhook_core::{TurnhookError, WebhookSettings};

#[test]
fn test_load_full_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("turnhook.toml");
    fs::write(
        &path,
        "webhook = \"https://hooks.test/initiative\"\ntimeout_ms = 1500\n",
    )
    .unwrap();

    let settings = WebhookSettings::load(&path).unwrap();

    assert!(settings.is_enabled());
    assert_eq!(settings.endpoint(), Some("https://hooks.test/initiative"));
    assert_eq!(settings.timeout(), Duration::from_millis(1500));
}

#[test]
fn test_load_empty_file_is_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("turnhook.toml");
    fs::write(&path, "").unwrap();

    let settings = WebhookSettings::load(&path).unwrap();

    assert!(!settings.is_enabled());
    assert_eq!(settings, WebhookSettings::default());
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = WebhookSettings::load(&temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, TurnhookError::Io { .. }));
}

#[test]
fn test_load_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("turnhook.toml");
    fs::write(&path, "webhook = [").unwrap();

    let err = WebhookSettings::load(&path).unwrap_err();
    assert!(matches!(err, TurnhookError::InvalidSettings { .. }));
}

#[test]
fn test_file_then_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("turnhook.toml");
    fs::write(&path, "webhook = \"https://file.test/h\"\ntimeout_ms = 100\n").unwrap();

    let settings = WebhookSettings::load(&path)
        .unwrap()
        .with_overrides_from(|key| match key {
            k if k == ENV_TIMEOUT_MS => Some("900".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(settings.endpoint(), Some("https://file.test/h"));
    assert_eq!(settings.timeout_ms, 900);

    let blanked = settings
        .with_overrides_from(|key| (key == ENV_WEBHOOK).then(String::new))
        .unwrap();
    assert!(!blanked.is_enabled());
}
