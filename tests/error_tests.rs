//! Error scenario integration tests

use std::process::Command;

fn push_relay_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_push-relay"));
    for var in [
        "PUSH_RELAY_API_KEY",
        "PUSH_RELAY_PROJECT_ID",
        "PUSH_RELAY_APP_ID",
        "PUSH_RELAY_MESSAGING_SENDER_ID",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn missing_provider_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = push_relay_bin()
        .args(["--config", dir.path().join("missing.toml").to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("provider.api_key"),
        "Expected error about missing provider setting, got: {}",
        stderr
    );
}

#[test]
fn partial_provider_config_names_missing_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[provider]\napi_key = \"k\"\nauth_domain = \"d\"\nproject_id = \"p\"\n",
    )
    .unwrap();

    let output = push_relay_bin()
        .args(["--config", path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("provider.storage_bucket"),
        "Expected error naming storage_bucket, got: {}",
        stderr
    );
}

#[test]
fn broken_config_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[provider\n").unwrap();

    let output = push_relay_bin()
        .args(["--config", path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("parse"),
        "Expected parse error, got: {}",
        stderr
    );
}

#[test]
fn config_get_unknown_key() {
    let output = push_relay_bin()
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_notifier() {
    let dir = tempfile::tempdir().unwrap();
    let output = push_relay_bin()
        .args([
            "--config",
            dir.path().join("config.toml").to_str().unwrap(),
            "config",
            "set",
            "relay.notifier",
            "growl",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid notifier"),
        "Expected error about invalid notifier, got: {}",
        stderr
    );
}

#[test]
fn config_list_with_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = push_relay_bin()
        .args([
            "--config",
            dir.path().join("config.toml").to_str().unwrap(),
            "config",
            "list",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("not set"));
    assert!(stdout.contains("provider.project_id"));
}

#[test]
fn config_init_twice_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let path = path.to_str().unwrap();

    let first = push_relay_bin()
        .args(["--config", path, "config", "init"])
        .output()
        .expect("Failed to execute command");
    assert!(first.status.success());

    let second = push_relay_bin()
        .args(["--config", path, "config", "init"])
        .output()
        .expect("Failed to execute command");
    assert!(!second.status.success());
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(stderr.contains("already exists"), "got: {}", stderr);
}
