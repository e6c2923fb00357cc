//! CLI command integration tests
//! Runs the nearme binary against a throwaway working directory

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const FAST_CONFIG: &str = r#"
[storage]
path = "./.nearme/storage.json"

[auth]
login_latency_ms = 0
signup_latency_ms = 0
"#;

fn nearme(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nearme"))
        .args(args)
        .current_dir(dir)
        .env_remove("NEARME_PASSWORD")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run nearme")
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("nearme.toml"), FAST_CONFIG).unwrap();
    dir
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_init_creates_config_file() {
    let dir = TempDir::new().unwrap();

    let output = nearme(dir.path(), &["init"]);
    assert!(output.status.success());

    let content = fs::read_to_string(dir.path().join("nearme.toml")).unwrap();
    assert!(content.contains("session_key"));
}

#[test]
fn test_cli_init_prevents_overwrite() {
    let dir = workspace();

    let output = nearme(dir.path(), &["init"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("already exists"));
    assert_eq!(
        fs::read_to_string(dir.path().join("nearme.toml")).unwrap(),
        FAST_CONFIG
    );
}

#[test]
fn test_cli_whoami_signed_out() {
    let dir = workspace();

    let output = nearme(dir.path(), &["whoami", "--format", "json"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "null");
}

#[test]
fn test_cli_login_whoami_logout() {
    let dir = workspace();

    let output = nearme(dir.path(), &["login", "-i", "SHOP_1234", "-p", "pw"]);
    assert!(output.status.success(), "login failed: {:?}", output);

    let output = nearme(dir.path(), &["whoami", "--format", "json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["type"], "shop_owner");
    assert_eq!(json["shopId"], "GVG001");

    let output = nearme(dir.path(), &["logout"]);
    assert!(output.status.success());

    let output = nearme(dir.path(), &["whoami", "--format", "json"]);
    assert_eq!(stdout(&output).trim(), "null");

    let output = nearme(dir.path(), &["logout"]);
    assert!(output.status.success());
}

#[test]
fn test_cli_signup_customer() {
    let dir = workspace();

    let output = nearme(
        dir.path(),
        &[
            "signup",
            "--role",
            "customer",
            "--name",
            "Asha Rao",
            "--email",
            "asha@example.com",
            "--phone",
            "9876543210",
            "--password",
            "pw",
        ],
    );
    assert!(output.status.success(), "signup failed: {:?}", output);

    let output = nearme(dir.path(), &["whoami", "--format", "yaml"]);
    let out = stdout(&output);
    assert!(out.contains("Asha Rao"));
    assert!(out.contains("customer"));
}

#[test]
fn test_cli_login_blank_identifier_fails() {
    let dir = workspace();

    let output = nearme(dir.path(), &["login", "-i", " ", "-p", "pw"]);
    assert!(!output.status.success());

    let output = nearme(dir.path(), &["whoami", "--format", "json"]);
    assert_eq!(stdout(&output).trim(), "null");
}
