//! Configuration loading tests

use nearme::config::{loader, Config};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.storage.path, PathBuf::from("./.nearme/storage.json"));
    assert_eq!(config.storage.session_key, "nearme_user");
    assert_eq!(config.auth.login_latency(), Duration::from_millis(2000));
    assert_eq!(config.auth.signup_latency(), Duration::from_millis(3000));
}

#[test]
fn test_load_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nearme.toml");
    fs::write(
        &path,
        r#"
[storage]
path = "/tmp/nearme/storage.json"
session_key = "user"

[auth]
login_latency_ms = 10
signup_latency_ms = 20
"#,
    )
    .unwrap();

    let config = loader::load_config_from_path(&path).unwrap();
    assert_eq!(config.storage.path, PathBuf::from("/tmp/nearme/storage.json"));
    assert_eq!(config.storage.session_key, "user");
    assert_eq!(config.auth.login_latency(), Duration::from_millis(10));
    assert_eq!(config.auth.signup_latency(), Duration::from_millis(20));
}

#[test]
fn test_config_interpolates_env_with_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nearme.toml");
    fs::write(
        &path,
        "[storage]\npath = \"${NEARME_CONFIG_TEST_UNSET:-/var/lib/nearme/storage.json}\"\n",
    )
    .unwrap();

    let config = loader::load_config_from_path(&path).unwrap();
    assert_eq!(config.storage.path, PathBuf::from("/var/lib/nearme/storage.json"));
}

#[test]
fn test_invalid_toml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nearme.toml");
    fs::write(&path, "[auth]\nlogin_latency_ms = \"soon\"\n").unwrap();

    let result = loader::load_config_from_path(&path);
    assert!(matches!(result, Err(nearme::Error::TomlParse(_))));
}

#[test]
fn test_config_toml_round_trip() {
    let config = Config::default();
    let content = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&content).unwrap();
    assert_eq!(parsed, config);
}
