//! Error types for Near me

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config file not found. Run 'nearme init' first.")]
    ConfigNotFound,
}

/// Failures surfaced to callers of the session operations.
///
/// The payload is a human-readable reason meant for display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Signup failed: {0}")]
    SignupFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
