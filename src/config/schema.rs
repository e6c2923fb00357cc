//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

/// Durable client-side storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// File holding the key-value blob
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,

    /// Key the session snapshot is stored under
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./.nearme/storage.json")
}

fn default_session_key() -> String {
    "nearme_user".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            session_key: default_session_key(),
        }
    }
}

/// Simulated authentication backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthConfig {
    #[serde(default = "default_login_latency_ms")]
    pub login_latency_ms: u64,

    #[serde(default = "default_signup_latency_ms")]
    pub signup_latency_ms: u64,
}

fn default_login_latency_ms() -> u64 {
    2000
}

fn default_signup_latency_ms() -> u64 {
    3000
}

impl AuthConfig {
    pub fn login_latency(&self) -> Duration {
        Duration::from_millis(self.login_latency_ms)
    }

    pub fn signup_latency(&self) -> Duration {
        Duration::from_millis(self.signup_latency_ms)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_latency_ms: default_login_latency_ms(),
            signup_latency_ms: default_signup_latency_ms(),
        }
    }
}
