//! Near me - session management for the local-commerce marketplace
//!
//! This is the library interface for Near me. It owns the signed-in identity
//! of the running client, restores it across restarts from a durable
//! key-value store, and exposes login, signup and logout.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod storage;

pub use auth::{Principal, Role, SessionManager, SessionState};
pub use config::Config;
pub use error::{AuthError, Error};
