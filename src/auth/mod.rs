//! Authentication and session management

pub mod backend;
pub mod models;
pub mod role;
pub mod session;

pub use backend::{AuthBackend, BackendError, MockBackend};
pub use models::{
    LoginCredentials, Principal, Role, ShopData, ShopIdentity, SignupData, SnapshotDecodeError,
};
pub use role::resolve_role;
pub use session::{SessionManager, SessionState};
