//! Session management
//!
//! A [`SessionManager`] is the single owner of the signed-in principal for
//! the running client. It is either unauthenticated or holds one principal,
//! mirrors that principal into durable storage under one key, and reports
//! whether a login or signup is in flight.
//!
//! Login and signup run on their own task. A caller that stops awaiting the
//! result does not cancel the operation; it still commits when the backend
//! answers. A logout invalidates every operation that started before it, so
//! an older login can never resurrect a session the user has just ended.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::backend::{AuthBackend, MockBackend};
use super::models::{LoginCredentials, Principal, SignupData};
use crate::config::Config;
use crate::error::AuthError;
use crate::storage::{FileStore, KeyValueStore};

const SUPERSEDED_BY_LOGOUT: &str = "superseded by logout";

/// Observable session state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    principal: Option<Principal>,
    /// Login/signup operations in flight
    pending: usize,
    /// Bumped by every logout
    generation: u64,
}

impl SessionState {
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }
}

struct Inner {
    state: watch::Sender<SessionState>,
    store: Arc<dyn KeyValueStore>,
    backend: Arc<dyn AuthBackend>,
    session_key: String,
}

/// Handle to the client's session. Clones share the same session.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

/// Marks an operation as in flight until dropped
struct LoadingGuard {
    inner: Arc<Inner>,
    generation: u64,
}

impl LoadingGuard {
    fn begin(inner: &Arc<Inner>) -> Self {
        let mut generation = 0;
        inner.state.send_modify(|state| {
            state.pending += 1;
            generation = state.generation;
        });
        Self {
            inner: Arc::clone(inner),
            generation,
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.inner.state.send_modify(|state| {
            state.pending = state.pending.saturating_sub(1);
        });
    }
}

impl SessionManager {
    /// Start a session, restoring the persisted principal if there is a
    /// usable one.
    ///
    /// A snapshot that cannot be read or decoded is deleted and the session
    /// starts unauthenticated. The returned manager is never loading.
    pub fn restore(
        store: Arc<dyn KeyValueStore>,
        backend: Arc<dyn AuthBackend>,
        session_key: impl Into<String>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState {
            pending: 1,
            ..Default::default()
        });
        let manager = Self {
            inner: Arc::new(Inner {
                state,
                store,
                backend,
                session_key: session_key.into(),
            }),
        };

        let principal = manager.read_snapshot();
        manager.inner.state.send_modify(|state| {
            state.principal = principal;
            state.pending = 0;
        });
        manager
    }

    /// Start a session backed by the configured storage file and the
    /// simulated backend
    pub fn from_config(config: &Config) -> Self {
        Self::restore(
            Arc::new(FileStore::new(&config.storage.path)),
            Arc::new(MockBackend::from_config(&config.auth)),
            config.storage.session_key.clone(),
        )
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Watch state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn current_principal(&self) -> Option<Principal> {
        self.inner.state.borrow().principal.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    /// Sign in with credentials
    pub async fn login(&self, credentials: LoginCredentials) -> Result<Principal, AuthError> {
        // Taken before spawning so a logout issued right after this call is seen
        let guard = LoadingGuard::begin(&self.inner);
        let manager = self.clone();
        tokio::spawn(async move { manager.run_login(guard, credentials).await })
            .await
            .map_err(|e| AuthError::LoginFailed(format!("login task failed: {}", e)))?
    }

    /// Register a new account and sign in as it
    pub async fn signup(&self, data: SignupData) -> Result<Principal, AuthError> {
        let guard = LoadingGuard::begin(&self.inner);
        let manager = self.clone();
        tokio::spawn(async move { manager.run_signup(guard, data).await })
            .await
            .map_err(|e| AuthError::SignupFailed(format!("signup task failed: {}", e)))?
    }

    /// Sign out. Always succeeds, and is safe to repeat.
    pub fn logout(&self) {
        let inner = &self.inner;
        // Same lock as commit, see there
        inner.state.send_modify(|state| {
            state.principal = None;
            state.generation += 1;
            if let Err(e) = inner.store.remove(&inner.session_key) {
                warn!("Failed to delete session snapshot: {}", e);
            }
        });
        info!("Signed out");
    }

    async fn run_login(
        &self,
        guard: LoadingGuard,
        credentials: LoginCredentials,
    ) -> Result<Principal, AuthError> {
        if credentials.identifier.trim().is_empty() {
            return Err(AuthError::LoginFailed(
                "email, phone or shop id is required".to_string(),
            ));
        }

        let principal = self
            .inner
            .backend
            .login(&credentials)
            .await
            .map_err(|e| {
                warn!("Login rejected by backend: {}", e);
                AuthError::LoginFailed(e.to_string())
            })?;

        let principal = self
            .commit(guard.generation, principal)
            .map_err(AuthError::LoginFailed)?;
        info!(user_id = %principal.id, role = %principal.role(), "Signed in");
        Ok(principal)
    }

    async fn run_signup(
        &self,
        guard: LoadingGuard,
        data: SignupData,
    ) -> Result<Principal, AuthError> {
        data.validate().map_err(AuthError::SignupFailed)?;

        let principal = self.inner.backend.signup(&data).await.map_err(|e| {
            warn!("Signup rejected by backend: {}", e);
            AuthError::SignupFailed(e.to_string())
        })?;

        let principal = self
            .commit(guard.generation, principal)
            .map_err(AuthError::SignupFailed)?;
        info!(user_id = %principal.id, role = %principal.role(), "Signed up");
        Ok(principal)
    }

    /// Persist and adopt `principal`, unless a logout happened since
    /// `generation` was taken. Storage and state change together or not at all.
    fn commit(&self, generation: u64, principal: Principal) -> Result<Principal, String> {
        let inner = &self.inner;
        let encoded = serde_json::to_string(&principal)
            .map_err(|e| format!("could not encode session: {}", e))?;

        let mut outcome = Err(SUPERSEDED_BY_LOGOUT.to_string());
        // The store is written under the watch lock so no logout can slip in
        // between the generation check and the write. Snapshots are a few
        // hundred bytes, so the blocking write stays inline.
        inner.state.send_if_modified(|state| {
            if state.generation != generation {
                debug!("Dropping result of an operation that started before logout");
                return false;
            }
            match inner.store.set(&inner.session_key, &encoded) {
                Ok(()) => {
                    state.principal = Some(principal.clone());
                    outcome = Ok(principal);
                    true
                }
                Err(e) => {
                    warn!("Failed to persist session snapshot: {}", e);
                    outcome = Err(format!("could not save session: {}", e));
                    false
                }
            }
        });
        outcome
    }

    fn read_snapshot(&self) -> Option<Principal> {
        let raw = match self.inner.store.get(&self.inner.session_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No session snapshot, starting signed out");
                return None;
            }
            Err(e) => {
                warn!("Could not read session snapshot, starting signed out: {}", e);
                self.discard_snapshot();
                return None;
            }
        };

        match serde_json::from_str::<Principal>(&raw) {
            Ok(principal) => {
                info!(user_id = %principal.id, role = %principal.role(), "Restored session");
                Some(principal)
            }
            Err(e) => {
                warn!("Discarding malformed session snapshot: {}", e);
                self.discard_snapshot();
                None
            }
        }
    }

    fn discard_snapshot(&self) {
        if let Err(e) = self.inner.store.remove(&self.inner.session_key) {
            warn!("Failed to delete session snapshot: {}", e);
        }
    }
}
