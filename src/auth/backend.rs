//! Authentication backend abstraction
//!
//! The session manager never decides who a user is. It hands credentials or
//! a signup form to an [`AuthBackend`] and stores whatever principal comes
//! back. [`MockBackend`] stands in for the real credential service until one
//! is integrated.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::models::{LoginCredentials, Principal, Role, SignupData};
use super::role::resolve_role;
use crate::config::AuthConfig;

/// Typed failure reasons from the credential service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account is locked")]
    AccountLocked,

    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    Rejected(String),
}

/// Credential verification and account provisioning service
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Verify credentials and return the matching principal
    async fn login(&self, credentials: &LoginCredentials) -> Result<Principal, BackendError>;

    /// Provision a new account and return its principal
    async fn signup(&self, data: &SignupData) -> Result<Principal, BackendError>;
}

pub const MOCK_SHOP_OWNER_ID: &str = "shop_owner_001";
pub const MOCK_SHOP_OWNER_NAME: &str = "Green Valley Grocers";
pub const MOCK_SHOP_OWNER_EMAIL: &str = "owner@greenvalleygrocers.in";
pub const MOCK_SHOP_ID: &str = "GVG001";
pub const MOCK_SHOP_NAME: &str = "Green Valley Grocers";

/// Simulated backend with a fixed round-trip latency per operation
#[derive(Debug, Clone)]
pub struct MockBackend {
    login_latency: Duration,
    signup_latency: Duration,
}

impl MockBackend {
    pub fn new(login_latency: Duration, signup_latency: Duration) -> Self {
        Self {
            login_latency,
            signup_latency,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.login_latency(), config.signup_latency())
    }

    /// A backend that answers without delay
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    async fn simulate_round_trip(latency: Duration) {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    /// Unique id for a new account
    fn new_principal_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Unique id for a new shop, shaped so the owner can sign in with it
    fn new_shop_id() -> String {
        format!("SHOP_{}", Uuid::new_v4().simple()).to_uppercase()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

#[async_trait]
impl AuthBackend for MockBackend {
    async fn login(&self, credentials: &LoginCredentials) -> Result<Principal, BackendError> {
        Self::simulate_round_trip(self.login_latency).await;

        // Classified as typed; surrounding whitespace only affects the contact
        let role = resolve_role(&credentials.identifier);
        let identifier = credentials.identifier.trim();
        debug!("Mock backend resolved '{}' as {}", identifier, role);

        let principal = match role {
            Role::ShopOwner => Principal::shop_owner(
                MOCK_SHOP_OWNER_ID,
                MOCK_SHOP_OWNER_NAME,
                MOCK_SHOP_OWNER_EMAIL,
                MOCK_SHOP_ID,
                MOCK_SHOP_NAME,
            ),
            Role::Customer => {
                let display_name = identifier
                    .split_once('@')
                    .map(|(local, _)| local)
                    .filter(|local| !local.is_empty())
                    .unwrap_or(identifier);
                Principal::customer(Self::new_principal_id(), display_name, identifier)
            }
        };

        Ok(principal)
    }

    async fn signup(&self, data: &SignupData) -> Result<Principal, BackendError> {
        Self::simulate_round_trip(self.signup_latency).await;

        let principal = match data.role {
            Role::Customer => Principal::customer(
                Self::new_principal_id(),
                data.display_name.trim(),
                data.email_or_contact.trim(),
            ),
            Role::ShopOwner => {
                let shop = data.shop_data.as_ref().ok_or_else(|| {
                    BackendError::Rejected("shop details are required for shop owners".to_string())
                })?;
                Principal::shop_owner(
                    Self::new_principal_id(),
                    data.display_name.trim(),
                    data.email_or_contact.trim(),
                    Self::new_shop_id(),
                    shop.shop_name.trim(),
                )
            }
        };

        Ok(principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::ShopData;
    use std::collections::HashSet;

    fn signup(role: Role, shop_data: Option<ShopData>) -> SignupData {
        SignupData {
            display_name: "Meena".to_string(),
            email_or_contact: "meena@example.com".to_string(),
            phone: "9123456780".to_string(),
            secret: "s3cret".to_string(),
            role,
            shop_data,
        }
    }

    #[tokio::test]
    async fn test_login_shop_owner_gets_fixed_identity() {
        let backend = MockBackend::instant();
        let principal = backend
            .login(&LoginCredentials::new("SHOP_1234", "pw"))
            .await
            .unwrap();

        assert_eq!(principal.role(), Role::ShopOwner);
        assert_eq!(principal.id, MOCK_SHOP_OWNER_ID);
        assert_eq!(principal.shop_id(), Some(MOCK_SHOP_ID));
        assert_eq!(principal.shop_name(), Some(MOCK_SHOP_NAME));
    }

    #[tokio::test]
    async fn test_login_customer_echoes_identifier() {
        let backend = MockBackend::instant();
        let principal = backend
            .login(&LoginCredentials::new("someone@example.com", "pw"))
            .await
            .unwrap();

        assert_eq!(principal.role(), Role::Customer);
        assert_eq!(principal.email_or_contact, "someone@example.com");
        assert_eq!(principal.display_name, "someone");
        assert_eq!(principal.shop, None);
    }

    #[tokio::test]
    async fn test_login_customer_phone_identifier_is_display_name() {
        let backend = MockBackend::instant();
        let principal = backend
            .login(&LoginCredentials::new("9876543210", "pw"))
            .await
            .unwrap();

        assert_eq!(principal.display_name, "9876543210");
    }

    #[tokio::test]
    async fn test_login_classifies_identifier_as_typed() {
        let backend = MockBackend::instant();
        let principal = backend
            .login(&LoginCredentials::new(" SHOP_1", "pw"))
            .await
            .unwrap();

        assert_eq!(principal.role(), Role::Customer);
        assert_eq!(principal.email_or_contact, "SHOP_1");
    }

    #[tokio::test]
    async fn test_signup_generates_unique_ids() {
        let backend = MockBackend::instant();
        let shop = ShopData {
            shop_name: "Meena Provisions".to_string(),
            ..Default::default()
        };

        let mut ids = HashSet::new();
        let mut shop_ids = HashSet::new();
        for _ in 0..50 {
            let principal = backend
                .signup(&signup(Role::ShopOwner, Some(shop.clone())))
                .await
                .unwrap();
            assert!(principal.shop_id().unwrap().starts_with("SHOP_"));
            ids.insert(principal.id.clone());
            shop_ids.insert(principal.shop_id().unwrap().to_string());
        }

        assert_eq!(ids.len(), 50);
        assert_eq!(shop_ids.len(), 50);
    }

    #[tokio::test]
    async fn test_signup_customer_ignores_shop_data() {
        let backend = MockBackend::instant();
        let principal = backend
            .signup(&signup(
                Role::Customer,
                Some(ShopData {
                    shop_name: "Ignored".to_string(),
                    ..Default::default()
                }),
            ))
            .await
            .unwrap();

        assert_eq!(principal.role(), Role::Customer);
        assert_eq!(principal.shop_name(), None);
    }

    #[tokio::test]
    async fn test_signup_shop_owner_without_shop_is_rejected() {
        let backend = MockBackend::instant();
        let err = backend.signup(&signup(Role::ShopOwner, None)).await.unwrap_err();
        assert!(matches!(err, BackendError::Rejected(_)));
    }
}
