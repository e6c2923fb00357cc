//! Authentication models

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Principal roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Shopper ordering from nearby shops
    Customer,
    /// Owner of a shop listed on the marketplace
    ShopOwner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::ShopOwner => write!(f, "shop_owner"),
        }
    }
}

/// The shop a shop owner manages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopIdentity {
    pub shop_id: String,
    pub shop_name: String,
}

/// The signed-in identity held by a session.
///
/// The role follows from `shop`: a principal is a shop owner exactly when it
/// carries a shop identity, so a customer can never hold shop fields and a
/// shop owner can never lack them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PrincipalSnapshot", into = "PrincipalSnapshot")]
pub struct Principal {
    pub id: String,
    pub display_name: String,
    pub email_or_contact: String,
    pub shop: Option<ShopIdentity>,
}

impl Principal {
    /// Create a customer principal
    pub fn customer(
        id: impl Into<String>,
        display_name: impl Into<String>,
        email_or_contact: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            email_or_contact: email_or_contact.into(),
            shop: None,
        }
    }

    /// Create a shop owner principal
    pub fn shop_owner(
        id: impl Into<String>,
        display_name: impl Into<String>,
        email_or_contact: impl Into<String>,
        shop_id: impl Into<String>,
        shop_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            email_or_contact: email_or_contact.into(),
            shop: Some(ShopIdentity {
                shop_id: shop_id.into(),
                shop_name: shop_name.into(),
            }),
        }
    }

    pub fn role(&self) -> Role {
        if self.shop.is_some() {
            Role::ShopOwner
        } else {
            Role::Customer
        }
    }

    pub fn is_shop_owner(&self) -> bool {
        self.role() == Role::ShopOwner
    }

    pub fn shop_id(&self) -> Option<&str> {
        self.shop.as_ref().map(|shop| shop.shop_id.as_str())
    }

    pub fn shop_name(&self) -> Option<&str> {
        self.shop.as_ref().map(|shop| shop.shop_name.as_str())
    }
}

/// Reasons a persisted snapshot cannot become a principal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotDecodeError {
    #[error("snapshot has an empty id")]
    EmptyId,

    #[error("shop owner snapshot is missing shopId or shopName")]
    MissingShop,

    #[error("customer snapshot carries shop fields")]
    UnexpectedShop,
}

/// Wire form of a principal in durable storage:
/// `{id, name, email, type, shopId?, shopName?}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrincipalSnapshot {
    id: String,
    name: String,
    email: String,
    #[serde(rename = "type")]
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shop_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shop_name: Option<String>,
}

impl TryFrom<PrincipalSnapshot> for Principal {
    type Error = SnapshotDecodeError;

    fn try_from(snapshot: PrincipalSnapshot) -> Result<Self, Self::Error> {
        if snapshot.id.trim().is_empty() {
            return Err(SnapshotDecodeError::EmptyId);
        }

        let shop = match (snapshot.role, snapshot.shop_id, snapshot.shop_name) {
            (Role::ShopOwner, Some(shop_id), Some(shop_name)) => {
                Some(ShopIdentity { shop_id, shop_name })
            }
            (Role::ShopOwner, _, _) => return Err(SnapshotDecodeError::MissingShop),
            (Role::Customer, None, None) => None,
            (Role::Customer, _, _) => return Err(SnapshotDecodeError::UnexpectedShop),
        };

        Ok(Self {
            id: snapshot.id,
            display_name: snapshot.name,
            email_or_contact: snapshot.email,
            shop,
        })
    }
}

impl From<Principal> for PrincipalSnapshot {
    fn from(principal: Principal) -> Self {
        let role = principal.role();
        let (shop_id, shop_name) = match principal.shop {
            Some(shop) => (Some(shop.shop_id), Some(shop.shop_name)),
            None => (None, None),
        };
        Self {
            id: principal.id,
            name: principal.display_name,
            email: principal.email_or_contact,
            role,
            shop_id,
            shop_name,
        }
    }
}

/// Login credentials. Never persisted.
#[derive(Clone)]
pub struct LoginCredentials {
    pub identifier: String,
    pub secret: String,
    pub remember_me: Option<bool>,
}

impl LoginCredentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
            remember_me: None,
        }
    }

    pub fn remember_me(mut self, remember: bool) -> Self {
        self.remember_me = Some(remember);
        self
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Details of the shop a new shop owner registers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopData {
    pub shop_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Registration form for a new principal
#[derive(Clone)]
pub struct SignupData {
    pub display_name: String,
    pub email_or_contact: String,
    pub phone: String,
    pub secret: String,
    pub role: Role,
    /// Required when `role` is [`Role::ShopOwner`]
    pub shop_data: Option<ShopData>,
}

impl SignupData {
    /// Check the registration contract, returning the first violation
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("name", &self.display_name),
            ("email or contact", &self.email_or_contact),
            ("phone", &self.phone),
            ("password", &self.secret),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{} is required", field));
            }
        }

        if self.role == Role::ShopOwner {
            match &self.shop_data {
                Some(shop) if !shop.shop_name.trim().is_empty() => {}
                Some(_) => return Err("shop name is required".to_string()),
                None => return Err("shop details are required for shop owners".to_string()),
            }
        }

        Ok(())
    }
}

impl fmt::Debug for SignupData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupData")
            .field("display_name", &self.display_name)
            .field("email_or_contact", &self.email_or_contact)
            .field("phone", &self.phone)
            .field("secret", &"<redacted>")
            .field("role", &self.role)
            .field("shop_data", &self.shop_data)
            .finish()
    }
}
