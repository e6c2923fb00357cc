//! Identifier-based role resolution
//!
//! This is a development placeholder. The role is guessed from the shape of
//! the identifier the user typed, which proves nothing about who they are.
//! A real backend must return the role with a verified identity; only
//! [`MockBackend`](super::MockBackend) calls this.

use super::models::Role;

const SHOP_PREFIX: &str = "SHOP_";
const SHOP_MARKERS: [&str; 2] = ["GVG", "shop"];

/// Classify an identifier as a shop owner or a customer.
///
/// Matching is case-sensitive: `SHOP_` must be a prefix, `GVG` or `shop`
/// may appear anywhere.
pub fn resolve_role(identifier: &str) -> Role {
    if identifier.starts_with(SHOP_PREFIX)
        || SHOP_MARKERS.iter().any(|marker| identifier.contains(marker))
    {
        Role::ShopOwner
    } else {
        Role::Customer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_owner_identifiers() {
        assert_eq!(resolve_role("shop_manager"), Role::ShopOwner);
        assert_eq!(resolve_role("SHOP_1234"), Role::ShopOwner);
        assert_eq!(resolve_role("GVG-main"), Role::ShopOwner);
        assert_eq!(resolve_role("owner@myshop.in"), Role::ShopOwner);
        assert_eq!(resolve_role("store-GVG"), Role::ShopOwner);
    }

    #[test]
    fn test_customer_identifiers() {
        assert_eq!(resolve_role("someone@example.com"), Role::Customer);
        assert_eq!(resolve_role("9876543210"), Role::Customer);
        assert_eq!(resolve_role(""), Role::Customer);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(resolve_role("Shop_Manager"), Role::Customer);
        assert_eq!(resolve_role("gvg-main"), Role::Customer);
        assert_eq!(resolve_role("xSHOP_1"), Role::Customer);
    }
}
