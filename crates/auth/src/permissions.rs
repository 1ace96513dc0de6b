use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "catalog.manage").
/// The wildcard permission `"*"` grants everything and is held by the super
/// user only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const ALL: Permission = Permission(Cow::Borrowed("*"));
    /// Create warehouses and stores.
    pub const FACILITY_CREATE: Permission = Permission(Cow::Borrowed("facility.create"));
    /// Create and delete user accounts below one's own role.
    pub const USER_MANAGE: Permission = Permission(Cow::Borrowed("user.manage"));
    /// Add, rename and remove categories, subcategories and items.
    pub const CATALOG_MANAGE: Permission = Permission(Cow::Borrowed("catalog.manage"));
    pub const CATALOG_READ: Permission = Permission(Cow::Borrowed("catalog.read"));
    /// Record inventory in/out movements.
    pub const INVENTORY_ADJUST: Permission = Permission(Cow::Borrowed("inventory.adjust"));
    pub const ORDERS_SEND: Permission = Permission(Cow::Borrowed("orders.send"));
    pub const ORDERS_PROCESS: Permission = Permission(Cow::Borrowed("orders.process"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
