use serde::{Deserialize, Serialize};

use crate::Permission;

/// Kind of facility a role is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityKind {
    Warehouse,
    Store,
}

/// User roles of the retail hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperUser,
    WarehouseAdmin,
    StoreAdmin,
    WarehouseKeeper,
    Storekeeper,
    EndUser,
}

const SUPER_USER: &[Permission] = &[Permission::ALL];

const WAREHOUSE_ADMIN: &[Permission] = &[
    Permission::CATALOG_MANAGE,
    Permission::CATALOG_READ,
    Permission::INVENTORY_ADJUST,
    Permission::USER_MANAGE,
    Permission::ORDERS_PROCESS,
];

const STORE_ADMIN: &[Permission] = &[
    Permission::CATALOG_MANAGE,
    Permission::CATALOG_READ,
    Permission::INVENTORY_ADJUST,
    Permission::USER_MANAGE,
    Permission::ORDERS_SEND,
];

const KEEPER: &[Permission] = &[Permission::INVENTORY_ADJUST, Permission::CATALOG_READ];

const END_USER: &[Permission] = &[Permission::CATALOG_READ];

impl UserRole {
    pub fn permissions(self) -> &'static [Permission] {
        match self {
            UserRole::SuperUser => SUPER_USER,
            UserRole::WarehouseAdmin => WAREHOUSE_ADMIN,
            UserRole::StoreAdmin => STORE_ADMIN,
            UserRole::WarehouseKeeper | UserRole::Storekeeper => KEEPER,
            UserRole::EndUser => END_USER,
        }
    }

    /// Facility kind an account with this role must be bound to, if any.
    pub fn facility_kind(self) -> Option<FacilityKind> {
        match self {
            UserRole::WarehouseAdmin | UserRole::WarehouseKeeper => Some(FacilityKind::Warehouse),
            UserRole::StoreAdmin | UserRole::Storekeeper => Some(FacilityKind::Store),
            UserRole::SuperUser | UserRole::EndUser => None,
        }
    }

    /// Roles this role may create or delete accounts for.
    pub fn can_manage(self, other: UserRole) -> bool {
        match self {
            UserRole::SuperUser => matches!(other, UserRole::WarehouseAdmin | UserRole::StoreAdmin),
            UserRole::WarehouseAdmin => other == UserRole::WarehouseKeeper,
            UserRole::StoreAdmin => other == UserRole::Storekeeper,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::SuperUser => "super_user",
            UserRole::WarehouseAdmin => "warehouse_admin",
            UserRole::StoreAdmin => "store_admin",
            UserRole::WarehouseKeeper => "warehouse_keeper",
            UserRole::Storekeeper => "storekeeper",
            UserRole::EndUser => "end_user",
        }
    }
}

impl core::fmt::Display for UserRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keepers_share_the_same_permission_set() {
        assert_eq!(
            UserRole::WarehouseKeeper.permissions(),
            UserRole::Storekeeper.permissions()
        );
        assert!(!UserRole::Storekeeper.permissions().contains(&Permission::CATALOG_MANAGE));
    }

    #[test]
    fn management_follows_the_hierarchy() {
        assert!(UserRole::SuperUser.can_manage(UserRole::StoreAdmin));
        assert!(!UserRole::SuperUser.can_manage(UserRole::SuperUser));
        assert!(UserRole::WarehouseAdmin.can_manage(UserRole::WarehouseKeeper));
        assert!(!UserRole::WarehouseAdmin.can_manage(UserRole::Storekeeper));
        assert!(!UserRole::Storekeeper.can_manage(UserRole::EndUser));
    }

    #[test]
    fn display_matches_serde_name() {
        for role in [UserRole::SuperUser, UserRole::WarehouseKeeper, UserRole::EndUser] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{role}\""));
        }
    }
}
