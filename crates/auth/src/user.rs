//! User accounts of the retail hierarchy.
//!
//! Accounts carry identity, role and facility binding only; credentials and
//! sessions live outside this crate.

use serde::{Deserialize, Serialize};

use superstore_core::{CategoryId, DomainError, DomainResult, Entity, StoreId, UserId, WarehouseId};

use crate::roles::{FacilityKind, UserRole};

// ─────────────────────────────────────────────────────────────────────────────
// Facility reference
// ─────────────────────────────────────────────────────────────────────────────

/// Facility an account is bound to (by id only).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum FacilityRef {
    Warehouse(WarehouseId),
    Store(StoreId),
}

impl FacilityRef {
    pub fn kind(&self) -> FacilityKind {
        match self {
            FacilityRef::Warehouse(_) => FacilityKind::Warehouse,
            FacilityRef::Store(_) => FacilityKind::Store,
        }
    }
}

impl core::fmt::Display for FacilityRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FacilityRef::Warehouse(id) => write!(f, "warehouse {id}"),
            FacilityRef::Store(id) => write!(f, "store {id}"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// A user account.
///
/// # Invariants
/// - Administrators and keepers are bound to exactly one facility of the kind
///   their role requires.
/// - Super users and end users are not bound to any facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    role: UserRole,
    facility: Option<FacilityRef>,
    assigned_categories: Vec<CategoryId>,
}

impl User {
    /// Build an account, checking the role/facility binding.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        role: UserRole,
        facility: Option<FacilityRef>,
    ) -> DomainResult<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }

        match (role.facility_kind(), &facility) {
            (None, None) => {}
            (Some(expected), Some(f)) if f.kind() == expected => {}
            (Some(expected), _) => {
                return Err(DomainError::validation(format!(
                    "role {role} must be bound to a {expected:?} facility"
                )));
            }
            (None, Some(_)) => {
                return Err(DomainError::validation(format!(
                    "role {role} cannot be bound to a facility"
                )));
            }
        }

        Ok(Self {
            id,
            username,
            role,
            facility,
            assigned_categories: Vec::new(),
        })
    }

    pub fn super_user(id: UserId, username: impl Into<String>) -> DomainResult<Self> {
        Self::new(id, username, UserRole::SuperUser, None)
    }

    pub fn end_user(id: UserId, username: impl Into<String>) -> DomainResult<Self> {
        Self::new(id, username, UserRole::EndUser, None)
    }

    pub fn warehouse_admin(id: UserId, username: impl Into<String>, warehouse: WarehouseId) -> DomainResult<Self> {
        Self::new(id, username, UserRole::WarehouseAdmin, Some(FacilityRef::Warehouse(warehouse)))
    }

    pub fn store_admin(id: UserId, username: impl Into<String>, store: StoreId) -> DomainResult<Self> {
        Self::new(id, username, UserRole::StoreAdmin, Some(FacilityRef::Store(store)))
    }

    pub fn warehouse_keeper(id: UserId, username: impl Into<String>, warehouse: WarehouseId) -> DomainResult<Self> {
        Self::new(id, username, UserRole::WarehouseKeeper, Some(FacilityRef::Warehouse(warehouse)))
    }

    pub fn storekeeper(id: UserId, username: impl Into<String>, store: StoreId) -> DomainResult<Self> {
        Self::new(id, username, UserRole::Storekeeper, Some(FacilityRef::Store(store)))
    }

    pub fn id_typed(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn facility(&self) -> Option<&FacilityRef> {
        self.facility.as_ref()
    }

    pub fn assigned_categories(&self) -> &[CategoryId] {
        &self.assigned_categories
    }

    /// Assign a category to an administrator or keeper. Returns `false` when it
    /// was already assigned.
    pub fn assign_category(&mut self, category_id: CategoryId) -> bool {
        if self.assigned_categories.contains(&category_id) {
            return false;
        }
        self.assigned_categories.push(category_id);
        true
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
