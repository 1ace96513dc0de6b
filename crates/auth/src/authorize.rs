use thiserror::Error;

use superstore_core::DomainError;

use crate::{FacilityRef, Permission, User};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: role '{role}' lacks permission '{permission}'")]
    Forbidden { role: String, permission: String },

    #[error("facility mismatch: user is bound to {bound}, not {requested}")]
    FacilityMismatch { bound: String, requested: String },
}

impl From<AuthzError> for DomainError {
    fn from(value: AuthzError) -> Self {
        DomainError::unauthorized(value.to_string())
    }
}

/// Check that `user` holds `required`, optionally within one facility.
///
/// - No IO
/// - No panics
/// - A user bound to a facility may only act on that facility; unbound users
///   (super user, end users) pass any facility scope.
pub fn authorize(user: &User, required: &Permission, scope: Option<&FacilityRef>) -> Result<(), AuthzError> {
    let granted = user
        .role()
        .permissions()
        .iter()
        .any(|p| p.is_wildcard() || p == required);

    if !granted {
        return Err(AuthzError::Forbidden {
            role: user.role().to_string(),
            permission: required.to_string(),
        });
    }

    if let (Some(requested), Some(bound)) = (scope, user.facility()) {
        if requested != bound {
            return Err(AuthzError::FacilityMismatch {
                bound: bound.to_string(),
                requested: requested.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use superstore_core::{StoreId, UserId, WarehouseId};

    fn store(id: &str) -> FacilityRef {
        FacilityRef::Store(StoreId::new(id))
    }

    #[test]
    fn super_user_passes_everything() {
        let root = User::super_user(UserId::new("SU001"), "superadmin").unwrap();
        assert!(authorize(&root, &Permission::FACILITY_CREATE, None).is_ok());
        assert!(authorize(&root, &Permission::CATALOG_MANAGE, Some(&store("S001"))).is_ok());
    }

    #[test]
    fn keeper_cannot_manage_catalog() {
        let keeper = User::storekeeper(UserId::new("U1"), "bob", StoreId::new("S001")).unwrap();

        let err = authorize(&keeper, &Permission::CATALOG_MANAGE, Some(&store("S001"))).unwrap_err();
        assert_eq!(
            err,
            AuthzError::Forbidden {
                role: "storekeeper".to_string(),
                permission: "catalog.manage".to_string(),
            }
        );
        assert!(authorize(&keeper, &Permission::INVENTORY_ADJUST, Some(&store("S001"))).is_ok());
    }

    #[test]
    fn bound_user_cannot_touch_other_facility() {
        let admin = User::store_admin(UserId::new("U2"), "carol", StoreId::new("S001")).unwrap();

        let err = authorize(&admin, &Permission::CATALOG_MANAGE, Some(&store("S002"))).unwrap_err();
        assert!(matches!(err, AuthzError::FacilityMismatch { .. }));

        let warehouse = FacilityRef::Warehouse(WarehouseId::new("S001"));
        assert!(authorize(&admin, &Permission::CATALOG_MANAGE, Some(&warehouse)).is_err());
    }

    #[test]
    fn end_user_can_browse_any_store() {
        let shopper = User::end_user(UserId::new("U3"), "dave").unwrap();
        assert!(authorize(&shopper, &Permission::CATALOG_READ, Some(&store("S009"))).is_ok());
        assert!(authorize(&shopper, &Permission::INVENTORY_ADJUST, Some(&store("S009"))).is_err());
    }

    #[test]
    fn converts_into_unauthorized_domain_error() {
        let err: DomainError = AuthzError::Forbidden {
            role: "end_user".to_string(),
            permission: "facility.create".to_string(),
        }
        .into();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }
}
