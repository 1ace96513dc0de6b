//! `superstore-auth`: role hierarchy and authorization checks.
//!
//! Holds no credentials and does no storage.

pub mod authorize;
pub mod permissions;
pub mod roles;
pub mod user;

pub use authorize::{AuthzError, authorize};
pub use permissions::Permission;
pub use roles::{FacilityKind, UserRole};
pub use user::{FacilityRef, User};
