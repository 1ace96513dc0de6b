//! `superstore-registry`: the in-process registry of warehouses, stores and
//! user accounts, with role-checked catalog, inventory and order operations.

pub mod config;
pub mod superstore;

pub use config::{InventoryFloor, RegistryConfig};
pub use superstore::{ReorderLine, Superstore};
