//! `superstore-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the error model and the arena table the catalog tree is built on.

pub mod entity;
pub mod error;
pub mod id;
pub mod table;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, ItemCode, MessageId, StoreId, SubcategoryId, UserId, WarehouseId};
pub use table::Table;
