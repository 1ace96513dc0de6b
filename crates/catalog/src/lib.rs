//! Catalog domain module.
//!
//! Items and the category/subcategory tree that owns them, plus the
//! replenishment arithmetic (EOQ, safety stock, reorder point). Pure domain
//! logic: no IO, no locking, no storage.

pub mod category;
pub mod item;
pub mod subcategory;

pub use category::Category;
pub use item::{Item, ReplenishmentParams};
pub use subcategory::Subcategory;
