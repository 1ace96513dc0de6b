//! Facilities domain module.
//!
//! Stores and warehouses own a catalog tree and answer the replenishment
//! questions asked of it: which store items are out of stock, and which
//! warehouse items must be reordered. Warehouses also keep the inbox of order
//! requests sent to them.

pub mod facility;
pub mod order;
pub mod store;
pub mod warehouse;

pub use facility::Facility;
pub use order::{OrderInbox, OrderMessage, OrderOrigin};
pub use store::Store;
pub use warehouse::Warehouse;
