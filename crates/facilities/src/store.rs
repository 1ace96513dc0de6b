use serde::{Deserialize, Serialize};

use superstore_catalog::{Category, Item};
use superstore_core::{Entity, StoreId, Table, WarehouseId};

use crate::facility::Facility;

/// A retail store. Replenished from at most one linked warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    id: StoreId,
    name: String,
    linked_warehouse: Option<WarehouseId>,
    categories: Table<Category>,
}

impl Store {
    pub fn new(id: StoreId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            linked_warehouse: None,
            categories: Table::new(),
        }
    }

    pub fn id_typed(&self) -> &StoreId {
        &self.id
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Point the store at its supplying warehouse (replaces any previous link).
    pub fn link_warehouse(&mut self, warehouse_id: WarehouseId) {
        self.linked_warehouse = Some(warehouse_id);
    }

    pub fn linked_warehouse(&self) -> Option<&WarehouseId> {
        self.linked_warehouse.as_ref()
    }

    /// Items whose level is exactly zero. Negative levels are not reported.
    pub fn out_of_stock_items(&self) -> Vec<&Item> {
        self.items()
            .filter(|item| item.inventory_level() == 0)
            .collect()
    }
}

impl Facility for Store {
    fn name(&self) -> &str {
        &self.name
    }

    fn categories(&self) -> &Table<Category> {
        &self.categories
    }

    fn categories_mut(&mut self) -> &mut Table<Category> {
        &mut self.categories
    }
}

impl Entity for Store {
    type Id = StoreId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
