use serde::{Deserialize, Serialize};

use superstore_catalog::{Category, Item};
use superstore_core::{DomainResult, Entity, MessageId, StoreId, Table, WarehouseId};

use crate::facility::Facility;
use crate::order::{OrderInbox, OrderMessage};

/// A warehouse supplying one or more stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    id: WarehouseId,
    name: String,
    linked_stores: Vec<StoreId>,
    categories: Table<Category>,
    inbox: OrderInbox,
}

impl Warehouse {
    pub fn new(id: WarehouseId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            linked_stores: Vec::new(),
            categories: Table::new(),
            inbox: OrderInbox::new(),
        }
    }

    pub fn id_typed(&self) -> &WarehouseId {
        &self.id
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Link a store. Returns `false` if it was already linked.
    pub fn link_store(&mut self, store_id: StoreId) -> bool {
        if self.linked_stores.contains(&store_id) {
            return false;
        }
        self.linked_stores.push(store_id);
        true
    }

    pub fn linked_stores(&self) -> &[StoreId] {
        &self.linked_stores
    }

    /// Items at or below their reorder point, lowest reorder point first.
    ///
    /// The sort is stable: items sharing a reorder point keep tree order.
    pub fn items_needing_reorder(&self) -> Vec<&Item> {
        let mut due: Vec<&Item> = self.items().filter(|item| item.needs_reordering()).collect();
        due.sort_by(|a, b| a.reorder_point().total_cmp(&b.reorder_point()));
        due
    }

    pub fn receive_message(&mut self, message: OrderMessage) -> DomainResult<()> {
        self.inbox.receive(message)
    }

    pub fn unprocessed_messages(&self) -> Vec<&OrderMessage> {
        self.inbox.unprocessed()
    }

    pub fn mark_processed(&mut self, message_id: &MessageId) -> DomainResult<()> {
        self.inbox.mark_processed(message_id)
    }

    pub fn inbox(&self) -> &OrderInbox {
        &self.inbox
    }
}

impl Facility for Warehouse {
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

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
