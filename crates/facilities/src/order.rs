//! Replenishment requests exchanged between facilities.
//!
//! A warehouse keeps every message it receives in an append-only inbox keyed
//! by message id, so redelivering the same message is refused instead of being
//! processed twice.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use superstore_catalog::Item;
use superstore_core::{DomainError, DomainResult, Entity, ItemCode, MessageId, StoreId, Table, WarehouseId};

/// Facility that sent an order message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum OrderOrigin {
    Store(StoreId),
    Warehouse(WarehouseId),
}

impl core::fmt::Display for OrderOrigin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OrderOrigin::Store(id) => write!(f, "store {id}"),
            OrderOrigin::Warehouse(id) => write!(f, "warehouse {id}"),
        }
    }
}

/// An order request addressed to a warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMessage {
    pub message_id: MessageId,
    pub from: OrderOrigin,
    pub to_warehouse: WarehouseId,
    pub item_name: String,
    pub item_code: ItemCode,
    pub quantity: u32,
    pub expected_arrival: NaiveDate,
    pub sent_on: NaiveDate,
    pub processed: bool,
}

impl OrderMessage {
    /// New, unprocessed request for `quantity` units of `item`, under a freshly
    /// generated message id.
    pub fn request(
        from: OrderOrigin,
        to_warehouse: WarehouseId,
        item: &Item,
        quantity: u32,
        expected_arrival: NaiveDate,
        sent_on: NaiveDate,
    ) -> Self {
        Self {
            message_id: MessageId::generate(),
            from,
            to_warehouse,
            item_name: item.name().to_string(),
            item_code: item.code().clone(),
            quantity,
            expected_arrival,
            sent_on,
            processed: false,
        }
    }

    /// Copy of this request re-addressed from one warehouse to another.
    ///
    /// The copy gets a new message id and starts unprocessed; item, quantity
    /// and expected arrival are kept.
    pub fn forwarded(&self, from: WarehouseId, to: WarehouseId, sent_on: NaiveDate) -> Self {
        Self {
            message_id: MessageId::generate(),
            from: OrderOrigin::Warehouse(from),
            to_warehouse: to,
            item_name: self.item_name.clone(),
            item_code: self.item_code.clone(),
            quantity: self.quantity,
            expected_arrival: self.expected_arrival,
            sent_on,
            processed: false,
        }
    }
}

impl Entity for OrderMessage {
    type Id = MessageId;

    fn id(&self) -> &Self::Id {
        &self.message_id
    }
}

/// Append-only log of received order messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderInbox {
    messages: Table<OrderMessage>,
}

impl OrderInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. A message id seen before yields `Conflict` and the log
    /// is left unchanged.
    pub fn receive(&mut self, message: OrderMessage) -> DomainResult<()> {
        self.messages.insert(message).map(|_| ())
    }

    pub fn message(&self, id: &MessageId) -> Option<&OrderMessage> {
        self.messages.get(id)
    }

    /// Every message in arrival order.
    pub fn messages(&self) -> impl Iterator<Item = &OrderMessage> + '_ {
        self.messages.iter()
    }

    pub fn unprocessed(&self) -> Vec<&OrderMessage> {
        self.messages.iter().filter(|m| !m.processed).collect()
    }

    /// Flag a message as processed. Marking twice is a no-op.
    pub fn mark_processed(&mut self, id: &MessageId) -> DomainResult<()> {
        let message = self
            .messages
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(format!("order message {id}")))?;
        message.processed = true;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use superstore_core::SubcategoryId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cola() -> Item {
        Item::new(ItemCode::new("I001"), "Cola", SubcategoryId::new("S001"))
    }

    fn request() -> OrderMessage {
        OrderMessage::request(
            OrderOrigin::Store(StoreId::new("S001")),
            WarehouseId::new("W001"),
            &cola(),
            24,
            date(2026, 3, 10),
            date(2026, 3, 1),
        )
    }

    #[test]
    fn request_copies_item_details() {
        let msg = request();
        assert_eq!(msg.item_code.as_str(), "I001");
        assert_eq!(msg.item_name, "Cola");
        assert_eq!(msg.quantity, 24);
        assert!(!msg.processed);
        assert!(msg.message_id.as_str().starts_with("MSG-"));
    }

    #[test]
    fn inbox_refuses_redelivered_message() {
        let mut inbox = OrderInbox::new();
        let msg = request();

        inbox.receive(msg.clone()).unwrap();
        match inbox.receive(msg).unwrap_err() {
            DomainError::Conflict(_) => {}
            _ => panic!("Expected Conflict error for duplicate message id"),
        }
        assert_eq!(inbox.len(), 1);
    }

    #[test]
    fn mark_processed_filters_message_out_of_unprocessed() {
        let mut inbox = OrderInbox::new();
        let first = request();
        let second = request();
        inbox.receive(first.clone()).unwrap();
        inbox.receive(second.clone()).unwrap();

        inbox.mark_processed(&first.message_id).unwrap();
        inbox.mark_processed(&first.message_id).unwrap();

        let pending: Vec<&MessageId> = inbox.unprocessed().iter().map(|m| &m.message_id).collect();
        assert_eq!(pending, vec![&second.message_id]);
        assert!(inbox.message(&first.message_id).unwrap().processed);
    }

    #[test]
    fn mark_processed_unknown_message_is_not_found() {
        let mut inbox = OrderInbox::new();
        match inbox.mark_processed(&MessageId::new("nope")).unwrap_err() {
            DomainError::NotFound(_) => {}
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn forwarded_copy_gets_new_id_and_origin() {
        let original = request();
        let forwarded = original.forwarded(
            WarehouseId::new("W001"),
            WarehouseId::new("W002"),
            date(2026, 3, 2),
        );

        assert_ne!(forwarded.message_id, original.message_id);
        assert_eq!(forwarded.from, OrderOrigin::Warehouse(WarehouseId::new("W001")));
        assert_eq!(forwarded.to_warehouse.as_str(), "W002");
        assert_eq!(forwarded.quantity, original.quantity);
        assert_eq!(forwarded.expected_arrival, original.expected_arrival);
        assert_eq!(forwarded.sent_on, date(2026, 3, 2));
    }

    #[test]
    fn message_serializes_with_tagged_origin() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["from"]["kind"], "store");
        assert_eq!(json["from"]["id"], "S001");
        assert_eq!(json["to_warehouse"], "W001");
        assert_eq!(json["expected_arrival"], "2026-03-10");
        assert_eq!(json["processed"], false);
    }
}
