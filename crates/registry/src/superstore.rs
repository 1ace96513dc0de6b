//! The superstore registry: every warehouse, store and user account.
//!
//! Built explicitly from a [`RegistryConfig`] and passed by reference to
//! whoever needs it. It is `Send + Sync`:
//!
//! - each facility sits behind its own `Mutex`, held for the whole traversal
//!   or mutation of its catalog tree,
//! - the facility and user directories sit behind `RwLock`s that are only
//!   held long enough to look up or insert an entry,
//! - no code path holds two facility locks at the same time.

use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use superstore_auth::{FacilityRef, Permission, User, UserRole, authorize};
use superstore_catalog::{Category, Item, Subcategory};
use superstore_core::{
    CategoryId, DomainError, DomainResult, Entity, ItemCode, MessageId, StoreId, Table, UserId,
    WarehouseId,
};
use superstore_facilities::{Facility, OrderMessage, OrderOrigin, Store, Warehouse};

use crate::config::{InventoryFloor, RegistryConfig};

/// Directory entry for one facility.
#[derive(Debug)]
struct Slot<F: Entity> {
    id: F::Id,
    cell: Arc<Mutex<F>>,
}

impl<F: Entity> Slot<F> {
    fn new(facility: F) -> Self {
        Self {
            id: facility.id().clone(),
            cell: Arc::new(Mutex::new(facility)),
        }
    }
}

impl<F: Entity> Entity for Slot<F> {
    type Id = F::Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Owned summary of an item due for reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderLine {
    pub code: ItemCode,
    pub name: String,
    pub inventory_level: i64,
    pub reorder_point: f64,
    /// Suggested order size; 0 when the item has no carrying cost.
    pub economic_order_quantity: f64,
}

impl From<&Item> for ReorderLine {
    fn from(item: &Item) -> Self {
        Self {
            code: item.code().clone(),
            name: item.name().to_string(),
            inventory_level: item.inventory_level(),
            reorder_point: item.reorder_point(),
            economic_order_quantity: item.economic_order_quantity(),
        }
    }
}

#[derive(Debug)]
pub struct Superstore {
    config: RegistryConfig,
    warehouses: RwLock<Table<Slot<Warehouse>>>,
    stores: RwLock<Table<Slot<Store>>>,
    users: RwLock<Table<User>>,
}

fn read<'a, T>(lock: &'a RwLock<T>, what: &str) -> DomainResult<RwLockReadGuard<'a, T>> {
    lock.read()
        .map_err(|_| DomainError::unavailable(format!("{what} lock poisoned")))
}

fn write<'a, T>(lock: &'a RwLock<T>, what: &str) -> DomainResult<RwLockWriteGuard<'a, T>> {
    lock.write()
        .map_err(|_| DomainError::unavailable(format!("{what} lock poisoned")))
}

fn lock<T>(cell: &Mutex<T>) -> DomainResult<MutexGuard<'_, T>> {
    cell.lock()
        .map_err(|_| DomainError::unavailable("facility lock poisoned"))
}

impl Superstore {
    /// Create an empty registry holding only the configured super user.
    pub fn new(config: RegistryConfig) -> DomainResult<Self> {
        let mut users = Table::new();
        users.insert(User::super_user(
            config.super_user_id.clone(),
            config.super_username.clone(),
        )?)?;

        tracing::info!(super_user = %config.super_user_id, "registry initialized");

        Ok(Self {
            config,
            warehouses: RwLock::new(Table::new()),
            stores: RwLock::new(Table::new()),
            users: RwLock::new(users),
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The built-in super user account.
    pub fn super_user(&self) -> DomainResult<User> {
        self.user(&self.config.super_user_id)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Authorization helpers
    // ─────────────────────────────────────────────────────────────────────

    /// Shopper access: the role check alone.
    fn authorize_read(actor: &User, permission: &Permission, scope: Option<&FacilityRef>) -> DomainResult<()> {
        Ok(authorize(actor, permission, scope)?)
    }

    /// The role check plus a registered account with the same role and
    /// facility binding. Required for every mutation and for staff reads.
    fn authorize_registered(&self, actor: &User, permission: &Permission, scope: Option<&FacilityRef>) -> DomainResult<()> {
        authorize(actor, permission, scope)?;
        let users = read(&self.users, "user directory")?;
        match users.get(actor.id_typed()) {
            Some(registered) if registered.role() == actor.role() && registered.facility() == actor.facility() => {
                Ok(())
            }
            _ => Err(DomainError::unauthorized(format!(
                "user {} is not a registered account",
                actor.id_typed()
            ))),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Facility directory
    // ─────────────────────────────────────────────────────────────────────

    pub fn create_warehouse(&self, actor: &User, id: WarehouseId, name: impl Into<String>) -> DomainResult<()> {
        self.authorize_registered(actor, &Permission::FACILITY_CREATE, None)?;

        let warehouse = Warehouse::new(id.clone(), name);
        write(&self.warehouses, "warehouse directory")?.insert(Slot::new(warehouse))?;

        tracing::info!(warehouse = %id, "warehouse created");
        Ok(())
    }

    /// Create a store supplied by `warehouse_id`.
    ///
    /// The store always records the link. The warehouse side is linked only if
    /// that warehouse exists already.
    pub fn create_store(
        &self,
        actor: &User,
        id: StoreId,
        name: impl Into<String>,
        warehouse_id: WarehouseId,
    ) -> DomainResult<()> {
        self.authorize_registered(actor, &Permission::FACILITY_CREATE, None)?;

        let cell = match self.warehouse_cell(&warehouse_id) {
            Ok(cell) => Some(cell),
            Err(DomainError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };
        // Held across the store insert so a failed lock leaves nothing behind.
        let mut supplier = cell.as_deref().map(lock).transpose()?;

        let mut store = Store::new(id.clone(), name);
        store.link_warehouse(warehouse_id.clone());
        write(&self.stores, "store directory")?.insert(Slot::new(store))?;

        match supplier.as_mut() {
            Some(warehouse) => {
                warehouse.link_store(id.clone());
            }
            None => {
                tracing::warn!(store = %id, warehouse = %warehouse_id, "store linked to unknown warehouse");
            }
        }

        tracing::info!(store = %id, warehouse = %warehouse_id, "store created");
        Ok(())
    }

    pub fn warehouse_ids(&self) -> DomainResult<Vec<WarehouseId>> {
        Ok(read(&self.warehouses, "warehouse directory")?.ids().cloned().collect())
    }

    pub fn store_ids(&self) -> DomainResult<Vec<StoreId>> {
        Ok(read(&self.stores, "store directory")?.ids().cloned().collect())
    }

    fn warehouse_cell(&self, id: &WarehouseId) -> DomainResult<Arc<Mutex<Warehouse>>> {
        read(&self.warehouses, "warehouse directory")?
            .get(id)
            .map(|slot| Arc::clone(&slot.cell))
            .ok_or_else(|| DomainError::not_found(format!("warehouse {id}")))
    }

    fn store_cell(&self, id: &StoreId) -> DomainResult<Arc<Mutex<Store>>> {
        read(&self.stores, "store directory")?
            .get(id)
            .map(|slot| Arc::clone(&slot.cell))
            .ok_or_else(|| DomainError::not_found(format!("store {id}")))
    }

    /// Run `f` on a warehouse while holding its lock.
    pub fn with_warehouse<R>(&self, id: &WarehouseId, f: impl FnOnce(&Warehouse) -> R) -> DomainResult<R> {
        let cell = self.warehouse_cell(id)?;
        let guard = lock(&*cell)?;
        Ok(f(&guard))
    }

    pub fn with_warehouse_mut<R>(&self, id: &WarehouseId, f: impl FnOnce(&mut Warehouse) -> R) -> DomainResult<R> {
        let cell = self.warehouse_cell(id)?;
        let mut guard = lock(&*cell)?;
        Ok(f(&mut guard))
    }

    /// Run `f` on a store while holding its lock.
    pub fn with_store<R>(&self, id: &StoreId, f: impl FnOnce(&Store) -> R) -> DomainResult<R> {
        let cell = self.store_cell(id)?;
        let guard = lock(&*cell)?;
        Ok(f(&guard))
    }

    pub fn with_store_mut<R>(&self, id: &StoreId, f: impl FnOnce(&mut Store) -> R) -> DomainResult<R> {
        let cell = self.store_cell(id)?;
        let mut guard = lock(&*cell)?;
        Ok(f(&mut guard))
    }

    pub fn with_facility_mut<R>(
        &self,
        facility: &FacilityRef,
        f: impl FnOnce(&mut dyn Facility) -> R,
    ) -> DomainResult<R> {
        match facility {
            FacilityRef::Warehouse(id) => self.with_warehouse_mut(id, |w| f(w)),
            FacilityRef::Store(id) => self.with_store_mut(id, |s| f(s)),
        }
    }

    fn facility_exists(&self, facility: &FacilityRef) -> DomainResult<bool> {
        Ok(match facility {
            FacilityRef::Warehouse(id) => read(&self.warehouses, "warehouse directory")?.contains(id),
            FacilityRef::Store(id) => read(&self.stores, "store directory")?.contains(id),
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // User directory
    // ─────────────────────────────────────────────────────────────────────

    /// Register an account. The actor must sit directly above the new
    /// account's role and, when bound, share its facility.
    pub fn create_user(&self, actor: &User, user: User) -> DomainResult<()> {
        self.authorize_registered(actor, &Permission::USER_MANAGE, user.facility())?;
        if !actor.role().can_manage(user.role()) {
            return Err(DomainError::unauthorized(format!(
                "{} cannot create {} accounts",
                actor.role(),
                user.role()
            )));
        }
        if let Some(facility) = user.facility() {
            if !self.facility_exists(facility)? {
                return Err(DomainError::not_found(facility.to_string()));
            }
        }

        let (id, username, role) = (user.id_typed().clone(), user.username().to_string(), user.role());
        write(&self.users, "user directory")?.insert(user)?;

        tracing::info!(user = %id, %username, %role, "user created");
        Ok(())
    }

    pub fn delete_user(&self, actor: &User, id: &UserId) -> DomainResult<User> {
        let target = self.user(id)?;
        self.authorize_registered(actor, &Permission::USER_MANAGE, target.facility())?;
        if *id == self.config.super_user_id && actor.role() == UserRole::SuperUser {
            return Err(DomainError::validation("the built-in super user cannot be deleted"));
        }
        if !actor.role().can_manage(target.role()) {
            return Err(DomainError::unauthorized(format!(
                "{} cannot delete {} accounts",
                actor.role(),
                target.role()
            )));
        }

        let removed = write(&self.users, "user directory")?
            .remove(id)
            .ok_or_else(|| DomainError::not_found(format!("user {id}")))?;

        tracing::info!(user = %id, username = %removed.username(), role = %removed.role(), "user deleted");
        Ok(removed)
    }

    /// Give an account responsibility for one category of its facility.
    pub fn assign_category(&self, actor: &User, user_id: &UserId, category_id: CategoryId) -> DomainResult<()> {
        let target = self.user(user_id)?;
        self.authorize_registered(actor, &Permission::USER_MANAGE, target.facility())?;
        if !actor.role().can_manage(target.role()) {
            return Err(DomainError::unauthorized(format!(
                "{} cannot manage {} accounts",
                actor.role(),
                target.role()
            )));
        }
        let facility = target
            .facility()
            .ok_or_else(|| DomainError::validation("account is not bound to a facility"))?;
        let known = self.with_facility_mut(facility, |f| f.category(&category_id).is_some())?;
        if !known {
            return Err(DomainError::not_found(format!("category {category_id}")));
        }

        let mut users = write(&self.users, "user directory")?;
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| DomainError::not_found(format!("user {user_id}")))?;
        if user.assign_category(category_id.clone()) {
            tracing::info!(user = %user_id, category = %category_id, "category assigned");
        }
        Ok(())
    }

    pub fn user(&self, id: &UserId) -> DomainResult<User> {
        read(&self.users, "user directory")?
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("user {id}")))
    }

    pub fn users(&self) -> DomainResult<Vec<User>> {
        Ok(read(&self.users, "user directory")?.iter().cloned().collect())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Catalog administration
    // ─────────────────────────────────────────────────────────────────────

    pub fn add_category(&self, actor: &User, facility: &FacilityRef, category: Category) -> DomainResult<()> {
        self.authorize_registered(actor, &Permission::CATALOG_MANAGE, Some(facility))?;
        let id = category.id_typed().clone();
        self.with_facility_mut(facility, |f| f.insert_category(category).map(|_| ()))??;
        tracing::info!(%facility, category = %id, "category added");
        Ok(())
    }

    pub fn remove_category(&self, actor: &User, facility: &FacilityRef, id: &CategoryId) -> DomainResult<Category> {
        self.authorize_registered(actor, &Permission::CATALOG_MANAGE, Some(facility))?;
        let removed = self
            .with_facility_mut(facility, |f| f.remove_category(id))?
            .ok_or_else(|| DomainError::not_found(format!("category {id}")))?;
        tracing::info!(%facility, category = %id, "category removed");
        Ok(removed)
    }

    /// Add a subcategory under the category it names.
    pub fn add_subcategory(&self, actor: &User, facility: &FacilityRef, subcategory: Subcategory) -> DomainResult<()> {
        self.authorize_registered(actor, &Permission::CATALOG_MANAGE, Some(facility))?;
        let id = subcategory.id_typed().clone();
        let category_id = subcategory.category_id().clone();
        self.with_facility_mut(facility, |f| {
            f.category_mut(&category_id)
                .ok_or_else(|| DomainError::not_found(format!("category {category_id}")))?
                .insert_subcategory(subcategory)
                .map(|_| ())
        })??;
        tracing::info!(%facility, category = %category_id, subcategory = %id, "subcategory added");
        Ok(())
    }

    /// Add an item under the subcategory it names. Item codes already used in
    /// that subcategory are refused.
    pub fn add_item(&self, actor: &User, facility: &FacilityRef, item: Item) -> DomainResult<()> {
        self.authorize_registered(actor, &Permission::CATALOG_MANAGE, Some(facility))?;
        let code = item.code().clone();
        let subcategory_id = item.subcategory_id().clone();
        self.with_facility_mut(facility, |f| {
            f.find_subcategory_mut(&subcategory_id)
                .ok_or_else(|| DomainError::not_found(format!("subcategory {subcategory_id}")))?
                .insert_item(item)
                .map(|_| ())
        })??;
        tracing::info!(%facility, subcategory = %subcategory_id, item = %code, "item added");
        Ok(())
    }

    /// Apply an in-place edit (description, replenishment parameters) to an item.
    pub fn update_item(
        &self,
        actor: &User,
        facility: &FacilityRef,
        code: &ItemCode,
        edit: impl FnOnce(&mut Item),
    ) -> DomainResult<()> {
        self.authorize_registered(actor, &Permission::CATALOG_MANAGE, Some(facility))?;
        self.with_facility_mut(facility, |f| {
            let item = f
                .find_item_mut(code)
                .ok_or_else(|| DomainError::not_found(format!("item {code}")))?;
            edit(item);
            Ok::<_, DomainError>(())
        })??;
        tracing::info!(%facility, item = %code, "item updated");
        Ok(())
    }

    pub fn remove_item(&self, actor: &User, facility: &FacilityRef, code: &ItemCode) -> DomainResult<Item> {
        self.authorize_registered(actor, &Permission::CATALOG_MANAGE, Some(facility))?;
        let removed = self
            .with_facility_mut(facility, |f| f.remove_item(code))?
            .ok_or_else(|| DomainError::not_found(format!("item {code}")))?;
        tracing::info!(%facility, item = %code, "item removed");
        Ok(removed)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Keeper operations
    // ─────────────────────────────────────────────────────────────────────

    /// Record goods received. Returns the new level.
    pub fn record_inventory_in(
        &self,
        actor: &User,
        facility: &FacilityRef,
        code: &ItemCode,
        units: u32,
    ) -> DomainResult<i64> {
        self.authorize_registered(actor, &Permission::INVENTORY_ADJUST, Some(facility))?;
        let level = self.with_facility_mut(facility, |f| {
            let item = f
                .find_item_mut(code)
                .ok_or_else(|| DomainError::not_found(format!("item {code}")))?;
            item.add_inventory(i64::from(units));
            Ok::<_, DomainError>(item.inventory_level())
        })??;
        tracing::info!(%facility, item = %code, units, level, "inventory in");
        Ok(level)
    }

    /// Record goods issued. Returns the new level, after the configured
    /// [`InventoryFloor`] policy is applied.
    pub fn record_inventory_out(
        &self,
        actor: &User,
        facility: &FacilityRef,
        code: &ItemCode,
        units: u32,
    ) -> DomainResult<i64> {
        self.authorize_registered(actor, &Permission::INVENTORY_ADJUST, Some(facility))?;
        let floor = self.config.inventory_floor;
        let level = self.with_facility_mut(facility, |f| {
            let item = f
                .find_item_mut(code)
                .ok_or_else(|| DomainError::not_found(format!("item {code}")))?;
            item.remove_inventory(i64::from(units));
            if floor == InventoryFloor::Clamp && item.inventory_level() < 0 {
                item.set_inventory_level(0);
            }
            Ok::<_, DomainError>(item.inventory_level())
        })??;
        tracing::info!(%facility, item = %code, units, level, "inventory out");
        Ok(level)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Replenishment queries
    // ─────────────────────────────────────────────────────────────────────

    /// Snapshot of a store's items with exactly zero stock.
    pub fn out_of_stock_items(&self, actor: &User, store_id: &StoreId) -> DomainResult<Vec<Item>> {
        self.authorize_registered(actor, &Permission::CATALOG_READ, Some(&FacilityRef::Store(store_id.clone())))?;
        let items = self.with_store(store_id, |s| {
            s.out_of_stock_items().into_iter().cloned().collect::<Vec<_>>()
        })?;
        tracing::debug!(store = %store_id, count = items.len(), "out-of-stock scan");
        Ok(items)
    }

    /// A warehouse's reorder list, lowest reorder point first.
    pub fn items_needing_reorder(&self, actor: &User, warehouse_id: &WarehouseId) -> DomainResult<Vec<ReorderLine>> {
        self.authorize_registered(
            actor,
            &Permission::CATALOG_READ,
            Some(&FacilityRef::Warehouse(warehouse_id.clone())),
        )?;
        let lines = self.with_warehouse(warehouse_id, |w| {
            w.items_needing_reorder()
                .into_iter()
                .map(ReorderLine::from)
                .collect::<Vec<_>>()
        })?;
        tracing::debug!(warehouse = %warehouse_id, count = lines.len(), "reorder scan");
        Ok(lines)
    }

    /// Catalog search over a whole store, as offered to shoppers.
    pub fn search_store(&self, actor: &User, store_id: &StoreId, term: &str) -> DomainResult<Vec<Item>> {
        Self::authorize_read(actor, &Permission::CATALOG_READ, Some(&FacilityRef::Store(store_id.clone())))?;
        self.with_store(store_id, |s| s.search_items(term).into_iter().cloned().collect())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Order messages
    // ─────────────────────────────────────────────────────────────────────

    /// Deliver an order request to its destination warehouse.
    pub fn send_order_message(&self, actor: &User, message: OrderMessage) -> DomainResult<()> {
        let origin = match &message.from {
            OrderOrigin::Store(id) => FacilityRef::Store(id.clone()),
            OrderOrigin::Warehouse(id) => FacilityRef::Warehouse(id.clone()),
        };
        let permission = match origin {
            FacilityRef::Store(_) => Permission::ORDERS_SEND,
            FacilityRef::Warehouse(_) => Permission::ORDERS_PROCESS,
        };
        self.authorize_registered(actor, &permission, Some(&origin))?;

        let (id, from, to) = (message.message_id.clone(), message.from.clone(), message.to_warehouse.clone());
        self.with_warehouse_mut(&to, |w| w.receive_message(message))??;

        tracing::info!(message = %id, %from, to = %to, "order message sent");
        Ok(())
    }

    /// Re-address a received message to another warehouse under a new id.
    pub fn forward_order_message(
        &self,
        actor: &User,
        from: &WarehouseId,
        to: &WarehouseId,
        message_id: &MessageId,
    ) -> DomainResult<MessageId> {
        self.authorize_registered(actor, &Permission::ORDERS_PROCESS, Some(&FacilityRef::Warehouse(from.clone())))?;

        let original = self
            .with_warehouse(from, |w| w.inbox().message(message_id).cloned())?
            .ok_or_else(|| DomainError::not_found(format!("order message {message_id}")))?;
        let forwarded = original.forwarded(from.clone(), to.clone(), Utc::now().date_naive());
        let forwarded_id = forwarded.message_id.clone();

        self.with_warehouse_mut(to, |w| w.receive_message(forwarded))??;

        tracing::info!(original = %message_id, message = %forwarded_id, from = %from, to = %to, "order message forwarded");
        Ok(forwarded_id)
    }

    pub fn unprocessed_messages(&self, actor: &User, warehouse_id: &WarehouseId) -> DomainResult<Vec<OrderMessage>> {
        self.authorize_registered(
            actor,
            &Permission::ORDERS_PROCESS,
            Some(&FacilityRef::Warehouse(warehouse_id.clone())),
        )?;
        self.with_warehouse(warehouse_id, |w| {
            w.unprocessed_messages().into_iter().cloned().collect()
        })
    }

    pub fn mark_processed(&self, actor: &User, warehouse_id: &WarehouseId, message_id: &MessageId) -> DomainResult<()> {
        self.authorize_registered(
            actor,
            &Permission::ORDERS_PROCESS,
            Some(&FacilityRef::Warehouse(warehouse_id.clone())),
        )?;
        self.with_warehouse_mut(warehouse_id, |w| w.mark_processed(message_id))??;
        tracing::info!(warehouse = %warehouse_id, message = %message_id, "order message processed");
        Ok(())
    }
}
