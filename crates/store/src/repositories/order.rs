//! Order repository.

use finops_core::workflow::Order;
use finops_shared::types::{EntityId, OrderId};

use super::{ensure_collection, update_in_list};
use crate::error::StorageError;
use crate::keys;
use crate::tiered::{StorageTier, TieredStore};

/// Repository for investment orders.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    store: TieredStore,
}

impl OrderRepository {
    /// Creates a new order repository.
    #[must_use]
    pub const fn new(store: TieredStore) -> Self {
        Self { store }
    }

    /// All orders in placement order.
    #[must_use]
    pub fn list(&self) -> Vec<Order> {
        self.store.load_or_default(StorageTier::Durable, keys::ORDERS)
    }

    /// Orders of one entity, newest first.
    #[must_use]
    pub fn for_entity(&self, entity_id: &EntityId) -> Vec<Order> {
        let mut orders: Vec<_> = self
            .list()
            .into_iter()
            .filter(|o| &o.entity_id == entity_id)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Finds an order by id.
    #[must_use]
    pub fn find(&self, id: OrderId) -> Option<Order> {
        self.list().into_iter().find(|o| o.id == id)
    }

    /// Appends a newly placed order.
    pub fn insert(&self, order: Order) -> Result<(), StorageError> {
        let mut orders = self.list();
        orders.push(order);
        self.store.write_json(StorageTier::Durable, keys::ORDERS, &orders)
    }

    /// Applies `f` to order `id` and stores the result.
    ///
    /// Returns `Ok(None)` if the order does not exist.
    pub fn update<T, E>(
        &self,
        id: OrderId,
        f: impl FnOnce(&mut Order) -> Result<T, E>,
    ) -> Result<Option<(Order, T)>, E>
    where
        E: From<StorageError>,
    {
        let mut output = None;
        let updated = update_in_list(&self.store, keys::ORDERS, |o: &Order| o.id == id, |order| {
            output = Some(f(order)?);
            Ok::<(), E>(())
        })?;
        Ok(updated.zip(output))
    }

    /// Creates an empty order book if none is stored.
    pub fn ensure_initialized(&self) -> Result<bool, StorageError> {
        ensure_collection::<Vec<Order>>(&self.store, keys::ORDERS)
    }
}
