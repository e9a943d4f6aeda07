//! In-memory store implementation
//!
//! Orders do not survive a process restart.
//! Thread-safe using RwLock for concurrent access; every
//! lock scope is synchronous, so no lock is held across an await point.

use crate::error::StoreError;
use crate::repository::OrderRepository;
use async_trait::async_trait;
use fxsim_domain::{Order, OrderId, OrderStatus};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory order table
pub struct MemoryStore {
    orders: RwLock<Table>,
}

/// Records plus an insertion-order index for deterministic iteration.
#[derive(Default)]
struct Table {
    records: HashMap<OrderId, Order>,
    insertion_order: Vec<OrderId>,
}

impl MemoryStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(Table::default()),
        }
    }

    /// Clear all data (useful for test setup)
    pub fn clear(&self) {
        let mut table = self.orders.write().unwrap();
        table.records.clear();
        table.insertion_order.clear();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn insert(&self, order: &Order) -> Result<(), StoreError> {
        let mut table = self.orders.write().unwrap();
        if table.records.contains_key(&order.id) {
            return Err(StoreError::duplicate(order.id));
        }
        table.insertion_order.push(order.id);
        table.records.insert(order.id, order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let table = self.orders.read().unwrap();
        Ok(table.records.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Order>, StoreError> {
        let table = self.orders.read().unwrap();
        Ok(table
            .insertion_order
            .iter()
            .filter_map(|id| table.records.get(id).cloned())
            .collect())
    }

    async fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, StoreError> {
        let mut table = self.orders.write().unwrap();
        let order = table
            .records
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(id))?;

        order.advance_to(status).map_err(|e| StoreError::InvalidTransition {
            message: e.to_string(),
        })?;

        Ok(order.clone())
    }

    async fn delete(&self, id: OrderId) -> Result<(), StoreError> {
        let mut table = self.orders.write().unwrap();
        if table.records.remove(&id).is_none() {
            return Err(StoreError::not_found(id));
        }
        table.insertion_order.retain(|existing| *existing != id);
        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let table = self.orders.read().unwrap();
        Ok(table.records.len())
    }
}

// =============================================================================
// Tests
// =============================================================================
