//! Repository trait definition (Port)
//!
//! Defines the storage interface for order records. The engine depends on
//! this trait only, so tests can substitute their own implementation.

use crate::error::StoreError;
use async_trait::async_trait;
use fxsim_domain::{Order, OrderId, OrderStatus};

/// Repository for Order records
///
/// All operations are atomic with respect to concurrent callers: no two
/// operations may interleave a read-modify-write on the same record.
/// Quantity is validated by callers; the store does not re-validate.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order
    ///
    /// Fails with `StoreError::Duplicate` if the id already exists.
    async fn insert(&self, order: &Order) -> Result<(), StoreError>;

    /// Find an order by ID
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    /// All current orders, in insertion order
    async fn find_all(&self) -> Result<Vec<Order>, StoreError>;

    /// Write a new status and return the updated record snapshot
    ///
    /// Fails with `StoreError::NotFound` for unknown ids and with
    /// `StoreError::InvalidTransition` on a backward status move.
    async fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, StoreError>;

    /// Remove an order
    ///
    /// Fails with `StoreError::NotFound` for unknown ids.
    async fn delete(&self, id: OrderId) -> Result<(), StoreError>;

    /// Number of current orders
    async fn count(&self) -> Result<usize, StoreError>;
}
