//! Lifecycle driver: the per-order asynchronous process.
//!
//! Exactly one driver task exists per order. It walks the fixed status
//! sequence, re-reading the store at every step so an explicit cancel
//! (record removal) stops it immediately, and publishes one event per
//! transition. A failure inside one driver never touches sibling drivers.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use fxsim_domain::{OrderEvent, OrderId, OrderStatus};
use fxsim_store::OrderRepository;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::delay::DelaySource;
use crate::event_bus::EventBus;

/// Run the fixed transition sequence for one order.
///
/// For each status in the sequence: wait one delay, write the status
/// through the store (an atomic read-modify-write against the current
/// record), then publish a snapshot of the now-current record. If the
/// record is gone the order was cancelled; the driver terminates silently
/// and never resurrects it.
pub async fn drive<S: OrderRepository>(
    store: Arc<S>,
    bus: Arc<EventBus>,
    delay: Arc<dyn DelaySource>,
    order_id: OrderId,
) {
    for status in OrderStatus::SEQUENCE {
        delay.wait().await;

        match store.set_status(order_id, status).await {
            Ok(order) => {
                let delivered = bus.publish(OrderEvent::snapshot(&order));
                debug!(%order_id, %status, delivered, "Order transition published");
            }
            Err(e) if e.is_not_found() => {
                debug!(%order_id, "Order cancelled, stopping lifecycle");
                return;
            }
            Err(e) => {
                // Isolate the failure to this order's lifecycle
                error!(%order_id, error = %e, "Lifecycle step failed");
                return;
            }
        }
    }
}

// =============================================================================
// Driver Supervisor
// =============================================================================

/// Tracked set of running driver tasks (order_id -> task handle).
///
/// Drivers are fire-and-forget for submitters, but tests (and shutdown)
/// need to await or abort them, so every spawn goes through here.
/// Completed drivers remove their own entry.
#[derive(Clone, Default)]
pub struct DriverSupervisor {
    tasks: Arc<RwLock<HashMap<OrderId, JoinHandle<()>>>>,
}

impl DriverSupervisor {
    /// Create an empty supervisor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn and track a driver task for an order.
    ///
    /// The write lock is held across the insert so the task's own
    /// completion cleanup cannot run before its handle is registered.
    pub async fn spawn<F>(&self, order_id: OrderId, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let tasks = self.tasks.clone();
        let mut guard = self.tasks.write().await;
        let handle = tokio::spawn(async move {
            future.await;
            tasks.write().await.remove(&order_id);
        });
        guard.insert(order_id, handle);
    }

    /// Abort the driver for an order, if one is still running.
    ///
    /// Returns true if a task was aborted.
    pub async fn abort(&self, order_id: OrderId) -> bool {
        if let Some(handle) = self.tasks.write().await.remove(&order_id) {
            handle.abort();
            true
        } else {
            false
        }
    }

    /// Wait for the driver of an order to finish.
    ///
    /// Returns immediately if the driver already completed.
    pub async fn wait(&self, order_id: OrderId) {
        let handle = self.tasks.write().await.remove(&order_id);
        if let Some(handle) = handle {
            // Err means the task was aborted; nothing to propagate
            let _ = handle.await;
        }
    }

    /// Abort every tracked driver (shutdown path).
    pub async fn abort_all(&self) {
        let mut tasks = self.tasks.write().await;
        for (_, handle) in tasks.drain() {
            handle.abort();
        }
    }

    /// Number of tracked drivers.
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Whether no drivers are tracked.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

// =============================================================================
// Tests
// =============================================================================
