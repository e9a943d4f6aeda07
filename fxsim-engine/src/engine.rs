//! Engine facade: the four operations the transport layer consumes.
//!
//! `submit` validates, creates the record, and starts the order's driver
//! before returning; the lifecycle then runs independently of the caller.

use std::sync::Arc;

use fxsim_domain::{Order, OrderId, Quantity, Symbol};
use fxsim_store::OrderRepository;
use rust_decimal::Decimal;
use tracing::info;

use crate::delay::DelaySource;
use crate::driver::{drive, DriverSupervisor};
use crate::error::{EngineError, EngineResult};
use crate::event_bus::{EventBus, EventStream};

/// The order lifecycle engine.
pub struct Engine<S: OrderRepository + 'static> {
    store: Arc<S>,
    bus: Arc<EventBus>,
    delay: Arc<dyn DelaySource>,
    drivers: DriverSupervisor,
}

impl<S: OrderRepository + 'static> Engine<S> {
    /// Create an engine over the given store, bus, and delay source.
    pub fn new(store: Arc<S>, bus: Arc<EventBus>, delay: Arc<dyn DelaySource>) -> Self {
        Self {
            store,
            bus,
            delay,
            drivers: DriverSupervisor::new(),
        }
    }

    /// Submit a new order.
    ///
    /// Validates the inputs, creates the `pending` record, spawns exactly
    /// one lifecycle driver for it, and returns as soon as the record
    /// exists. The driver's transitions are published to all subscribers.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInput` naming the offending field.
    pub async fn submit(&self, stocks: &str, quantity: Decimal) -> EngineResult<Order> {
        let symbol =
            Symbol::new(stocks).map_err(|e| EngineError::invalid_input("stocks", e))?;
        let quantity =
            Quantity::new(quantity).map_err(|e| EngineError::invalid_input("quantity", e))?;

        let order = Order::new(symbol, quantity);
        self.store.insert(&order).await?;

        info!(
            order_id = %order.id,
            stocks = %order.stocks,
            quantity = %order.quantity,
            "Order submitted"
        );

        self.drivers
            .spawn(
                order.id,
                drive(
                    self.store.clone(),
                    self.bus.clone(),
                    self.delay.clone(),
                    order.id,
                ),
            )
            .await;

        Ok(order)
    }

    /// Look up one order.
    pub async fn get(&self, order_id: OrderId) -> EngineResult<Order> {
        self.store
            .find_by_id(order_id)
            .await?
            .ok_or(EngineError::NotFound(order_id))
    }

    /// All current orders, in submission order.
    pub async fn list(&self) -> EngineResult<Vec<Order>> {
        Ok(self.store.find_all().await?)
    }

    /// Cancel an order: remove the record and stop its driver.
    ///
    /// Valid at any status. Subsequent driver steps for this id become
    /// no-ops; no event with a later status is ever published.
    pub async fn cancel(&self, order_id: OrderId) -> EngineResult<()> {
        match self.store.delete(order_id).await {
            Ok(()) => {
                self.drivers.abort(order_id).await;
                info!(%order_id, "Order cancelled");
                Ok(())
            }
            Err(e) if e.is_not_found() => Err(EngineError::NotFound(order_id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Register a subscriber for all lifecycle events.
    ///
    /// Dropping the returned stream unregisters it.
    pub fn subscribe(&self) -> EventStream {
        self.bus.subscribe()
    }

    /// Number of currently-registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.bus.receiver_count()
    }

    /// Wait for one order's driver to finish (test hook).
    pub async fn wait_for_driver(&self, order_id: OrderId) {
        self.drivers.wait(order_id).await;
    }

    /// Number of drivers still running.
    pub async fn active_drivers(&self) -> usize {
        self.drivers.len().await
    }

    /// Number of current order records.
    pub async fn order_count(&self) -> EngineResult<usize> {
        Ok(self.store.count().await?)
    }

    /// Abort all outstanding drivers (shutdown path).
    pub async fn shutdown(&self) {
        self.drivers.abort_all().await;
    }
}

// =============================================================================
// Tests
// =============================================================================
