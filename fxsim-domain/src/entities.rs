//! Entities for the fxsim Domain
//!
//! An `Order` is created with a fresh id at submission and only its status
//! ever changes afterwards, monotonically forward through the fixed
//! lifecycle sequence.

use crate::value_objects::{DomainError, Quantity, Symbol};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique order identifier (time-ordered, never reused)
pub type OrderId = Uuid;

// =============================================================================
// OrderStatus
// =============================================================================

/// Order lifecycle status
///
/// Strictly ordered: `Pending < Executed < Cancelled`. The simulated
/// terminal sequence walks all three in order. A user-initiated cancel is
/// not a status at all: it removes the order record entirely.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order accepted, lifecycle not yet advanced
    Pending,
    /// Simulated execution completed
    Executed,
    /// Simulated terminal cancellation
    Cancelled,
}

impl OrderStatus {
    /// The fixed lifecycle sequence driven for every order
    pub const SEQUENCE: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Executed,
        OrderStatus::Cancelled,
    ];

    /// Whether this status ends the lifecycle
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Executed => write!(f, "executed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A submitted request to trade a quantity of a currency pair
///
/// # Invariants
/// - `id`, `stocks`, and `quantity` are immutable after creation
/// - `status` only moves forward through `OrderStatus::SEQUENCE`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier, generated at submission
    pub id: OrderId,
    /// Traded currency pair
    pub stocks: Symbol,
    /// Order size
    pub quantity: Quantity,
    /// Current lifecycle status
    pub status: OrderStatus,
    /// When the order was submitted
    pub created_at: DateTime<Utc>,
    /// When the status last changed
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a new order in `Pending` status with a fresh id.
    pub fn new(stocks: Symbol, quantity: Quantity) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            stocks,
            quantity,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Advance the status.
    ///
    /// Re-writing the current status is allowed (the driver's first step
    /// writes `Pending` over `Pending`); moving backwards is not.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidStatusTransition` on a backward move
    pub fn advance_to(&mut self, status: OrderStatus) -> Result<(), DomainError> {
        if status < self.status {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: status.to_string(),
            });
        }
        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_order() -> Order {
        Order::new(
            Symbol::new("EURUSD").unwrap(),
            Quantity::new(dec!(100)).unwrap(),
        )
    }

    #[test]
    fn test_new_order_is_pending() {
        let order = test_order();
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_order_ids_are_unique() {
        let first = test_order();
        let second = test_order();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_advance_through_sequence() {
        let mut order = test_order();
        for status in OrderStatus::SEQUENCE {
            order.advance_to(status).unwrap();
            assert_eq!(order.status, status);
        }
    }

    #[test]
    fn test_advance_backwards_rejected() {
        let mut order = test_order();
        order.advance_to(OrderStatus::Executed).unwrap();

        let result = order.advance_to(OrderStatus::Pending);
        assert!(matches!(
            result,
            Err(DomainError::InvalidStatusTransition { .. })
        ));
        // Status unchanged after the rejected write
        assert_eq!(order.status, OrderStatus::Executed);
    }

    #[test]
    fn test_advance_to_same_status_is_idempotent() {
        let mut order = test_order();
        order.advance_to(OrderStatus::Pending).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_status_ordering() {
        assert!(OrderStatus::Pending < OrderStatus::Executed);
        assert!(OrderStatus::Executed < OrderStatus::Cancelled);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let json = serde_json::to_string(&OrderStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }

    #[test]
    fn test_only_cancelled_is_terminal() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Executed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }
}
