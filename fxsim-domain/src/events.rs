//! Lifecycle Events for the fxsim Domain
//!
//! Events are immutable snapshots of an order taken at the moment of a
//! status transition. They are delivered to subscribers, never stored;
//! late subscribers get no replay.

use crate::entities::{Order, OrderId, OrderStatus};
use crate::value_objects::{Quantity, Symbol};
use serde::{Deserialize, Serialize};

/// Snapshot of one order's state at a transition
///
/// Wire shape: `{"id", "stocks", "quantity", "status"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Order this event belongs to
    #[serde(rename = "id")]
    pub order_id: OrderId,
    /// Traded currency pair
    pub stocks: Symbol,
    /// Order size
    pub quantity: Quantity,
    /// Status at the moment of the transition
    pub status: OrderStatus,
}

impl OrderEvent {
    /// Snapshot the current state of an order record.
    pub fn snapshot(order: &Order) -> Self {
        Self {
            order_id: order.id,
            stocks: order.stocks.clone(),
            quantity: order.quantity,
            status: order.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_carries_order_fields() {
        let order = Order::new(
            Symbol::new("USDPLN").unwrap(),
            Quantity::new(dec!(12.52)).unwrap(),
        );
        let event = OrderEvent::snapshot(&order);

        assert_eq!(event.order_id, order.id);
        assert_eq!(event.stocks, order.stocks);
        assert_eq!(event.quantity, order.quantity);
        assert_eq!(event.status, OrderStatus::Pending);
    }

    #[test]
    fn test_wire_shape() {
        let order = Order::new(
            Symbol::new("EURUSD").unwrap(),
            Quantity::new(dec!(100)).unwrap(),
        );
        let event = OrderEvent::snapshot(&order);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["id"], serde_json::json!(order.id.to_string()));
        assert_eq!(json["stocks"], serde_json::json!("EURUSD"));
        assert_eq!(json["quantity"], serde_json::json!(100.0));
        assert_eq!(json["status"], serde_json::json!("pending"));
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_event_round_trips() {
        let order = Order::new(
            Symbol::new("EURUSD").unwrap(),
            Quantity::new(dec!(100)).unwrap(),
        );
        let event = OrderEvent::snapshot(&order);
        let json = serde_json::to_string(&event).unwrap();
        let parsed: OrderEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
