//! Event bus fanning lifecycle events out to subscribers.
//!
//! Uses a tokio broadcast channel: `publish` never blocks and buffers
//! per subscriber, so one slow subscriber cannot delay the publishing
//! driver or any other subscriber. Dropping an `EventStream` unregisters
//! that subscriber; a subscriber that registers after an event was
//! published never receives that past event.

use fxsim_domain::OrderEvent;
use tokio::sync::broadcast;

/// Broadcaster for order lifecycle events.
///
/// Multiple drivers publish concurrently; all live subscribers receive
/// every event published while they are registered.
pub struct EventBus {
    sender: broadcast::Sender<OrderEvent>,
}

impl EventBus {
    /// Create a new event bus with specified capacity.
    ///
    /// Capacity bounds how many events each subscriber may buffer before
    /// it starts missing events (lagging).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers the event was delivered to;
    /// 0 when nobody is listening.
    pub fn publish(&self, event: OrderEvent) -> usize {
        // send() errors only when there are no receivers
        self.sender.send(event).unwrap_or(0)
    }

    /// Register a new subscriber.
    ///
    /// The stream yields every event published after this call.
    pub fn subscribe(&self) -> EventStream {
        EventStream {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of currently-registered subscribers.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// Receiving end of one subscription.
pub struct EventStream {
    receiver: broadcast::Receiver<OrderEvent>,
}

impl EventStream {
    /// Receive the next event.
    ///
    /// Returns `None` if the bus has been dropped.
    /// Returns an error description if this subscriber lagged.
    pub async fn recv(&mut self) -> Option<Result<OrderEvent, String>> {
        match self.receiver.recv().await {
            Ok(event) => Some(Ok(event)),
            Err(broadcast::error::RecvError::Closed) => None,
            Err(broadcast::error::RecvError::Lagged(count)) => {
                Some(Err(format!("Subscriber lagged, missed {} events", count)))
            }
        }
    }

    /// Try to receive an event without blocking.
    ///
    /// Returns `None` if no event is immediately available.
    pub fn try_recv(&mut self) -> Option<Result<OrderEvent, String>> {
        match self.receiver.try_recv() {
            Ok(event) => Some(Ok(event)),
            Err(broadcast::error::TryRecvError::Empty) => None,
            Err(broadcast::error::TryRecvError::Closed) => None,
            Err(broadcast::error::TryRecvError::Lagged(count)) => {
                Some(Err(format!("Subscriber lagged, missed {} events", count)))
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
