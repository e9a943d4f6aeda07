//! fxsim Engine Layer
//!
//! Owns the order lifecycle: accepts submissions, advances each order
//! through the fixed status sequence on its own asynchronous driver task,
//! and fans every transition out to all currently-connected subscribers.
//!
//! # Architecture
//!
//! ```text
//! HTTP / WebSocket → Engine ── insert ──→ OrderRepository
//!                      │                        ↑ re-read per step
//!                      └─ spawn ─→ LifecycleDriver (one task per order)
//!                                       │
//!                                    publish
//!                                       ↓
//!                                   EventBus ─→ all subscribers
//! ```
//!
//! The driver holds only the order id. Every step re-reads the store, so
//! an explicit cancel (which removes the record) is visible immediately
//! and the driver terminates silently without emitting further events.

#![warn(clippy::all)]

pub mod delay;
pub mod driver;
pub mod engine;
pub mod error;
pub mod event_bus;

// Re-exports for convenience
pub use delay::{DelaySource, NoDelay, UniformDelay};
pub use driver::DriverSupervisor;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use event_bus::{EventBus, EventStream};
