//! fxsim Domain Layer
//!
//! Pure domain logic with zero I/O dependencies.
//! Contains entities, value objects, and lifecycle events.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod entities;
pub mod events;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{Order, OrderId, OrderStatus};
pub use events::OrderEvent;
pub use value_objects::{DomainError, Quantity, Symbol};
