//! fxsim Storage Layer
//!
//! The order table is the single source of truth for order existence and
//! current status.
//!
//! # Architecture
//!
//! - **Repository trait**: defines the storage interface (port)
//! - **In-memory store**: the provided implementation; orders do not
//!   survive a process restart
//!
//! # Usage
//!
//! ```rust
//! use fxsim_store::{MemoryStore, OrderRepository};
//! use fxsim_domain::{Order, Quantity, Symbol};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryStore::new();
//!
//!     let order = Order::new(
//!         Symbol::new("EURUSD").unwrap(),
//!         Quantity::new(dec!(100)).unwrap(),
//!     );
//!     store.insert(&order).await.unwrap();
//!
//!     let found = store.find_by_id(order.id).await.unwrap();
//!     assert!(found.is_some());
//! }
//! ```

#![warn(clippy::all)]

// Modules
mod error;
mod memory;
mod repository;

// Re-exports
pub use error::StoreError;
pub use memory::MemoryStore;
pub use repository::OrderRepository;
