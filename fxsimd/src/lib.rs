//! fxsim Daemon Library
//!
//! Transport layer and runtime orchestrator for the fxsim order engine.
//!
//! # Architecture
//!
//! ```text
//! HTTP client ──→ API Server ──→ Engine ──→ Order Store
//! WS client ───→ /ws handler ──↗    │
//!      ↑                            ↓
//!      └──── event fan-out ←─── Event Bus
//! ```
//!
//! # Components
//!
//! - **Daemon**: main runtime orchestrator
//! - **API**: HTTP endpoints (place, list, get, cancel)
//! - **WS**: persistent channel (submit + live event stream)
//! - **Validation**: field-level request validation shared by both
//! - **Config**: environment-based configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use fxsimd::{Config, Daemon};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::from_env().expect("Failed to load config");
//!     let daemon = Daemon::new_in_memory(config);
//!     daemon.run().await.expect("Daemon error");
//! }
//! ```

#![warn(clippy::all)]

pub mod api;
pub mod config;
pub mod daemon;
pub mod error;
pub mod validation;
pub mod ws;

// Re-exports for convenience
pub use config::{ApiConfig, Config, EngineConfig, Environment};
pub use daemon::Daemon;
pub use error::{DaemonError, DaemonResult};
