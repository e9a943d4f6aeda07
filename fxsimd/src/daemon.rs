//! Daemon: Main runtime orchestrator.
//!
//! The Daemon ties together all components:
//! - Engine (order lifecycle, drivers, fan-out)
//! - API Server (HTTP + WebSocket endpoints)
//!
//! # Lifecycle
//!
//! 1. Load configuration
//! 2. Initialize components
//! 3. Start API server
//! 4. Wait for shutdown signal (SIGINT)
//! 5. Graceful shutdown: abort outstanding drivers

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use fxsim_engine::{Engine, EventBus, UniformDelay};
use fxsim_store::{MemoryStore, OrderRepository};

use crate::api::{create_router, ApiState};
use crate::config::Config;
use crate::error::{DaemonError, DaemonResult};

// =============================================================================
// Daemon
// =============================================================================

/// The main fxsim daemon.
pub struct Daemon<S: OrderRepository + 'static> {
    /// Configuration
    config: Config,
    /// Order lifecycle engine
    engine: Arc<Engine<S>>,
}

impl Daemon<MemoryStore> {
    /// Create a new daemon over the in-memory store.
    ///
    /// With `Config::test()` the delay bounds are zero, so lifecycles run
    /// without real-time waits.
    pub fn new_in_memory(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        let bus = Arc::new(EventBus::new(config.engine.event_capacity));
        let delay = UniformDelay::new(config.engine.delay_min, config.engine.delay_max);
        let engine = Arc::new(Engine::new(store, bus, Arc::new(delay)));

        Self { config, engine }
    }
}

impl<S: OrderRepository + 'static> Daemon<S> {
    /// Create a new daemon with a provided engine.
    pub fn new(config: Config, engine: Arc<Engine<S>>) -> Self {
        Self { config, engine }
    }

    /// Access the engine (test hook).
    pub fn engine(&self) -> &Arc<Engine<S>> {
        &self.engine
    }

    /// Run the daemon.
    ///
    /// This method blocks until shutdown is requested (SIGINT).
    pub async fn run(self) -> DaemonResult<()> {
        info!(
            version = env!("CARGO_PKG_VERSION"),
            environment = %self.config.environment,
            "Starting fxsim daemon"
        );

        let api_addr = self.start_api_server().await?;
        info!(%api_addr, "API server started");

        tokio::signal::ctrl_c()
            .await
            .map_err(|e| DaemonError::Config(format!("Failed to listen for shutdown: {}", e)))?;
        info!("Received shutdown signal");

        self.shutdown().await
    }

    /// Start the API server.
    ///
    /// Binds, spawns the serve task, and returns the local address (the
    /// OS-assigned port when the configured port is 0).
    pub async fn start_api_server(&self) -> DaemonResult<SocketAddr> {
        let state = Arc::new(ApiState {
            engine: self.engine.clone(),
        });

        let router = create_router(state);
        let addr = format!("{}:{}", self.config.api.host, self.config.api.port);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| DaemonError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

        let local_addr = listener
            .local_addr()
            .map_err(|e| DaemonError::Config(format!("Failed to get local address: {}", e)))?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!(error = %e, "API server error");
            }
        });

        Ok(local_addr)
    }

    /// Graceful shutdown.
    async fn shutdown(&self) -> DaemonResult<()> {
        info!("Initiating graceful shutdown");

        let count = self.engine.order_count().await?;
        self.engine.shutdown().await;

        info!(orders = count, "Shutdown complete");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
