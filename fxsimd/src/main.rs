//! fxsim Daemon
//!
//! Simulated forex order platform: HTTP + WebSocket order intake, one
//! asynchronous lifecycle driver per order, real-time event fan-out to
//! all connected subscribers.
//!
//! # Usage
//!
//! ```bash
//! # Start with default configuration
//! cargo run -p fxsimd
//!
//! # Start with custom environment
//! FXSIM_ENV=test FXSIM_API_PORT=8081 cargo run -p fxsimd
//! ```
//!
//! # Environment Variables
//!
//! - `FXSIM_ENV`: Environment (test, development, production)
//! - `FXSIM_API_HOST`: API host (default: 0.0.0.0)
//! - `FXSIM_API_PORT`: API port (default: 8080)
//! - `FXSIM_DELAY_MIN_MS`: Minimum transition delay (default: 100)
//! - `FXSIM_DELAY_MAX_MS`: Maximum transition delay (default: 1000)
//! - `FXSIM_EVENT_CAPACITY`: Per-subscriber event buffer (default: 1000)

use fxsimd::{Config, Daemon};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("fxsimd=info".parse()?)
                .add_directive("fxsim_engine=info".parse()?),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        api_host = %config.api.host,
        api_port = config.api.port,
        "fxsim daemon"
    );

    // Create and run daemon
    let daemon = Daemon::new_in_memory(config);
    daemon.run().await?;

    Ok(())
}
