//! Daemon configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::{DaemonError, DaemonResult};
use std::env;
use std::time::Duration;

// =============================================================================
// Configuration
// =============================================================================

/// Daemon configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Engine configuration
    pub engine: EngineConfig,

    /// Environment (test, development, production)
    pub environment: Environment,
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum simulated delay before each lifecycle transition
    pub delay_min: Duration,
    /// Maximum simulated delay before each lifecycle transition
    pub delay_max: Duration,
    /// Per-subscriber event buffer capacity
    pub event_capacity: usize,
}

/// Environment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Test environment (zero delays, ephemeral port)
    Test,
    /// Development environment
    Development,
    /// Production environment
    Production,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> DaemonResult<Self> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let environment = Self::load_environment()?;
        let api = Self::load_api_config()?;
        let engine = Self::load_engine_config()?;

        Ok(Self {
            api,
            engine,
            environment,
        })
    }

    /// Create test configuration.
    pub fn test() -> Self {
        Self {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Let OS assign port
            },
            engine: EngineConfig {
                delay_min: Duration::ZERO,
                delay_max: Duration::ZERO,
                event_capacity: 64,
            },
            environment: Environment::Test,
        }
    }

    fn load_environment() -> DaemonResult<Environment> {
        let env_str = env::var("FXSIM_ENV").unwrap_or_else(|_| "development".to_string());

        match env_str.to_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(DaemonError::Config(format!(
                "Invalid FXSIM_ENV: {}. Expected: test, development, production",
                other
            ))),
        }
    }

    fn load_api_config() -> DaemonResult<ApiConfig> {
        let host = env::var("FXSIM_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port_str = env::var("FXSIM_API_PORT").unwrap_or_else(|_| "8080".to_string());

        let port = port_str
            .parse::<u16>()
            .map_err(|_| DaemonError::Config(format!("Invalid FXSIM_API_PORT: {}", port_str)))?;

        Ok(ApiConfig { host, port })
    }

    fn load_engine_config() -> DaemonResult<EngineConfig> {
        let delay_min = Duration::from_millis(Self::load_u64_env("FXSIM_DELAY_MIN_MS", 100)?);
        let delay_max = Duration::from_millis(Self::load_u64_env("FXSIM_DELAY_MAX_MS", 1000)?);

        if delay_min > delay_max {
            return Err(DaemonError::Config(format!(
                "FXSIM_DELAY_MIN_MS ({:?}) must not exceed FXSIM_DELAY_MAX_MS ({:?})",
                delay_min, delay_max
            )));
        }

        let event_capacity = Self::load_u64_env("FXSIM_EVENT_CAPACITY", 1000)? as usize;
        if event_capacity == 0 {
            return Err(DaemonError::Config(
                "FXSIM_EVENT_CAPACITY must be greater than 0".to_string(),
            ));
        }

        Ok(EngineConfig {
            delay_min,
            delay_max,
            event_capacity,
        })
    }

    fn load_u64_env(key: &str, default: u64) -> DaemonResult<u64> {
        match env::var(key) {
            Ok(val) => val
                .parse::<u64>()
                .map_err(|_| DaemonError::Config(format!("Invalid {} value: {}", key, val))),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            engine: EngineConfig {
                delay_min: Duration::from_millis(100),
                delay_max: Duration::from_millis(1000),
                event_capacity: 1000,
            },
            environment: Environment::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Test => write!(f, "test"),
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
