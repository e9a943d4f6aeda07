//! Simulated processing delay between lifecycle transitions.
//!
//! The delay is an injected capability so tests can substitute a
//! zero-delay implementation and assert on ordering without real-time
//! waits.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Source of the wait performed before each lifecycle transition.
#[async_trait]
pub trait DelaySource: Send + Sync {
    /// Wait one transition delay.
    async fn wait(&self);
}

// =============================================================================
// UniformDelay
// =============================================================================

/// Delay drawn uniformly from a fixed range.
#[derive(Debug, Clone, Copy)]
pub struct UniformDelay {
    min: Duration,
    max: Duration,
}

impl UniformDelay {
    /// Create a delay source for the given bounds.
    ///
    /// Bounds are normalized so the sampled range is always valid.
    pub fn new(min: Duration, max: Duration) -> Self {
        if max < min {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Lower bound of the range.
    pub fn min(&self) -> Duration {
        self.min
    }

    /// Upper bound of the range.
    pub fn max(&self) -> Duration {
        self.max
    }
}

impl Default for UniformDelay {
    /// Defaults to the 100ms-1000ms range.
    fn default() -> Self {
        Self::new(Duration::from_millis(100), Duration::from_millis(1000))
    }
}

#[async_trait]
impl DelaySource for UniformDelay {
    async fn wait(&self) {
        // Draw before the await: thread_rng is not Send.
        let millis = {
            let mut rng = rand::thread_rng();
            rng.gen_range(self.min.as_millis() as u64..=self.max.as_millis() as u64)
        };
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

// =============================================================================
// NoDelay
// =============================================================================

/// Zero-delay source for deterministic tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl DelaySource for NoDelay {
    async fn wait(&self) {}
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_no_delay_returns_immediately() {
        let start = Instant::now();
        NoDelay.wait().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_uniform_delay_respects_lower_bound() {
        let delay = UniformDelay::new(Duration::from_millis(20), Duration::from_millis(30));
        let start = Instant::now();
        delay.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_uniform_delay_normalizes_swapped_bounds() {
        let delay = UniformDelay::new(Duration::from_millis(500), Duration::from_millis(100));
        assert_eq!(delay.min(), Duration::from_millis(100));
        assert_eq!(delay.max(), Duration::from_millis(500));
    }

    #[test]
    fn test_default_range() {
        let delay = UniformDelay::default();
        assert_eq!(delay.min(), Duration::from_millis(100));
        assert_eq!(delay.max(), Duration::from_millis(1000));
    }
}
