//! Shared application state for Axum handlers.
//!
//! The only process-wide values are the configuration and the instant the
//! state was built. Both are set once and never mutated, so the state is
//! cheap to clone and safe to share across any number of concurrent requests.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;

/// Shared application state for Axum handlers.
///
/// This struct is cloned for each request handler. The configuration is
/// wrapped in `Arc` for efficient sharing.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    /// Monotonic timestamp when the application started
    pub started_at: Instant,
}

impl AppState {
    /// Create new application state from configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    /// Get the application uptime in seconds, rounded to two decimals.
    ///
    /// Measured on a monotonic clock, so consecutive calls never decrease.
    pub fn uptime_seconds(&self) -> f64 {
        round2(self.started_at.elapsed().as_secs_f64())
    }
}

/// Round a float to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
