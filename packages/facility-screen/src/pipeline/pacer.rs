//! Pause between search API calls.
//!
//! The gap is measured from the end of one call to the start of the next, so
//! a slow call is still followed by the full pause. The first call of a run
//! goes through immediately and nothing waits after the last one.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::ConfigError;

#[derive(Debug)]
pub struct Pacer {
    spacing: Duration,
    last_finished: Mutex<Option<Instant>>,
}

impl Pacer {
    /// Fails on a zero spacing.
    pub fn new(spacing: Duration) -> Result<Self, ConfigError> {
        if spacing.is_zero() {
            return Err(ConfigError::InvalidDelay(spacing));
        }
        Ok(Self {
            spacing,
            last_finished: Mutex::new(None),
        })
    }

    pub fn spacing(&self) -> Duration {
        self.spacing
    }

    /// Wait until `spacing` has passed since the previous call finished.
    pub async fn ready(&self) {
        let last_finished = *self.last_finished.lock().await;
        if let Some(at) = last_finished {
            tokio::time::sleep_until(at + self.spacing).await;
        }
    }

    /// Record that a call just finished, successfully or not.
    pub async fn finished(&self) {
        *self.last_finished.lock().await = Some(Instant::now());
    }
}
