//! Run configuration for the screening pipeline.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

/// Lower bound for the pause between provider calls.
pub const MIN_CALL_DELAY: Duration = Duration::from_millis(500);

/// Upper bound for the pause between provider calls.
pub const MAX_CALL_DELAY: Duration = Duration::from_secs(5);

/// What each output row reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenMode {
    /// Official site and OTA listings only.
    Sites,
    /// Sites plus the eligibility verdict.
    #[default]
    Eligibility,
}

/// How the two official-site signals combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfficialPolicy {
    /// Keyword OR name match.
    #[default]
    AnySignal,
    /// Keyword AND name match.
    AllSignals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub mode: ScreenMode,

    /// Minimum spacing between consecutive search API calls.
    ///
    /// Clamped to `MIN_CALL_DELAY..=MAX_CALL_DELAY` by `with_call_delay`.
    /// Default: 1s.
    pub call_delay: Duration,

    /// Upper bound on any single search or page fetch. Default: 10s.
    pub call_timeout: Duration,

    /// Process at most this many rows (None = all).
    pub max_rows: Option<usize>,

    pub official_policy: OfficialPolicy,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            mode: ScreenMode::default(),
            call_delay: Duration::from_secs(1),
            call_timeout: Duration::from_secs(10),
            max_rows: None,
            official_policy: OfficialPolicy::default(),
        }
    }
}

impl ScreenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ScreenMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the inter-call delay, clamped to the supported range.
    pub fn with_call_delay(mut self, delay: Duration) -> Self {
        self.call_delay = delay.clamp(MIN_CALL_DELAY, MAX_CALL_DELAY);
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    pub fn with_official_policy(mut self, policy: OfficialPolicy) -> Self {
        self.official_policy = policy;
        self
    }

    /// Reject settings that would make every call fail or never pace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.call_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(self.call_timeout));
        }
        if self.call_delay.is_zero() {
            return Err(ConfigError::InvalidDelay(self.call_delay));
        }
        Ok(())
    }
}
