//! Polling cadence and retry configuration

use serde::Deserialize;
use std::time::Duration;

/// Polling configuration
///
/// # Example
///
/// ```toml
/// [poll]
/// interval_secs = 60
/// startup_delay_secs = 30
/// timeout_secs = 2
/// max_retries = 10
/// backoff_base_secs = 1
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PollConfig {
    /// Seconds between samples
    /// Default: 60
    pub interval_secs: u64,

    /// Seconds to wait before the first poll, so the monitored service can
    /// finish booting
    /// Default: 30
    pub startup_delay_secs: u64,

    /// Per-request timeout in seconds
    /// Default: 2
    pub timeout_secs: u64,

    /// Retry attempts after a failed request
    /// Default: 10
    pub max_retries: u32,

    /// Base factor for exponential backoff between retries. With the
    /// default of 1 the waits are 0s, 2s, 4s, 8s, ...
    /// Default: 1
    pub backoff_base_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            startup_delay_secs: 30,
            timeout_secs: 2,
            max_retries: 10,
            backoff_base_secs: 1,
        }
    }
}

impl PollConfig {
    /// Interval between samples as a Duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Startup delay as a Duration
    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.startup_delay_secs)
    }

    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
