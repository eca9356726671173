//! Appmon Configuration
//!
//! TOML-based configuration loading with sensible defaults. A minimal
//! config should just work - only specify what you need to change. CLI
//! flags override file values; that merge happens in the binary.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use appmon_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[target]\nhost = \"appserver\"").unwrap();
//! assert_eq!(config.target.host, "appserver");
//! ```
//!
//! # Example Minimal Config
//!
//! ```toml
//! [target]
//! host = "appserver.internal"
//!
//! [sink]
//! file = "stats.csv"
//! ```
//!
//! See `configs/example.toml` for all available options.

mod error;
mod logging;
mod poll;
mod sink;
mod target;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

pub use error::ConfigError;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use poll::PollConfig;
pub use sink::SinkConfig;
pub use target::{BackendKind, TargetConfig};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Which server to poll
    pub target: TargetConfig,

    /// Cadence, timeout and retry policy
    pub poll: PollConfig,

    /// Where rows go
    pub sink: SinkConfig,

    /// Logging behavior
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.host.is_empty() {
            return Err(ConfigError::Invalid("target.host must not be empty".into()));
        }
        if self.poll.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "poll.interval_secs must be at least 1".into(),
            ));
        }
        if self.poll.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "poll.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.target.host, "localhost");
        assert_eq!(config.poll.interval_secs, 60);
        assert!(config.sink.file.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
[target]
host = "appserver"
port = 8443
backend = "mp-metrics"

[poll]
interval_secs = 10
startup_delay_secs = 0
timeout_secs = 5
max_retries = 3

[sink]
file = "out.csv"

[log]
level = "debug"
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.target.host, "appserver");
        assert_eq!(config.target.port(), 8443);
        assert_eq!(config.target.backend, BackendKind::MpMetrics);
        assert_eq!(config.poll.interval_secs, 10);
        assert_eq!(config.poll.max_retries, 3);
        assert_eq!(config.sink.file.as_deref().unwrap().to_str(), Some("out.csv"));
        assert_eq!(config.log.level, LogLevel::Debug);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(Config::from_str("[nonsense]\nx = 1").is_err());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = Config::from_str("[poll]\ninterval_secs = 0").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config::from_str("[poll]\ntimeout_secs = 0").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let config = Config::from_str("[target]\nhost = \"\"").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/appmon.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
