//! Output sink configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Sink configuration
///
/// # Example
///
/// ```toml
/// [sink]
/// file = "stats.csv"   # omit to write to stdout
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SinkConfig {
    /// Output file path. When unset, rows go to stdout.
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stdout() {
        let config = SinkConfig::default();
        assert!(config.file.is_none());
    }

    #[test]
    fn test_deserialize_file() {
        let config: SinkConfig = toml::from_str("file = \"out.csv\"").unwrap();
        assert_eq!(config.file, Some(PathBuf::from("out.csv")));
    }
}
