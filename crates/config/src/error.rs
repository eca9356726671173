//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid TOML
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value failed validation
    #[error("invalid config value: {0}")]
    Invalid(String),
}
