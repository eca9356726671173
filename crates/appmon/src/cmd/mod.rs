//! Command implementations and shared plumbing

pub mod run;
pub mod sample;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use appmon_config::{BackendKind, Config, LogConfig, LogFormat, LogLevel};
use appmon_sources::{
    Backend, Credentials, JmxConfig, JmxSource, MpMetricsConfig, MpMetricsSource, RetryPolicy,
};

/// Flags shared by every command. Each one overrides the matching config
/// file value; unset flags fall back to the file, then to defaults.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Hostname of the monitored server
    #[arg(long)]
    pub host: Option<String>,

    /// Management port (default: 9443 for jmx, 9080 for mp-metrics)
    #[arg(long)]
    pub port: Option<u16>,

    /// Management API flavor (jmx, mp-metrics)
    #[arg(long)]
    pub backend: Option<BackendKind>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Retry attempts after a failed request
    #[arg(long)]
    pub retry: Option<u32>,

    /// Skip TLS certificate verification (default: true for jmx,
    /// false for mp-metrics)
    #[arg(long, value_name = "BOOL")]
    pub insecure_tls: Option<bool>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// Log format (console, json)
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

impl ConnectionArgs {
    /// Load the config file (when given) and apply flag overrides
    pub fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(host) = &self.host {
            config.target.host = host.clone();
        }
        if let Some(port) = self.port {
            config.target.port = Some(port);
        }
        if let Some(backend) = self.backend {
            config.target.backend = backend;
        }
        if let Some(timeout) = self.timeout {
            config.poll.timeout_secs = timeout;
        }
        if let Some(retry) = self.retry {
            config.poll.max_retries = retry;
        }
        if let Some(insecure) = self.insecure_tls {
            config.target.insecure_tls = Some(insecure);
        }
        if let Some(level) = self.log_level {
            config.log.level = level;
        }
        if let Some(format) = self.log_format {
            config.log.format = format;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

/// Build the configured metric source
pub fn build_backend(config: &Config) -> Result<Backend> {
    let retry = RetryPolicy {
        max_retries: config.poll.max_retries,
        backoff_base_secs: config.poll.backoff_base_secs,
    };

    let backend = match config.target.backend {
        BackendKind::Jmx => Backend::Jmx(
            JmxSource::new(JmxConfig {
                base_url: config.target.base_url(),
                credentials: Credentials::from_env(),
                timeout: config.poll.timeout(),
                insecure_tls: config.target.insecure_tls(),
                retry,
            })
            .context("failed to create jmx source")?,
        ),
        BackendKind::MpMetrics => Backend::MpMetrics(
            MpMetricsSource::new(MpMetricsConfig {
                base_url: config.target.base_url(),
                timeout: config.poll.timeout(),
                retry,
            })
            .context("failed to create mp-metrics source")?,
        ),
    };

    Ok(backend)
}

/// Initialize the tracing subscriber.
///
/// Logs go to stderr so a CSV stream on stdout stays machine-readable.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(config.level.as_str())
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Console => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    Ok(())
}
