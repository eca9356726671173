//! Appmon - Sources
//!
//! Pull-based metric sources that fetch runtime statistics from an
//! application server's management API and produce [`Sample`] records for
//! the sink.
//!
//! # Available Sources
//!
//! | Source | Transport | Payload shape |
//! |--------|-----------|---------------|
//! | `jmx` | HTTPS + basic auth | attribute list (three mbeans) |
//! | `mp-metrics` | HTTP | category/key map (one endpoint) |
//!
//! # Design Principles
//!
//! - **Pull-based**: one fetch-extract cycle per tick, driven by the
//!   monitor loop.
//! - **Contained failures**: an endpoint that stays down after retries
//!   costs that endpoint's fields for the tick, nothing more.
//! - **No dyn dispatch**: the two variants sit behind the [`Backend`]
//!   enum.
//!
//! # Example
//!
//! ```ignore
//! use appmon_sources::{Backend, MpMetricsConfig, MpMetricsSource};
//!
//! let source = MpMetricsSource::new(MpMetricsConfig {
//!     base_url: "http://appserver:9080".into(),
//!     timeout: std::time::Duration::from_secs(2),
//!     retry: Default::default(),
//! })?;
//! let sample = Backend::MpMetrics(source).sample().await;
//! ```

mod client;
mod error;
mod extract;
mod jmx;
mod mpmetrics;
pub mod resilience;

use appmon_record::Sample;

pub use client::{ClientSettings, Credentials, MgmtClient};
pub use error::SourceError;
pub use extract::{attribute_value, metric_value};
pub use jmx::{JmxConfig, JmxSource};
pub use mpmetrics::{MpMetricsConfig, MpMetricsSource};
pub use resilience::{RetryPolicy, fetch_with_retry};

/// The configured metric source, one of the two supported backends
pub enum Backend {
    /// JMX REST connector (attribute-list payloads)
    Jmx(JmxSource),
    /// MicroProfile Metrics (category/key payloads)
    MpMetrics(MpMetricsSource),
}

impl Backend {
    /// Source name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Jmx(s) => s.name(),
            Backend::MpMetrics(s) => s.name(),
        }
    }

    /// Collect one sample from the backend
    pub async fn sample(&self) -> Sample {
        match self {
            Backend::Jmx(s) => s.sample().await,
            Backend::MpMetrics(s) => s.sample().await,
        }
    }
}
