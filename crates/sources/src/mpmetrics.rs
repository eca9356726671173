//! MicroProfile Metrics source
//!
//! Polls the `/metrics` endpoint over plain HTTP with
//! `Accept: application/json`. The response is a two-level map of
//! category to metric key; one request covers all six fields.

use std::time::Duration;

use tracing::warn;

use appmon_record::Sample;

use crate::client::{ClientSettings, MgmtClient};
use crate::error::SourceError;
use crate::extract::metric_value;
use crate::resilience::{RetryPolicy, fetch_with_retry};

// Category/key pairs, one per sample field.
const HEAP: (&str, &str) = ("base", "memory.committedHeap");
const USED_MEMORY: (&str, &str) = ("base", "memory.usedHeap");
const POOL_SIZE: (&str, &str) = ("vendor", "threadpool.Default_Executor.size");
const ACTIVE_THREADS: (&str, &str) = ("vendor", "threadpool.Default_Executor.activeThreads");
const LIVE_COUNT: (&str, &str) = ("vendor", "session.default_host_metrics.liveSessions");
const ACTIVE_COUNT: (&str, &str) = ("vendor", "session.default_host_metrics.activeSessions");

/// MicroProfile Metrics source configuration
#[derive(Debug, Clone)]
pub struct MpMetricsConfig {
    /// Base URL of the server (e.g. `http://host:9080`). Overridable so
    /// tests can point at a local mock.
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retry policy for the metrics endpoint
    pub retry: RetryPolicy,
}

/// Metric source for MicroProfile Metrics
pub struct MpMetricsSource {
    client: MgmtClient,
    retry: RetryPolicy,
    metrics_url: String,
}

impl MpMetricsSource {
    /// Create the source and its HTTP client
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Init`] if the HTTP client cannot be built.
    pub fn new(config: MpMetricsConfig) -> Result<Self, SourceError> {
        let client = MgmtClient::new(ClientSettings {
            timeout: config.timeout,
            insecure_tls: false,
            credentials: None,
        })?;

        let base = config.base_url.trim_end_matches('/');
        Ok(Self {
            client,
            retry: config.retry,
            metrics_url: format!("{}/metrics", base),
        })
    }

    /// Source name for logging
    pub fn name(&self) -> &'static str {
        "mp-metrics"
    }

    /// Collect one sample, stamped with the local clock after the fetch.
    ///
    /// A failed or malformed fetch leaves every field absent; the monitor
    /// keeps running and the gap shows up as an empty row.
    pub async fn sample(&self) -> Sample {
        let payload = match fetch_with_retry(&self.retry, &self.metrics_url, || {
            self.client.get_json(&self.metrics_url)
        })
        .await
        {
            Ok(payload) => payload,
            Err(e) => {
                warn!(
                    source = self.name(),
                    url = %self.metrics_url,
                    error = %e,
                    "endpoint unavailable for this sample"
                );
                return Sample::now();
            }
        };

        let mut sample = Sample::now();
        sample.heap = metric_value(&payload, HEAP.0, HEAP.1);
        sample.used_memory = metric_value(&payload, USED_MEMORY.0, USED_MEMORY.1);
        sample.pool_size = metric_value(&payload, POOL_SIZE.0, POOL_SIZE.1);
        sample.active_threads = metric_value(&payload, ACTIVE_THREADS.0, ACTIVE_THREADS.1);
        sample.live_count = metric_value(&payload, LIVE_COUNT.0, LIVE_COUNT.1);
        sample.active_count = metric_value(&payload, ACTIVE_COUNT.0, ACTIVE_COUNT.1);
        sample
    }
}
