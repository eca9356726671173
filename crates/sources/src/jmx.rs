//! JMX REST source
//!
//! Polls the JMX REST connector's mbean attribute endpoints over HTTPS
//! with basic auth. Three beans contribute to each sample:
//!
//! | Bean | Fields |
//! |------|--------|
//! | `JvmStats` | `Heap`, `UsedMemory` |
//! | `ThreadPoolStats` (Default Executor) | `PoolSize`, `ActiveThreads` |
//! | `SessionStats` (default_host) | `LiveCount`, `ActiveCount` |
//!
//! Each bean is fetched independently per tick; a bean whose retries are
//! exhausted leaves its two fields absent while the others still report.

use std::time::Duration;

use serde_json::Value;
use tracing::warn;

use appmon_record::Sample;

use crate::client::{ClientSettings, Credentials, MgmtClient};
use crate::error::SourceError;
use crate::extract::attribute_value;
use crate::resilience::{RetryPolicy, fetch_with_retry};

// Bean object names, percent-encoded exactly as the connector expects them.
const JVM_STATS_BEAN: &str = "WebSphere%3Atype%3DJvmStats";
const THREAD_POOL_STATS_BEAN: &str = "WebSphere%3Aname%3DDefault+Executor%2Ctype%3DThreadPoolStats";
const SESSION_STATS_BEAN: &str =
    "WebSphere%3Aname%3Ddefault_host%2FIBMJMXConnectorREST%2Ctype%3DSessionStats";

/// JMX REST source configuration
#[derive(Debug, Clone)]
pub struct JmxConfig {
    /// Base URL of the server (e.g. `https://host:9443`). Overridable so
    /// tests can point at a local mock.
    pub base_url: String,
    /// Basic-auth credentials for the connector
    pub credentials: Credentials,
    /// Per-request timeout
    pub timeout: Duration,
    /// Skip certificate verification (self-signed management endpoints)
    pub insecure_tls: bool,
    /// Retry policy for each endpoint
    pub retry: RetryPolicy,
}

/// Metric source for the JMX REST connector
pub struct JmxSource {
    client: MgmtClient,
    retry: RetryPolicy,
    jvm_url: String,
    thread_pool_url: String,
    session_url: String,
}

impl JmxSource {
    /// Create the source and its HTTP client
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Init`] if the HTTP client cannot be built.
    pub fn new(config: JmxConfig) -> Result<Self, SourceError> {
        let client = MgmtClient::new(ClientSettings {
            timeout: config.timeout,
            insecure_tls: config.insecure_tls,
            credentials: Some(config.credentials),
        })?;

        let base = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            client,
            retry: config.retry,
            jvm_url: attributes_url(&base, JVM_STATS_BEAN),
            thread_pool_url: attributes_url(&base, THREAD_POOL_STATS_BEAN),
            session_url: attributes_url(&base, SESSION_STATS_BEAN),
        })
    }

    /// Source name for logging
    pub fn name(&self) -> &'static str {
        "jmx"
    }

    /// Collect one sample, stamped with the local clock after the fetches.
    ///
    /// Endpoint failures are contained: the affected fields stay absent
    /// and the remaining endpoints are still polled.
    pub async fn sample(&self) -> Sample {
        let jvm = self.fetch(&self.jvm_url).await;
        let pool = self.fetch(&self.thread_pool_url).await;
        let sessions = self.fetch(&self.session_url).await;

        let mut sample = Sample::now();
        if let Some(payload) = jvm {
            sample.heap = attribute_value(&payload, "Heap");
            sample.used_memory = attribute_value(&payload, "UsedMemory");
        }
        if let Some(payload) = pool {
            sample.pool_size = attribute_value(&payload, "PoolSize");
            sample.active_threads = attribute_value(&payload, "ActiveThreads");
        }
        if let Some(payload) = sessions {
            sample.live_count = attribute_value(&payload, "LiveCount");
            sample.active_count = attribute_value(&payload, "ActiveCount");
        }
        sample
    }

    async fn fetch(&self, url: &str) -> Option<Value> {
        match fetch_with_retry(&self.retry, url, || self.client.get_json(url)).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(source = self.name(), url, error = %e, "endpoint unavailable for this sample");
                None
            }
        }
    }
}

/// URL of an mbean's attributes endpoint
fn attributes_url(base: &str, bean: &str) -> String {
    format!("{}/IBMJMXConnectorREST/mbeans/{}/attributes", base, bean)
}
