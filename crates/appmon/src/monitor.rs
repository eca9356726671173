//! The monitor loop
//!
//! Drives one fetch-extract-append cycle per tick, forever, until
//! cancelled. Source failures never stop the loop - a sustained outage
//! shows up as a run of rows with empty fields, which is itself useful
//! when reading the CSV later. Only sink failures escape.
//!
//! Cancellation is observed during the startup delay and the inter-tick
//! sleep; an in-flight tick always runs to completion, so no partial row
//! is ever written.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use appmon_sinks::{CsvSink, SinkError};
use appmon_sources::Backend;

/// Fixed-cadence poll loop: source -> sink, one tick at a time
pub struct Monitor {
    backend: Backend,
    sink: CsvSink,
    interval: Duration,
    startup_delay: Duration,
}

impl Monitor {
    /// Create a monitor over the given source and sink
    pub fn new(
        backend: Backend,
        sink: CsvSink,
        interval: Duration,
        startup_delay: Duration,
    ) -> Self {
        Self {
            backend,
            sink,
            interval,
            startup_delay,
        }
    }

    /// Run until `shutdown` is cancelled.
    ///
    /// Sleeps the startup delay (so the monitored service can finish
    /// booting), writes the header if the target needs one, then loops:
    /// sample, append, sleep the interval. One tick fully completes
    /// before the next starts; there are no overlapping requests.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the output target cannot be written.
    /// That is the only fatal condition; everything else is contained
    /// within its tick.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), SinkError> {
        if !self.startup_delay.is_zero() {
            info!(
                delay_secs = self.startup_delay.as_secs(),
                "waiting before first poll"
            );
            tokio::select! {
                _ = tokio::time::sleep(self.startup_delay) => {}
                _ = shutdown.cancelled() => {
                    info!("shutdown requested during startup delay");
                    return Ok(());
                }
            }
        }

        self.sink.ensure_header()?;
        info!(
            source = self.backend.name(),
            interval_secs = self.interval.as_secs(),
            "monitoring started"
        );

        loop {
            self.tick().await?;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.cancelled() => {
                    info!("shutdown requested, stopping monitor");
                    return Ok(());
                }
            }
        }
    }

    /// One poll cycle: collect a sample and append it
    pub async fn tick(&self) -> Result<(), SinkError> {
        let sample = self.backend.sample().await;
        if sample.is_empty() {
            warn!(source = self.backend.name(), "no metrics collected this tick");
        } else {
            debug!(source = self.backend.name(), "sample collected");
        }
        self.sink.append(&sample)
    }
}
