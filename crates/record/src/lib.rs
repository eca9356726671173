//! Appmon - Record
//!
//! The canonical sample record shared by sources and sinks.
//!
//! A [`Sample`] is one row of monitoring output: a local-clock timestamp
//! plus six metric fields, each of which may be absent when the server did
//! not report it. Field order is fixed and shared between the CSV header
//! and every data row.

use chrono::{DateTime, Local};
use serde_json::Number;

/// Column names, in output order. The first column is the timestamp; the
/// remaining six line up with the fields of [`Sample`].
pub const FIELD_NAMES: [&str; 7] = [
    "Time",
    "Heap",
    "UsedMemory",
    "PoolSize",
    "ActiveThreads",
    "LiveCount",
    "ActiveCount",
];

/// Timestamp format for the `Time` column.
///
/// Local clock, microsecond precision, sortable within a host. This is the
/// format the tool has always emitted, so downstream spreadsheets keep
/// parsing it.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One monitoring sample, produced once per poll tick.
///
/// Metric values are kept as [`serde_json::Number`] so integers stay
/// integers on the way out: a server that reports `512` is recorded as
/// `512`, not `512.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Local clock at extraction time.
    pub time: DateTime<Local>,
    /// Committed heap size.
    pub heap: Option<Number>,
    /// Used heap memory.
    pub used_memory: Option<Number>,
    /// Thread pool size.
    pub pool_size: Option<Number>,
    /// Active threads in the pool.
    pub active_threads: Option<Number>,
    /// Live HTTP sessions.
    pub live_count: Option<Number>,
    /// Active HTTP sessions.
    pub active_count: Option<Number>,
}

impl Sample {
    /// Create an empty sample stamped with the current local time.
    pub fn now() -> Self {
        Self::at(Local::now())
    }

    /// Create an empty sample with an explicit timestamp.
    pub fn at(time: DateTime<Local>) -> Self {
        Self {
            time,
            heap: None,
            used_memory: None,
            pool_size: None,
            active_threads: None,
            live_count: None,
            active_count: None,
        }
    }

    /// The formatted timestamp for the `Time` column.
    pub fn formatted_time(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }

    /// Metric values in column order (everything after `Time`).
    pub fn values(&self) -> [&Option<Number>; 6] {
        [
            &self.heap,
            &self.used_memory,
            &self.pool_size,
            &self.active_threads,
            &self.live_count,
            &self.active_count,
        ]
    }

    /// True if every metric field is absent.
    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|v| v.is_none())
    }
}
