//! Appmon - Sinks
//!
//! Append-only output for monitoring samples.
//!
//! One sink is supported: CSV, to a file or stdout. The file variant is
//! restart-safe - header state is derived from the file itself, so a
//! restarted monitor keeps appending where it left off and never repeats
//! the header.
//!
//! # Example
//!
//! ```ignore
//! use appmon_sinks::CsvSink;
//!
//! let sink = CsvSink::file("stats.csv");
//! sink.ensure_header()?;
//! sink.append(&sample)?;
//! ```

mod csv;
mod error;

pub use csv::{CsvSink, SinkTarget};
pub use error::SinkError;
