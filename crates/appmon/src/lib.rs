//! Appmon - Application server monitor
//!
//! Library surface for the `appmon` binary: the monitor loop that drives
//! source, extraction, and sink on a fixed cadence. The binary adds CLI
//! parsing, logging setup, and signal handling on top.

pub mod monitor;

pub use monitor::Monitor;
