//! CSV sink
//!
//! Append-only tabular output for samples, to a file or stdout. The sink
//! is stateless: whether the header is needed is derived from the target
//! each time, so a restarted monitor appends to an existing file without
//! re-writing the header. Files are opened in append mode per row and the
//! handle is released before returning; nothing stays open between ticks.
//!
//! Single-writer only. The check-then-write header is racy under
//! concurrent writers, which this tool never has.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use appmon_record::{FIELD_NAMES, Sample};

use crate::error::SinkError;

/// Where rows go
#[derive(Debug, Clone)]
pub enum SinkTarget {
    /// Durable append-only file
    File(PathBuf),
    /// The process's standard output
    Stdout,
}

/// Append-only CSV writer for samples
#[derive(Debug, Clone)]
pub struct CsvSink {
    target: SinkTarget,
}

impl CsvSink {
    /// Sink writing to the given target
    pub fn new(target: SinkTarget) -> Self {
        Self { target }
    }

    /// Sink writing to a file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(SinkTarget::File(path.into()))
    }

    /// Sink writing to stdout
    pub fn stdout() -> Self {
        Self::new(SinkTarget::Stdout)
    }

    /// Write the header row if the target does not already have one.
    ///
    /// File target: creates the file with the header if missing, writes
    /// the header into an existing zero-length file, and leaves a
    /// non-empty file untouched (its content is assumed to start with a
    /// header; it is not validated). Stdout: always writes the header -
    /// a stream has no persisted history.
    ///
    /// # Errors
    ///
    /// [`SinkError`] when the target cannot be inspected or written.
    pub fn ensure_header(&self) -> Result<(), SinkError> {
        match &self.target {
            SinkTarget::File(path) => {
                let header_needed = match std::fs::metadata(path) {
                    Ok(meta) => meta.len() == 0,
                    Err(e) if e.kind() == ErrorKind::NotFound => true,
                    Err(e) => return Err(SinkError::file(path, e)),
                };
                if header_needed {
                    self.write_line(&header_line())?;
                }
                Ok(())
            }
            SinkTarget::Stdout => self.write_line(&header_line()),
        }
    }

    /// Append one sample as a CSV row.
    ///
    /// Absent fields render as empty columns. A failed append is not
    /// retried; the caller treats it as fatal.
    ///
    /// # Errors
    ///
    /// [`SinkError`] when the target cannot be opened or written.
    pub fn append(&self, sample: &Sample) -> Result<(), SinkError> {
        self.write_line(&row_line(sample))
    }

    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        match &self.target {
            SinkTarget::File(path) => {
                let mut file = OpenOptions::new()
                    .append(true)
                    .create(true)
                    .open(path)
                    .map_err(|e| SinkError::file(path, e))?;
                file.write_all(line.as_bytes())
                    .map_err(|e| SinkError::file(path, e))
                // file handle dropped here, before the next tick
            }
            SinkTarget::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(line.as_bytes())?;
                out.flush()?;
                Ok(())
            }
        }
    }
}

/// The header row, terminated
fn header_line() -> String {
    format!("{}\n", FIELD_NAMES.join(","))
}

/// One sample as a terminated CSV row
fn row_line(sample: &Sample) -> String {
    let mut fields = Vec::with_capacity(FIELD_NAMES.len());
    fields.push(escape(&sample.formatted_time()));
    for value in sample.values() {
        let rendered = value.as_ref().map(|n| n.to_string()).unwrap_or_default();
        fields.push(escape(&rendered));
    }
    format!("{}\n", fields.join(","))
}

/// Quote a field when it contains comma, quote, or newline
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
