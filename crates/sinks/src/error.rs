//! Sink error types

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while writing output.
///
/// All of these are fatal to the process: the sink has no fallback target
/// and no partial-write recovery.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Output file could not be created, opened, or written
    #[error("cannot write {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Standard output could not be written
    #[error("cannot write to stdout: {0}")]
    Stdout(#[from] io::Error),
}

impl SinkError {
    pub(crate) fn file(path: &Path, source: io::Error) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source,
        }
    }
}
