//! Sample command - collect one sample and exit
//!
//! Useful for probing connectivity and credentials before leaving the
//! monitor running. Skips the startup delay and always prints to stdout.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use appmon_sinks::CsvSink;

use crate::cmd::{ConnectionArgs, build_backend, init_logging};

/// Sample command arguments
#[derive(Args, Debug, Clone)]
pub struct SampleArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Collect and print a single sample
pub async fn run(args: SampleArgs) -> Result<()> {
    let config = args.connection.resolve()?;
    init_logging(&config.log)?;

    let backend = build_backend(&config)?;
    info!(
        target = %config.target.base_url(),
        source = backend.name(),
        "collecting one sample"
    );

    let sample = backend.sample().await;

    let sink = CsvSink::stdout();
    sink.ensure_header().context("failed to write header")?;
    sink.append(&sample).context("failed to write sample")?;
    Ok(())
}
