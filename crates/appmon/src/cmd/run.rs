//! Run command - the monitor loop

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

use appmon_sinks::CsvSink;

use appmon::Monitor;

use crate::cmd::{ConnectionArgs, build_backend, init_logging};

/// Run command arguments
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Seconds between samples
    #[arg(long)]
    pub interval: Option<u64>,

    /// Seconds to wait before the first poll, so the monitored service
    /// can finish booting
    #[arg(long)]
    pub delay: Option<u64>,

    /// Output file (default: stdout)
    #[arg(short = 'f', long)]
    pub filename: Option<PathBuf>,
}

/// Run the monitor until a shutdown signal arrives
pub async fn run(args: RunArgs) -> Result<()> {
    let mut config = args.connection.resolve()?;
    if let Some(interval) = args.interval {
        config.poll.interval_secs = interval;
    }
    if let Some(delay) = args.delay {
        config.poll.startup_delay_secs = delay;
    }
    if let Some(path) = &args.filename {
        config.sink.file = Some(path.clone());
    }
    config.validate().context("invalid configuration")?;

    init_logging(&config.log)?;

    let backend = build_backend(&config)?;
    let sink = match &config.sink.file {
        Some(path) => CsvSink::file(path),
        None => CsvSink::stdout(),
    };

    let shutdown = CancellationToken::new();
    spawn_signal_listener(shutdown.clone());

    info!(
        target = %config.target.base_url(),
        source = backend.name(),
        "starting appmon"
    );

    let monitor = Monitor::new(
        backend,
        sink,
        config.poll.interval(),
        config.poll.startup_delay(),
    );
    monitor
        .run(shutdown)
        .await
        .context("monitoring stopped: output target failed")?;

    info!("appmon shutdown complete");
    Ok(())
}

/// Trip the token when SIGINT or SIGTERM arrives
fn spawn_signal_listener(shutdown: CancellationToken) {
    tokio::spawn(async move {
        wait_for_shutdown().await;
        info!("shutdown signal received");
        shutdown.cancel();
    });
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
