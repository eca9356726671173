//! Appmon - Application server monitor
//!
//! Polls a server's management endpoint on a fixed cadence and appends
//! one CSV row per sample to a file or stdout.
//!
//! # Usage
//!
//! ```bash
//! # Monitor a local server, rows to stdout (default backend: jmx)
//! appmon
//!
//! # Monitor via MicroProfile Metrics, rows to a file
//! appmon --backend mp-metrics --host appserver -f stats.csv
//!
//! # One-shot connectivity check
//! appmon sample --host appserver
//! ```

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Application server monitor - samples management metrics to CSV
#[derive(Parser, Debug)]
#[command(name = "appmon")]
#[command(version, about, long_about = None)]
#[command(after_help = "Credentials for the jmx backend are read from JMX_USER and \
JMX_PASSWORD.\nWhen unset, the historical defaults jmxadmin/password are used.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    // Flags that apply to `run` when no subcommand is given
    #[command(flatten)]
    run: cmd::run::RunArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the monitor loop (default)
    Run(cmd::run::RunArgs),

    /// Collect and print a single sample, then exit
    Sample(cmd::sample::SampleArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Run(args)) => cmd::run::run(args).await,
        Some(Command::Sample(args)) => cmd::sample::run(args).await,
        // No subcommand = run the monitor (default behavior)
        None => cmd::run::run(cli.run).await,
    }
}
