//! debugtap CLI
//!
//! Thin wrapper around debugtap-core for trying the pipeline from a
//! shell.
//!
//! ## Usage
//!
//! ```bash
//! # Emit a few demo lines under a namespace
//! debugtap emit --namespace app:server
//!
//! # Emit custom messages
//! debugtap emit -n worker:queue -m "job %s picked up" -m "job %s done"
//!
//! # Route output through a named pipe...
//! DEBUG_FD=/tmp/tap.pipe debugtap emit -n app:server
//!
//! # ...and follow it from a second terminal
//! debugtap drain /tmp/tap.pipe
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use debugtap_core::Hub;

/// debugtap - namespaced debug output channels
#[derive(Parser)]
#[command(name = "debugtap")]
#[command(version = "0.1.0")]
#[command(about = "Emit and drain namespaced debug output")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit demo lines through the full pipeline
    Emit {
        /// Namespace for the lines
        #[arg(short, long, default_value = "debugtap:demo")]
        namespace: String,

        /// Messages to emit (repeatable, `%s` gets the line number)
        #[arg(short, long)]
        message: Vec<String>,

        /// Number of rounds to emit
        #[arg(short, long, default_value_t = 1)]
        count: u32,

        /// Pause between rounds, in milliseconds
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
    },

    /// Read a named pipe and copy it to stdout
    Drain {
        /// Path of the pipe to follow
        path: PathBuf,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Emit {
            namespace,
            message,
            count,
            interval_ms,
        } => emit(&namespace, &message, count, interval_ms),
        Commands::Drain { path } => drain(&path),
    }
}

fn emit(namespace: &str, messages: &[String], count: u32, interval_ms: u64) -> Result<()> {
    let hub = Hub::new().context("failed to set up the output channel")?;
    let mut instance = hub.tap(namespace);

    let defaults = ["line %s state %o".to_string()];
    let messages = if messages.is_empty() {
        &defaults[..]
    } else {
        messages
    };

    let mut line = 0u32;
    for round in 0..count {
        for message in messages {
            line += 1;
            instance.log(
                message,
                &[json!(format!("#{line}")), json!({"round": round})],
            )?;
        }
        if interval_ms > 0 && round + 1 < count {
            thread::sleep(Duration::from_millis(interval_ms));
        }
    }
    Ok(())
}

fn drain(path: &std::path::Path) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut stdout = io::stdout().lock();
    for line in reader.lines() {
        let line = line?;
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}
