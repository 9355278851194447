//! Development tasks for the cultivation combat workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `warn`).

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{InspectSnapshot, Simulate, Validate};
use tracing_subscriber::EnvFilter;

/// Development tasks for the cultivation combat workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for cultivation combat", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run an AI-versus-AI encounter from the roster
    Simulate(Simulate),

    /// Load and cross-check content files
    Validate(Validate),

    /// Inspect an encounter snapshot (JSON or bincode)
    InspectSnapshot(InspectSnapshot),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::Validate(cmd) => cmd.execute(),
        Command::InspectSnapshot(cmd) => cmd.execute(),
    }
}
