//! The `wiperip` command line
//!
//! `track` and `common` rip whole asset groups, `unpack` dumps one container
//! and `inspect` summarizes one object file. Library warnings about damaged
//! input are printed through the `tracing` subscriber installed at startup.

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "wiperip", version)]
#[command(about = "Rip Wipeout PSX tracks, objects and textures to OBJ/MTL/PNG")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Parse arguments and run the selected command.
///
/// # Errors
/// Returns an error if the command fails.
pub fn run_cli() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    Cli::parse().command.execute()
}
