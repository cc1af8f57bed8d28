//! Shortcut Editor - keyboard-shortcut override editor core.
//!
//! Headless CLI over the core library: list the merged command view, inspect
//! per-context conflicts, record and clear overrides, and export a sharing
//! snippet. The command catalog is supplied as a JSON file; a GUI host would
//! implement `CommandCatalog` directly instead.

use anyhow::Result;
use clap::{Parser, Subcommand};
use shortcut_editor::cli::{ClearArgs, ConflictsArgs, ExportArgs, ListArgs, SetArgs};
use shortcut_editor::constants::APP_BINARY_NAME;
use tracing_subscriber::EnvFilter;

/// Shortcut Editor - keyboard-shortcut override editor
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List commands with effective shortcuts, status, and conflicts
    List(ListArgs),
    /// Show same-context shortcut conflicts
    Conflicts(ConflictsArgs),
    /// Bind a shortcut to a command
    Set(SetArgs),
    /// Clear a command's shortcut, or reset all overrides
    Clear(ClearArgs),
    /// Emit a startup-script snippet re-applying saved overrides
    Export(ExportArgs),
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
        Command::List(args) => args.execute(),
        Command::Conflicts(args) => args.execute(),
        Command::Set(args) => args.execute(),
        Command::Clear(args) => args.execute(),
        Command::Export(args) => args.execute(),
    }
}
