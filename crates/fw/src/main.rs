//! flatwiki CLI.
//!
//! Provides commands for:
//! - `nav`: Print the navigation tree derived from the document directory
//! - `save`: Write a new document revision and prune old ones
//! - `versions list|show|prune`: Inspect and trim revision history
//! - `comments list|add|delete`: Manage per-document comments

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CommentsCommand, GlobalArgs, NavArgs, SaveArgs, VersionsCommand};
use output::Output;

/// flatwiki - flat-file wiki core.
#[derive(Parser)]
#[command(name = "fw", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the navigation tree.
    Nav(NavArgs),
    /// Save a new revision of a document.
    Save(SaveArgs),
    /// Revision history commands.
    #[command(subcommand)]
    Versions(VersionsCommand),
    /// Comment commands.
    #[command(subcommand)]
    Comments(CommentsCommand),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Nav(args) => args.execute(&cli.global),
        Commands::Save(args) => args.execute(&cli.global),
        Commands::Versions(cmd) => cmd.execute(&cli.global),
        Commands::Comments(cmd) => cmd.execute(&cli.global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
