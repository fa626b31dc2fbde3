//! `fw versions` command implementations.

use clap::{Args, Subcommand};
use fw_versions::VersionStore;

use crate::commands::{GlobalArgs, layout};
use crate::error::CliError;
use crate::output::Output;

/// Revision history commands.
#[derive(Subcommand)]
pub(crate) enum VersionsCommand {
    /// List revisions of a document, newest first.
    List(DocumentArgs),
    /// Print the content of one revision.
    Show(ShowArgs),
    /// Delete revisions beyond the configured limit.
    Prune(PruneArgs),
}

#[derive(Args)]
pub(crate) struct DocumentArgs {
    /// Document URL path.
    document: String,
}

#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Document URL path.
    document: String,

    /// Revision timestamp (YYYYMMDDhhmmss).
    timestamp: String,
}

#[derive(Args)]
pub(crate) struct PruneArgs {
    /// Document URL path.
    document: String,

    /// Revisions to keep (overrides config).
    #[arg(long)]
    max_versions: Option<i64>,
}

impl VersionsCommand {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        match self {
            Self::List(args) => {
                let config = global.load_config(None)?;
                let store = VersionStore::new(layout(&config), config.versions.max_versions);
                let versions = store.list(&args.document)?;
                if versions.is_empty() {
                    output.warning(&format!("No versions for {}", args.document));
                }
                for version in versions {
                    output.data(&version);
                }
            }
            Self::Show(args) => {
                let config = global.load_config(None)?;
                let store = VersionStore::new(layout(&config), config.versions.max_versions);
                output.data(&store.read(&args.document, &args.timestamp)?);
            }
            Self::Prune(args) => {
                let config = global.load_config(args.max_versions)?;
                let limit = config.versions.max_versions;
                if limit <= 0 {
                    output.info("max_versions is unlimited, nothing to prune");
                    return Ok(());
                }
                let store = VersionStore::new(layout(&config), limit);
                let removed = store.prune(&args.document)?;
                output.success(&format!(
                    "Removed {} version(s) of {} (keeping {limit})",
                    removed.len(),
                    args.document
                ));
                for name in removed {
                    output.data_dim(&name);
                }
            }
        }
        Ok(())
    }
}
