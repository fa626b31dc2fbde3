//! `fw save` command implementation.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use fw_versions::VersionStore;

use crate::commands::{GlobalArgs, layout};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the save command.
#[derive(Args)]
pub(crate) struct SaveArgs {
    /// Document URL path (e.g. /guides/setup).
    document: String,

    /// Read new content from this file instead of stdin.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Revisions to keep after saving (overrides config).
    #[arg(long)]
    max_versions: Option<i64>,
}

impl SaveArgs {
    /// Write a new revision and prune old ones.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config(self.max_versions)?;

        let content = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };

        let store = VersionStore::new(layout(&config), config.versions.max_versions);
        let saved = store.save(&self.document, &content)?;

        output.success(&format!(
            "Saved {} (version {})",
            self.document, saved.timestamp
        ));
        if !saved.pruned.is_empty() {
            output.info(&format!(
                "Removed {} old version(s): {}",
                saved.pruned.len(),
                saved.pruned.join(", ")
            ));
        }
        Ok(())
    }
}
