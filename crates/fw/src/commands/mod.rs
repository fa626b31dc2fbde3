//! CLI command implementations.

pub(crate) mod comments;
pub(crate) mod nav;
pub(crate) mod save;
pub(crate) mod versions;

use std::path::PathBuf;

use clap::Args;
use fw_config::{CliSettings, Config};
use fw_storage::Layout;

use crate::error::CliError;

pub(crate) use comments::CommentsCommand;
pub(crate) use nav::NavArgs;
pub(crate) use save::SaveArgs;
pub(crate) use versions::VersionsCommand;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover flatwiki.toml).
    #[arg(short, long, global = true, env = "FLATWIKI_CONFIG")]
    config: Option<PathBuf>,

    /// Wiki root directory holding documents/ and comments/ (overrides config).
    #[arg(short, long, global = true, env = "FLATWIKI_ROOT")]
    root: Option<PathBuf>,

    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Load configuration with the global overrides applied.
    pub(crate) fn load_config(&self, max_versions: Option<i64>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            root_dir: self.root.clone(),
            max_versions,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Storage layout for a loaded configuration.
pub(crate) fn layout(config: &Config) -> Layout {
    Layout::new(&config.wiki_resolved.root_dir).with_home_dir(&config.wiki_resolved.home_dir)
}
