//! CLI error types.

use fw_comments::CommentError;
use fw_config::ConfigError;
use fw_nav::BuildError;
use fw_versions::VersionError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Navigation(#[from] BuildError),

    #[error("{0}")]
    Versions(#[from] VersionError),

    #[error("{0}")]
    Comments(#[from] CommentError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
