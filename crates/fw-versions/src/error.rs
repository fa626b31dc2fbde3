use fw_storage::StorageError;

/// Error returned by version history operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum VersionError {
    /// Version identifier is not a 14-digit timestamp.
    #[error("invalid version timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// Filesystem fault.
    #[error(transparent)]
    Io(#[from] StorageError),
}
