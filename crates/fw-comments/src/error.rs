use fw_storage::StorageError;

/// Error returned by comment operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CommentError {
    /// Caller lacks the admin capability required to delete.
    #[error("not authorized to delete comments")]
    Unauthorized,

    /// Comment identifier does not have the `<timestamp>_<author>.md` shape.
    #[error("invalid comment id: {0:?}")]
    InvalidId(String),

    /// No comment with this identifier exists for the document.
    #[error("comment not found: {0}")]
    NotFound(String),

    /// Filesystem fault.
    #[error(transparent)]
    Io(#[from] StorageError),
}
