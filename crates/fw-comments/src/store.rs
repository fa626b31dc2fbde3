//! Comment files under `comments/<path>/`.
//!
//! Each comment is one markdown file named `<timestamp>_<author>.md`.
//! Listing skips files that do not parse; deletion is admin-only.

use std::fs;
use std::io::ErrorKind;

use chrono::{DateTime, Utc};
use fw_storage::{Layout, StorageError};
use serde::Serialize;

use crate::auth::Authorizer;
use crate::error::CommentError;
use crate::identity::{comment_file_name, is_valid_id, parse_id, sanitize_author};

/// Marker a document embeds to switch its comments off.
pub const NO_COMMENTS_MARKER: &str = "<!-- no comments -->";

/// One comment on one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// File name, `<timestamp>_<author>.md`.
    pub id: String,
    /// Sanitized author.
    pub author: String,
    /// Creation time in Unix seconds.
    pub timestamp: i64,
    /// Raw markdown body.
    pub content: String,
}

impl Comment {
    /// Creation time as a UTC date.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// Whether a document accepts comments.
///
/// Comments are off when the text contains [`NO_COMMENTS_MARKER`] in any
/// letter case.
#[must_use]
pub fn are_comments_allowed(document_content: &str) -> bool {
    !document_content
        .to_lowercase()
        .contains(NO_COMMENTS_MARKER)
}

/// Reads and writes the comment files of every document.
#[derive(Debug, Clone)]
pub struct CommentStore {
    layout: Layout,
}

impl CommentStore {
    /// Create a store over the `comments/` tree of `layout`.
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Add a comment stamped with the current time.
    pub fn add(
        &self,
        document_path: &str,
        content: &str,
        author: &str,
    ) -> Result<Comment, CommentError> {
        self.add_at(document_path, content, author, Utc::now())
    }

    /// Add a comment stamped with `at`.
    ///
    /// An existing comment by the same author in the same second is
    /// overwritten.
    pub fn add_at(
        &self,
        document_path: &str,
        content: &str,
        author: &str,
        at: DateTime<Utc>,
    ) -> Result<Comment, CommentError> {
        let author = sanitize_author(author);
        let id = comment_file_name(at, &author);

        let dir = self.layout.document_comments_dir(document_path);
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(e, &dir))?;
        let path = dir.join(&id);
        fs::write(&path, content).map_err(|e| StorageError::io(e, &path))?;

        tracing::info!(document = document_path, id = %id, "Added comment");
        Ok(Comment {
            id,
            author,
            timestamp: at.timestamp(),
            content: content.to_owned(),
        })
    }

    /// Comments of a document, oldest first.
    ///
    /// Files with a malformed name or unreadable content are skipped. Ties on
    /// timestamp are ordered by id.
    pub fn list(&self, document_path: &str) -> Result<Vec<Comment>, CommentError> {
        let dir = self.layout.document_comments_dir(document_path);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(e, &dir).into()),
        };

        let mut comments = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(e, &dir))?;
            let Ok(id) = entry.file_name().into_string() else {
                continue;
            };
            let Some(parsed) = parse_id(&id) else {
                tracing::debug!(id = %id, "Skipping malformed comment file");
                continue;
            };
            let content = match fs::read_to_string(entry.path()) {
                Ok(content) => content,
                Err(e) => {
                    tracing::debug!(id = %id, error = %e, "Skipping unreadable comment");
                    continue;
                }
            };
            comments.push(Comment {
                author: parsed.author.to_owned(),
                timestamp: parsed.timestamp,
                id,
                content,
            });
        }

        comments.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(comments)
    }

    /// Delete one comment.
    ///
    /// Fails with [`CommentError::Unauthorized`] before any filesystem access
    /// unless `is_admin`. The id is validated before it is joined to a path.
    pub fn delete(
        &self,
        comment_id: &str,
        document_path: &str,
        is_admin: bool,
    ) -> Result<(), CommentError> {
        if !is_admin {
            return Err(CommentError::Unauthorized);
        }
        if !is_valid_id(comment_id) {
            return Err(CommentError::InvalidId(comment_id.to_owned()));
        }

        let path = self
            .layout
            .document_comments_dir(document_path)
            .join(comment_id);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(document = document_path, id = comment_id, "Deleted comment");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(CommentError::NotFound(comment_id.to_owned()))
            }
            Err(e) => Err(StorageError::io(e, &path).into()),
        }
    }

    /// Delete on behalf of `user`, asking `authorizer` for the admin role.
    pub fn delete_as(
        &self,
        comment_id: &str,
        document_path: &str,
        user: &str,
        authorizer: &dyn Authorizer,
    ) -> Result<(), CommentError> {
        self.delete(comment_id, document_path, authorizer.is_admin(user))
    }
}
