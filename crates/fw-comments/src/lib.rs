//! Comments for flatwiki documents.
//!
//! Each comment is one file under `comments/<document path>/`, named
//! `<YYYYMMDDhhmmss>_<author>.md`. The file name is the comment's identity:
//! it carries the UTC creation time and the sanitized author, and it is the
//! only key accepted for deletion. The body is stored verbatim as markdown.
//!
//! Two comments by the same author in the same second share a file name;
//! the later write replaces the earlier one.

mod auth;
mod error;
mod identity;
mod store;

pub use auth::{AdminList, Authorizer};
pub use error::CommentError;
pub use identity::{ANONYMOUS_AUTHOR, sanitize_author};
pub use store::{Comment, CommentStore, NO_COMMENTS_MARKER, are_comments_allowed};
