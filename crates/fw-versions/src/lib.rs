//! Revision history for flatwiki documents.
//!
//! Every save writes the new content to `document.md` and an immutable
//! snapshot to `versions/<YYYYMMDDhhmmss>.md` next to it. The version
//! directory is then pruned to the newest `max_versions` snapshots.

mod error;
mod retention;
mod store;

pub use error::VersionError;
pub use retention::prune;
pub use store::{SavedVersion, VersionStore};
