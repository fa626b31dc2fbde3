//! Flat-file storage primitives for flatwiki.
//!
//! Everything flatwiki persists lives as plain files under a single root
//! directory. This crate owns the pieces every other crate needs before it
//! touches that tree:
//!
//! - [`sanitize_path`]: the only gate between untrusted path-like input
//!   (URLs, filenames) and filesystem paths
//! - [`Layout`]: where documents, versions and comments live under the root
//! - [`StorageError`]: I/O faults with a semantic kind and path context
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use fw_storage::{Layout, sanitize_path};
//!
//! assert_eq!(sanitize_path("/guides/../setup guide/"), "guides/--/setup-guide");
//!
//! let layout = Layout::new(Path::new("/srv/wiki"));
//! assert_eq!(
//!     layout.document_dir("/guides/setup"),
//!     Path::new("/srv/wiki/documents/guides/setup"),
//! );
//! assert_eq!(layout.document_dir("/"), Path::new("/srv/wiki/documents/home"));
//! ```

mod error;
mod layout;
mod path;

pub use error::{StorageError, StorageErrorKind};
pub use layout::{
    COMMENTS_DIR, CONTENT_FILE, DEFAULT_HOME_DIR, DOCUMENTS_DIR, Layout, TIMESTAMP_FORMAT,
    VERSIONS_DIR, is_timestamp_stem,
};
pub use path::{format_dir_name, sanitize_path, sanitize_segment, url_path};
