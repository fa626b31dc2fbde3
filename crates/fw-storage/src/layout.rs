//! On-disk layout of a flatwiki root.
//!
//! ```text
//! <root>/
//! ├── documents/
//! │   └── <path...>/
//! │       ├── document.md                  # current content
//! │       └── versions/<YYYYMMDDhhmmss>.md  # historical revisions
//! └── comments/
//!     └── <path...>/<YYYYMMDDhhmmss>_<author>.md
//! ```
//!
//! Every URL path is routed through [`sanitize_path`] before it is joined
//! onto the root, so no layout method can produce a path outside it. The
//! root URL `/` is stored in the home directory (`documents/home/`), the
//! same page that titles the navigation root.

use std::path::{Path, PathBuf};

use crate::path::{sanitize_path, sanitize_segment};

/// Directory holding the document tree.
pub const DOCUMENTS_DIR: &str = "documents";
/// Directory holding per-document comment logs.
pub const COMMENTS_DIR: &str = "comments";
/// Primary content file of every document directory.
pub const CONTENT_FILE: &str = "document.md";
/// Per-document directory of historical revisions.
pub const VERSIONS_DIR: &str = "versions";

/// Default top-level directory holding the root (`/`) document.
pub const DEFAULT_HOME_DIR: &str = "home";

/// `strftime` pattern of version and comment timestamps (UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Width of a `YYYYMMDDhhmmss` timestamp.
const TIMESTAMP_LEN: usize = 14;

/// Resolves document, version and comment locations under a wiki root.
#[derive(Clone, Debug)]
pub struct Layout {
    root: PathBuf,
    home_dir: String,
}

impl Layout {
    /// Create a layout rooted at `root` with the default home directory.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            home_dir: DEFAULT_HOME_DIR.to_owned(),
        }
    }

    /// Store the root document under `home_dir` instead.
    ///
    /// The name is sanitized as a single segment; an empty result keeps the
    /// default.
    #[must_use]
    pub fn with_home_dir(mut self, home_dir: &str) -> Self {
        let clean = sanitize_segment(home_dir);
        if !clean.is_empty() {
            self.home_dir = clean;
        }
        self
    }

    /// Top-level directory of the root document.
    #[must_use]
    pub fn home_dir(&self) -> &str {
        &self.home_dir
    }

    /// Wiki root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root of the document tree.
    #[must_use]
    pub fn documents_dir(&self) -> PathBuf {
        self.root.join(DOCUMENTS_DIR)
    }

    /// Root of the comment tree.
    #[must_use]
    pub fn comments_dir(&self) -> PathBuf {
        self.root.join(COMMENTS_DIR)
    }

    /// Directory of the document at `url_path`.
    #[must_use]
    pub fn document_dir(&self, url_path: &str) -> PathBuf {
        self.join_sanitized(&self.documents_dir(), url_path)
    }

    /// Content file of the document at `url_path`.
    #[must_use]
    pub fn content_file(&self, url_path: &str) -> PathBuf {
        self.document_dir(url_path).join(CONTENT_FILE)
    }

    /// Version directory of the document at `url_path`.
    #[must_use]
    pub fn versions_dir(&self, url_path: &str) -> PathBuf {
        self.document_dir(url_path).join(VERSIONS_DIR)
    }

    /// Comment directory of the document at `url_path`.
    #[must_use]
    pub fn document_comments_dir(&self, url_path: &str) -> PathBuf {
        self.join_sanitized(&self.comments_dir(), url_path)
    }

    /// Join a sanitized URL path onto `base`. Root maps to the home directory.
    fn join_sanitized(&self, base: &Path, url_path: &str) -> PathBuf {
        let clean = sanitize_path(url_path);
        if clean.is_empty() {
            base.join(&self.home_dir)
        } else {
            base.join(clean)
        }
    }
}

/// Check whether `stem` is a fixed-width `YYYYMMDDhhmmss` timestamp.
///
/// Only the shape is checked (14 ASCII digits). Fixed width means lexical
/// order equals chronological order.
#[must_use]
pub fn is_timestamp_stem(stem: &str) -> bool {
    stem.len() == TIMESTAMP_LEN && stem.bytes().all(|b| b.is_ascii_digit())
}
