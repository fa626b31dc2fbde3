//! Navigation tree construction by walking the document directory.
//!
//! The walk visits every directory below the documents root exactly once,
//! top-down, with each listing sorted by file name. Each directory becomes a
//! node whose URL path is the sanitized, `/`-joined chain of directory names.
//!
//! Skipped during the walk:
//! - hidden directories (name starts with `.`)
//! - `versions/` directories (revision snapshots, not documents)
//! - the home subtree at the top level (it titles the root instead)
//! - all plain files, including `document.md`
//!
//! Nodes are inserted by URL-path equality at each depth, with missing
//! intermediate nodes created on demand, so insertion order of entries does
//! not affect the final shape. Child lookup is a linear scan per depth, which
//! degrades on directories with thousands of siblings.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use fw_storage::{DEFAULT_HOME_DIR, Layout, StorageError, VERSIONS_DIR, format_dir_name, url_path};

use crate::node::NavNode;
use crate::title::TitleResolver;

/// Error returned when the walk fails part-way.
///
/// Carries the tree built up to the failure; the caller decides whether a
/// partial navigation is usable.
#[derive(Debug, thiserror::Error)]
#[error("failed to build navigation tree: {source}")]
pub struct BuildError {
    partial: Box<NavNode>,
    #[source]
    source: StorageError,
}

impl BuildError {
    /// Tree built before the failure.
    #[must_use]
    pub fn partial(&self) -> &NavNode {
        &self.partial
    }

    /// Consume the error, keeping the partial tree.
    #[must_use]
    pub fn into_partial(self) -> NavNode {
        *self.partial
    }

    /// Underlying storage failure.
    #[must_use]
    pub fn storage_error(&self) -> &StorageError {
        &self.source
    }
}

/// Builds a [`NavNode`] tree from a documents directory.
#[derive(Clone, Debug)]
pub struct NavBuilder {
    documents_dir: PathBuf,
    home_dir: String,
    titles: TitleResolver,
}

impl NavBuilder {
    /// Create a builder for `documents_dir`.
    #[must_use]
    pub fn new(documents_dir: PathBuf, titles: TitleResolver) -> Self {
        Self {
            documents_dir,
            home_dir: DEFAULT_HOME_DIR.to_owned(),
            titles,
        }
    }

    /// Create a builder for the documents of `layout`, sharing its home
    /// directory so the root node stands for the same file as the `/` path.
    #[must_use]
    pub fn for_layout(layout: &Layout, titles: TitleResolver) -> Self {
        Self::new(layout.documents_dir(), titles).with_home_dir(layout.home_dir())
    }

    /// Use a different top-level directory for the home page.
    #[must_use]
    pub fn with_home_dir(mut self, home_dir: impl Into<String>) -> Self {
        self.home_dir = home_dir.into();
        self
    }

    /// Documents root this builder walks.
    #[must_use]
    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    /// Walk the documents root and build the navigation tree.
    ///
    /// Creates the documents root if it doesn't exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the root cannot be created or any directory
    /// cannot be listed. The error holds the tree built so far.
    pub fn build(&self) -> Result<NavNode, BuildError> {
        let start = Instant::now();
        let mut root = NavNode::root(
            self.titles
                .resolve(&self.documents_dir.join(&self.home_dir)),
        );

        if let Err(e) = fs::create_dir_all(&self.documents_dir) {
            return Err(BuildError {
                partial: Box::new(root),
                source: StorageError::io(e, &self.documents_dir),
            });
        }

        let mut segments = Vec::new();
        if let Err(source) = self.walk(&self.documents_dir, &mut segments, &mut root) {
            tracing::warn!(
                root = %self.documents_dir.display(),
                error = %source,
                "Navigation walk failed, returning partial tree"
            );
            return Err(BuildError {
                partial: Box::new(root),
                source,
            });
        }

        tracing::debug!(
            root = %self.documents_dir.display(),
            nodes = root.count(),
            elapsed = ?start.elapsed(),
            "Built navigation tree"
        );
        Ok(root)
    }

    fn walk(
        &self,
        dir: &Path,
        segments: &mut Vec<String>,
        root: &mut NavNode,
    ) -> Result<(), StorageError> {
        let mut entries: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| StorageError::io(e, dir))? {
            let entry = entry.map_err(|e| StorageError::io(e, dir))?;
            let file_type = entry
                .file_type()
                .map_err(|e| StorageError::io(e, entry.path()))?;
            if !file_type.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.is_excluded(&name, segments.is_empty()) {
                continue;
            }
            entries.push((name, entry.path()));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, path) in entries {
            segments.push(name);
            self.insert(root, segments, &path);
            self.walk(&path, segments, root)?;
            segments.pop();
        }
        Ok(())
    }

    fn is_excluded(&self, name: &str, top_level: bool) -> bool {
        name.starts_with('.') || name == VERSIONS_DIR || (top_level && name == self.home_dir)
    }

    /// Insert the directory at `segments` into the tree.
    ///
    /// The deepest segment gets a resolved title; intermediate nodes that
    /// don't exist yet get a formatted directory name.
    fn insert(&self, root: &mut NavNode, segments: &[String], dir: &Path) {
        let mut node = root;
        for depth in 0..segments.len() {
            let path = url_path(segments[..=depth].iter().map(String::as_str));
            let idx = match node.children.iter().position(|c| c.path == path) {
                Some(idx) => idx,
                None => {
                    let title = if depth + 1 == segments.len() {
                        self.titles.resolve(dir)
                    } else {
                        format_dir_name(&segments[depth])
                    };
                    node.children.push(NavNode::new(title, path));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[idx];
        }
    }
}
