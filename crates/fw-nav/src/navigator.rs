//! Shared navigation snapshot with atomic rebuilds.
//!
//! # Thread Safety
//!
//! `Navigator` is designed for concurrent access without external locking:
//! - `tree()` returns `Arc<NavNode>` with minimal locking (just Arc clone)
//! - `reload_if_needed()` uses double-checked locking so only one thread walks
//!   the filesystem at a time
//! - `invalidate()` is lock-free (atomic flag)
//!
//! A rebuild produces a new tree and swaps the `Arc`; readers holding the
//! previous snapshot keep using it untouched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::builder::{BuildError, NavBuilder};
use crate::node::NavNode;

/// Process-wide holder of the current navigation tree.
pub struct Navigator {
    builder: NavBuilder,
    /// Mutex for serializing reload operations.
    reload_lock: Mutex<()>,
    /// Current tree snapshot (atomically swappable).
    current: RwLock<Arc<NavNode>>,
    /// Cache validity flag.
    valid: AtomicBool,
}

impl Navigator {
    /// Create a navigator. Nothing is read until the first reload.
    #[must_use]
    pub fn new(builder: NavBuilder) -> Self {
        Self {
            builder,
            reload_lock: Mutex::new(()),
            current: RwLock::new(Arc::new(NavNode::root(String::new()))),
            valid: AtomicBool::new(false),
        }
    }

    /// Current snapshot, without checking validity.
    #[must_use]
    pub fn tree(&self) -> Arc<NavNode> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Return the current tree, rebuilding it first if invalidated.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the rebuild fails. The previous snapshot
    /// stays in place and the next call retries.
    pub fn reload_if_needed(&self) -> Result<Arc<NavNode>, BuildError> {
        // Fast path: cache valid
        if self.valid.load(Ordering::Acquire) {
            return Ok(self.tree());
        }

        let _guard = self
            .reload_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Double-check after acquiring lock
        if self.valid.load(Ordering::Acquire) {
            return Ok(self.tree());
        }

        self.rebuild()
    }

    /// Rebuild unconditionally and swap in the new tree.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the walk fails; the previous snapshot stays.
    pub fn reload(&self) -> Result<Arc<NavNode>, BuildError> {
        let _guard = self
            .reload_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.rebuild()
    }

    /// Mark the snapshot stale. The next `reload_if_needed()` rebuilds.
    ///
    /// Current readers continue using their existing `Arc<NavNode>`.
    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }

    /// Navigation for one request: a private copy with the active path marked.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if a pending rebuild fails.
    pub fn navigation_for(&self, current_path: &str) -> Result<NavNode, BuildError> {
        let tree = self.reload_if_needed()?;
        let mut view = NavNode::clone(&tree);
        view.mark_active(current_path);
        Ok(view)
    }

    /// Must be called with `reload_lock` held.
    ///
    /// The flag is set before the walk so an `invalidate()` that lands
    /// during the walk still forces the next rebuild.
    fn rebuild(&self) -> Result<Arc<NavNode>, BuildError> {
        self.valid.store(true, Ordering::Release);
        let tree = match self.builder.build() {
            Ok(tree) => Arc::new(tree),
            Err(e) => {
                self.valid.store(false, Ordering::Release);
                return Err(e);
            }
        };
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&tree);
        tracing::info!(
            root = %self.builder.documents_dir().display(),
            nodes = tree.count(),
            "Navigation tree reloaded"
        );
        Ok(tree)
    }
}
