//! Navigation tree for flatwiki.
//!
//! The navigation mirrors the directory structure under `documents/`:
//! every directory is a node, titled by the first H1 of its `document.md`
//! (or its formatted name), addressed by a sanitized URL path.
//!
//! This crate provides:
//! - [`NavBuilder`]: walks the documents root once and builds a [`NavNode`] tree
//! - [`NavNode::find`] / [`NavNode::mark_active`]: per-request queries
//! - [`TitleResolver`]: first-H1 title extraction with a name fallback
//! - [`Navigator`]: process-wide snapshot, rebuilt and swapped atomically
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use fw_nav::{NavBuilder, Navigator, TitleResolver};
//! use fw_render::MarkdownRenderer;
//!
//! let titles = TitleResolver::new(Arc::new(MarkdownRenderer::new()));
//! let builder = NavBuilder::new(PathBuf::from("data/documents"), titles);
//! let navigator = Navigator::new(builder);
//!
//! let nav = navigator.navigation_for("/guides/setup")?;
//! assert!(nav.is_active);
//! # Ok(())
//! # }
//! ```

mod builder;
mod navigator;
mod node;
mod title;

pub use builder::{BuildError, NavBuilder};
pub use fw_storage::DEFAULT_HOME_DIR;
pub use navigator::Navigator;
pub use node::{NavNode, ROOT_PATH};
pub use title::TitleResolver;
