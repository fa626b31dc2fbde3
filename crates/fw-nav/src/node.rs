//! Navigation tree nodes and per-request queries.

use serde::{Deserialize, Serialize};

/// Canonical path of the tree root.
pub const ROOT_PATH: &str = "/";

/// A node in the navigation tree.
///
/// Every node stands for a document directory. Children keep the order in
/// which the builder visited them (directory listings sorted by name).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavNode {
    /// Display title.
    pub title: String,
    /// Canonical URL path (`/`, `/guides`, `/guides/setup`).
    pub path: String,
    /// Always true: leaf documents are directories holding a content file.
    pub is_directory: bool,
    /// Whether this node or one of its descendants is the current page.
    #[serde(default)]
    pub is_active: bool,
    /// Child nodes in walk order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavNode>,
}

/// Normalize a lookup path: drop one trailing `/`, empty means root.
fn normalize(path: &str) -> &str {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    if trimmed.is_empty() {
        ROOT_PATH
    } else {
        trimmed
    }
}

impl NavNode {
    /// Create a directory node.
    #[must_use]
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            is_directory: true,
            is_active: false,
            children: Vec::new(),
        }
    }

    /// Create an empty root node.
    #[must_use]
    pub fn root(title: impl Into<String>) -> Self {
        Self::new(title, ROOT_PATH)
    }

    /// Find a node by exact path.
    ///
    /// A single trailing `/` is ignored and the empty string means root.
    /// Depth-first; paths are unique, so the first match is the only one.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&NavNode> {
        self.find_normalized(normalize(path))
    }

    fn find_normalized(&self, path: &str) -> Option<&NavNode> {
        if self.path == path {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_normalized(path))
    }

    /// Mark the node at `current_path` and all of its ancestors active.
    ///
    /// One depth-first pass: activity propagates upward through return
    /// values. Existing flags are not cleared, so call this on a fresh
    /// tree (or after [`clear_active`](Self::clear_active)).
    ///
    /// Returns whether this node ended up active.
    pub fn mark_active(&mut self, current_path: &str) -> bool {
        self.mark_normalized(normalize(current_path))
    }

    fn mark_normalized(&mut self, target: &str) -> bool {
        let mut active = self.path == target;
        for child in &mut self.children {
            // No short-circuit: every subtree is visited exactly once.
            if child.mark_normalized(target) {
                active = true;
            }
        }
        if active {
            self.is_active = true;
        }
        active
    }

    /// Reset `is_active` on this node and every descendant.
    pub fn clear_active(&mut self) {
        self.is_active = false;
        for child in &mut self.children {
            child.clear_active();
        }
    }

    /// Nodes from the root down to (excluding) the node at `path`.
    ///
    /// Returns an empty list if `path` is the root or is not in the tree.
    #[must_use]
    pub fn ancestors(&self, path: &str) -> Vec<&NavNode> {
        let mut chain = Vec::new();
        if self.collect_ancestors(normalize(path), &mut chain) {
            chain.pop();
            chain
        } else {
            Vec::new()
        }
    }

    fn collect_ancestors<'a>(&'a self, target: &str, chain: &mut Vec<&'a NavNode>) -> bool {
        chain.push(self);
        if self.path == target
            || self
                .children
                .iter()
                .any(|child| child.collect_ancestors(target, chain))
        {
            return true;
        }
        chain.pop();
        false
    }

    /// Total number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(NavNode::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Root with `/a` (children `/a/x`, `/a/y`) and `/b` (child `/b/z`).
    fn sample_tree() -> NavNode {
        let mut a = NavNode::new("A", "/a");
        a.children.push(NavNode::new("X", "/a/x"));
        a.children.push(NavNode::new("Y", "/a/y"));
        let mut b = NavNode::new("B", "/b");
        b.children.push(NavNode::new("Z", "/b/z"));
        let mut root = NavNode::root("Home");
        root.children.push(a);
        root.children.push(b);
        root
    }

    fn active_paths(node: &NavNode, out: &mut Vec<String>) {
        if node.is_active {
            out.push(node.path.clone());
        }
        for child in &node.children {
            active_paths(child, out);
        }
    }

    #[test]
    fn test_find_exact_path() {
        let tree = sample_tree();

        assert_eq!(tree.find("/a/y").map(|n| n.title.as_str()), Some("Y"));
        assert_eq!(tree.find("/b").map(|n| n.title.as_str()), Some("B"));
    }

    #[test]
    fn test_find_trims_trailing_separator() {
        let tree = sample_tree();

        assert_eq!(tree.find("/a/x/").map(|n| n.path.as_str()), Some("/a/x"));
    }

    #[test]
    fn test_find_empty_is_root() {
        let tree = sample_tree();

        assert_eq!(tree.find("").map(|n| n.path.as_str()), Some("/"));
        assert_eq!(tree.find("/").map(|n| n.path.as_str()), Some("/"));
    }

    #[test]
    fn test_find_missing_path() {
        let tree = sample_tree();

        assert!(tree.find("/a/q").is_none());
        assert!(tree.find("a/x").is_none());
    }

    #[test]
    fn test_mark_active_marks_ancestors_only() {
        let mut tree = sample_tree();

        assert!(tree.mark_active("/a/y"));

        let mut active = Vec::new();
        active_paths(&tree, &mut active);
        assert_eq!(active, vec!["/", "/a", "/a/y"]);
    }

    #[test]
    fn test_mark_active_leaves_sibling_subtree_untouched() {
        let mut tree = sample_tree();

        tree.mark_active("/b/z");

        let a = tree.find("/a").unwrap();
        assert!(!a.is_active);
        assert!(a.children.iter().all(|c| !c.is_active));
    }

    #[test]
    fn test_mark_active_unknown_path_marks_nothing() {
        let mut tree = sample_tree();

        assert!(!tree.mark_active("/nope"));

        let mut active = Vec::new();
        active_paths(&tree, &mut active);
        assert!(active.is_empty());
    }

    #[test]
    fn test_mark_active_does_not_clear_previous_marks() {
        let mut tree = sample_tree();

        tree.mark_active("/a/x");
        tree.mark_active("/b/z");

        assert!(tree.find("/a/x").unwrap().is_active);
        assert!(tree.find("/b/z").unwrap().is_active);
    }

    #[test]
    fn test_clear_active_resets_whole_tree() {
        let mut tree = sample_tree();
        tree.mark_active("/a/x");

        tree.clear_active();
        tree.mark_active("/b");

        let mut active = Vec::new();
        active_paths(&tree, &mut active);
        assert_eq!(active, vec!["/", "/b"]);
    }

    #[test]
    fn test_ancestors_root_first() {
        let tree = sample_tree();

        let chain: Vec<_> = tree
            .ancestors("/a/y")
            .iter()
            .map(|n| n.path.as_str())
            .collect();
        assert_eq!(chain, vec!["/", "/a"]);
    }

    #[test]
    fn test_ancestors_of_root_and_unknown() {
        let tree = sample_tree();

        assert!(tree.ancestors("/").is_empty());
        assert!(tree.ancestors("/missing").is_empty());
    }

    #[test]
    fn test_count() {
        assert_eq!(sample_tree().count(), 6);
    }

    #[test]
    fn test_serialization_camel_case() {
        let mut tree = sample_tree();
        tree.mark_active("/a");

        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(json["path"], "/");
        assert_eq!(json["isDirectory"], true);
        assert_eq!(json["isActive"], true);
        assert_eq!(json["children"][0]["title"], "A");
        assert!(json["children"][0]["children"][0].get("children").is_none());
    }
}
