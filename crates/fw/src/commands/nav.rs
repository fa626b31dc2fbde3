//! `fw nav` command implementation.

use std::sync::Arc;

use clap::Args;
use fw_nav::{NavBuilder, NavNode, Navigator, ROOT_PATH, TitleResolver};
use fw_render::MarkdownRenderer;

use crate::commands::{GlobalArgs, layout};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Mark this URL path and its ancestors active.
    #[arg(short, long)]
    active: Option<String>,

    /// Print the tree as JSON.
    #[arg(long)]
    json: bool,
}

impl NavArgs {
    /// Build and print the navigation tree.
    ///
    /// On a failed walk the partial tree is still printed before the error
    /// is returned.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config(None)?;

        let titles = TitleResolver::new(Arc::new(MarkdownRenderer::new()));
        let navigator = Navigator::new(NavBuilder::for_layout(&layout(&config), titles));

        let active = self.active.as_deref().unwrap_or(ROOT_PATH);
        let (tree, failure) = match navigator.navigation_for(active) {
            Ok(tree) => (tree, None),
            Err(e) => {
                output.warning("Navigation walk failed; showing partial tree");
                let mut partial = e.partial().clone();
                partial.mark_active(active);
                (partial, Some(e))
            }
        };

        if self.active.is_some() && !tree.is_active {
            output.warning(&format!("{active} is not in the navigation tree"));
        }

        if self.json {
            output.data(&serde_json::to_string_pretty(&tree)?);
        } else {
            for (depth, node) in flatten(&tree) {
                let line = format!("{}{}  {}", "  ".repeat(depth), node.title, node.path);
                if node.is_active {
                    output.data_highlight(&line);
                } else {
                    output.data(&line);
                }
            }
        }

        match failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

/// Pre-order list of nodes with their depth.
fn flatten(root: &NavNode) -> Vec<(usize, &NavNode)> {
    let mut out = Vec::with_capacity(root.count());
    let mut stack = vec![(0, root)];
    while let Some((depth, node)) = stack.pop() {
        out.push((depth, node));
        for child in node.children.iter().rev() {
            stack.push((depth + 1, child));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fw_config::Config;
    use fw_versions::VersionStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_saved_root_document_titles_navigation_root() {
        let temp = tempfile::tempdir().unwrap();
        let mut config = Config::default_with_base(temp.path());
        "start".clone_into(&mut config.wiki_resolved.home_dir);
        let layout = layout(&config);
        VersionStore::new(layout.clone(), 0)
            .save("/", "# Company Wiki\n")
            .unwrap();

        let titles = TitleResolver::new(Arc::new(MarkdownRenderer::new()));
        let tree = NavBuilder::for_layout(&layout, titles).build().unwrap();

        assert_eq!(tree.title, "Company Wiki");
        assert!(tree.children.is_empty());
        assert_eq!(
            layout.content_file("/"),
            temp.path().join("data/documents/start/document.md")
        );
    }

    #[test]
    fn test_flatten_preorder() {
        let mut a = NavNode::new("A", "/a");
        a.children.push(NavNode::new("A1", "/a/1"));
        let mut root = NavNode::root("Home");
        root.children.push(a);
        root.children.push(NavNode::new("B", "/b"));

        let lines: Vec<_> = flatten(&root)
            .into_iter()
            .map(|(depth, node)| (depth, node.path.as_str()))
            .collect();

        assert_eq!(lines, vec![(0, "/"), (1, "/a"), (2, "/a/1"), (1, "/b")]);
    }
}
