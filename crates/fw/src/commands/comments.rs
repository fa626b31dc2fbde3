//! `fw comments` command implementations.

use std::fs;

use clap::{Args, Subcommand};
use fw_comments::{AdminList, Comment, CommentStore, are_comments_allowed};
use fw_config::Config;
use fw_render::{MarkdownRenderer, Renderer};

use crate::commands::{GlobalArgs, layout};
use crate::error::CliError;
use crate::output::Output;

/// Comment commands.
#[derive(Subcommand)]
pub(crate) enum CommentsCommand {
    /// List comments on a document, oldest first.
    List(ListArgs),
    /// Add a comment to a document.
    Add(AddArgs),
    /// Delete a comment (admins only).
    Delete(DeleteArgs),
}

#[derive(Args)]
pub(crate) struct ListArgs {
    /// Document URL path.
    document: String,

    /// Render comment bodies to HTML.
    #[arg(long, conflicts_with = "json")]
    html: bool,

    /// Print comments as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub(crate) struct AddArgs {
    /// Document URL path.
    document: String,

    /// Comment author.
    #[arg(short, long, env = "FLATWIKI_USER")]
    author: String,

    /// Comment body (markdown).
    #[arg(short, long)]
    message: String,
}

#[derive(Args)]
pub(crate) struct DeleteArgs {
    /// Document URL path.
    document: String,

    /// Comment id (`<timestamp>_<author>.md`).
    id: String,

    /// User performing the deletion.
    #[arg(short, long, env = "FLATWIKI_USER")]
    user: String,
}

impl CommentsCommand {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config(None)?;
        let store = CommentStore::new(layout(&config));

        match self {
            Self::List(args) => {
                if !document_allows_comments(&config, &args.document) {
                    output.warning(&format!("Comments are disabled for {}", args.document));
                }
                let comments = store.list(&args.document)?;
                if args.json {
                    output.data(&serde_json::to_string_pretty(&comments)?);
                } else {
                    let renderer = args.html.then(MarkdownRenderer::new);
                    for comment in &comments {
                        print_comment(&output, comment, renderer.as_ref(), &args.document);
                    }
                }
            }
            Self::Add(args) => {
                let comment = add_comment(&config, &store, &args)?;
                output.success(&format!("Added comment {}", comment.id));
            }
            Self::Delete(args) => {
                let admins = AdminList::new(config.comments.admins.iter().cloned());
                store.delete_as(&args.id, &args.document, &args.user, &admins)?;
                output.success(&format!("Deleted comment {}", args.id));
            }
        }
        Ok(())
    }
}

/// Add a comment unless the document opted out.
fn add_comment(
    config: &Config,
    store: &CommentStore,
    args: &AddArgs,
) -> Result<Comment, CliError> {
    if !document_allows_comments(config, &args.document) {
        return Err(CliError::Validation(format!(
            "comments are disabled for {}",
            args.document
        )));
    }
    Ok(store.add(&args.document, &args.message, &args.author)?)
}

/// A missing document has no opt-out marker, so it allows comments.
fn document_allows_comments(config: &Config, document: &str) -> bool {
    fs::read_to_string(layout(config).content_file(document))
        .ok()
        .is_none_or(|content| are_comments_allowed(&content))
}

fn print_comment(
    output: &Output,
    comment: &Comment,
    renderer: Option<&MarkdownRenderer>,
    document: &str,
) {
    let when = comment
        .created_at()
        .map_or_else(String::new, |at| at.format("%Y-%m-%d %H:%M UTC").to_string());
    output.data_highlight(&format!("{} ({when})", comment.author));
    output.data_dim(&comment.id);
    match renderer {
        Some(renderer) => output.data(renderer.render(&comment.content, document).trim_end()),
        None => output.data(comment.content.trim_end()),
    }
    output.data("");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config(root: &Path) -> Config {
        Config::default_with_base(root)
    }

    fn write_document(config: &Config, document: &str, content: &str) {
        let file = layout(config).content_file(document);
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(file, content).unwrap();
    }

    fn add_args(document: &str) -> AddArgs {
        AddArgs {
            document: document.to_owned(),
            author: "bob".to_owned(),
            message: "Nice page".to_owned(),
        }
    }

    #[test]
    fn test_marker_disables_comments() {
        let temp = tempfile::tempdir().unwrap();
        let config = config(temp.path());
        write_document(&config, "/locked", "# Locked\n<!-- NO COMMENTS -->\n");
        write_document(&config, "/open", "# Open\n");

        assert!(!document_allows_comments(&config, "/locked"));
        assert!(document_allows_comments(&config, "/open"));
        assert!(document_allows_comments(&config, "/missing"));
    }

    #[test]
    fn test_add_refused_when_disabled() {
        let temp = tempfile::tempdir().unwrap();
        let config = config(temp.path());
        let store = CommentStore::new(layout(&config));
        write_document(&config, "/locked", "<!-- no comments -->");

        let err = add_comment(&config, &store, &add_args("/locked")).unwrap_err();

        assert!(matches!(err, CliError::Validation(_)));
        assert!(store.list("/locked").unwrap().is_empty());
    }

    #[test]
    fn test_add_on_open_document() {
        let temp = tempfile::tempdir().unwrap();
        let config = config(temp.path());
        let store = CommentStore::new(layout(&config));
        write_document(&config, "/open", "# Open\n");

        let comment = add_comment(&config, &store, &add_args("/open")).unwrap();

        assert_eq!(comment.author, "bob");
        assert_eq!(store.list("/open").unwrap().len(), 1);
    }
}
