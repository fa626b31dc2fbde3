//! Markdown rendering seam for flatwiki.
//!
//! The wiki core treats rendering as a black box: it only needs
//! `render(markdown, document_path) -> html` for bodies and comments, and
//! `emojify(text)` for titles. [`Renderer`] is that seam. [`MarkdownRenderer`]
//! is a plain pulldown-cmark implementation with a small emoji-shortcode
//! table; richer engines (kanban boards, diagrams, shortcodes) plug in by
//! implementing the trait.
//!
//! # Example
//!
//! ```
//! use fw_render::{MarkdownRenderer, Renderer};
//!
//! let renderer = MarkdownRenderer::new();
//! assert_eq!(renderer.emojify("Ship it :rocket:"), "Ship it 🚀");
//! assert!(renderer.render("**bold**", "/notes").contains("<strong>bold</strong>"));
//! ```

use std::sync::LazyLock;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, TextMergeStream, html};
use regex::{Captures, Regex};

/// Markdown rendering collaborator.
pub trait Renderer: Send + Sync {
    /// Render markdown to HTML.
    ///
    /// `document_path` is the canonical URL path of the document being
    /// rendered; engines may use it to resolve relative links.
    fn render(&self, markdown: &str, document_path: &str) -> String;

    /// Replace emoji shortcodes (`:rocket:`) in a line of plain text.
    ///
    /// The default leaves text untouched.
    fn emojify(&self, text: &str) -> String {
        text.to_owned()
    }
}

static SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-z0-9_+\-]+):").unwrap());

/// Shortcodes understood by [`MarkdownRenderer::emojify`].
const EMOJI: &[(&str, &str)] = &[
    ("+1", "👍"),
    ("-1", "👎"),
    ("book", "📖"),
    ("books", "📚"),
    ("bug", "🐛"),
    ("bulb", "💡"),
    ("calendar", "📆"),
    ("check", "✔️"),
    ("construction", "🚧"),
    ("fire", "🔥"),
    ("gear", "⚙️"),
    ("heart", "❤️"),
    ("house", "🏠"),
    ("info", "ℹ️"),
    ("lock", "🔒"),
    ("memo", "📝"),
    ("rocket", "🚀"),
    ("smile", "😄"),
    ("sparkles", "✨"),
    ("star", "⭐"),
    ("tada", "🎉"),
    ("warning", "⚠️"),
    ("wrench", "🔧"),
    ("x", "❌"),
];

/// Pulldown-cmark backed renderer with GFM extensions.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Create a renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    }
}

impl Renderer for MarkdownRenderer {
    /// Shortcodes are replaced in text only, never inside code.
    fn render(&self, markdown: &str, _document_path: &str) -> String {
        let mut in_code_block = false;
        let events = TextMergeStream::new(Parser::new_ext(markdown, Self::parser_options()))
            .map(|event| match event {
                Event::Start(Tag::CodeBlock(_)) => {
                    in_code_block = true;
                    event
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    event
                }
                Event::Text(text) if !in_code_block => Event::Text(self.emojify(&text).into()),
                other => other,
            });
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events);
        out
    }

    fn emojify(&self, text: &str) -> String {
        if !text.contains(':') {
            return text.to_owned();
        }
        SHORTCODE_RE
            .replace_all(text, |caps: &Captures<'_>| {
                lookup_emoji(&caps[1]).map_or_else(|| caps[0].to_owned(), str::to_owned)
            })
            .into_owned()
    }
}

fn lookup_emoji(code: &str) -> Option<&'static str> {
    EMOJI
        .iter()
        .find(|(name, _)| *name == code)
        .map(|(_, emoji)| *emoji)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Plain;

    impl Renderer for Plain {
        fn render(&self, markdown: &str, _document_path: &str) -> String {
            markdown.to_owned()
        }
    }

    #[test]
    fn test_default_emojify_is_identity() {
        assert_eq!(Plain.emojify("Hi :smile:"), "Hi :smile:");
    }

    #[test]
    fn test_emojify_known_shortcodes() {
        let r = MarkdownRenderer::new();

        assert_eq!(r.emojify(":tada: Release notes"), "🎉 Release notes");
        assert_eq!(r.emojify(":+1: and :-1:"), "👍 and 👎");
    }

    #[test]
    fn test_emojify_leaves_unknown_shortcodes() {
        let r = MarkdownRenderer::new();

        assert_eq!(r.emojify("time 10:30:45"), "time 10:30:45");
        assert_eq!(r.emojify(":not-an-emoji:"), ":not-an-emoji:");
    }

    #[test]
    fn test_render_basic_markdown() {
        let html = MarkdownRenderer::new().render("# Title\n\nSome *text*.", "/a");

        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn test_render_tables() {
        let html = MarkdownRenderer::new().render("| a | b |\n|---|---|\n| 1 | 2 |", "/a");

        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_render_keeps_shortcodes_in_code() {
        let html = MarkdownRenderer::new().render(
            "Status :x: and `:x:`\n\n```\nlet s = \":tada:\";\n```\n",
            "/a",
        );

        assert!(html.contains("Status ❌ and <code>:x:</code>"), "{html}");
        assert!(html.contains(":tada:"), "{html}");
        assert!(!html.contains('🎉'), "{html}");
    }

    #[test]
    fn test_render_applies_shortcodes() {
        let html = MarkdownRenderer::new().render("Done :check:", "/a");

        assert!(html.contains("Done ✔️"));
    }
}
