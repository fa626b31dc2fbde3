//! Document title resolution.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use fw_render::Renderer;
use fw_storage::{CONTENT_FILE, format_dir_name};

/// Resolves a display title for a document directory.
///
/// Reads the directory's `document.md` line by line and stops at the first
/// H1 (`# Title`). Falls back to the formatted directory name when the file
/// is missing, unreadable, or has no H1.
#[derive(Clone)]
pub struct TitleResolver {
    renderer: Arc<dyn Renderer>,
}

impl TitleResolver {
    /// Create a resolver that runs headings through `renderer.emojify`.
    #[must_use]
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self { renderer }
    }

    /// Resolve the title of the document stored in `dir`. Never fails.
    #[must_use]
    pub fn resolve(&self, dir: &Path) -> String {
        self.read_heading(&dir.join(CONTENT_FILE))
            .unwrap_or_else(|| fallback_title(dir))
    }

    fn read_heading(&self, file_path: &Path) -> Option<String> {
        let file = File::open(file_path).ok()?;
        for line in BufReader::new(file).lines() {
            let line = line.ok()?;
            if let Some(heading) = h1_text(&line) {
                return Some(self.renderer.emojify(heading));
            }
        }
        None
    }
}

impl std::fmt::Debug for TitleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitleResolver").finish_non_exhaustive()
    }
}

/// Text of an H1 line: exactly one `#` followed by a space.
///
/// Lines whose heading text is blank do not count.
fn h1_text(line: &str) -> Option<&str> {
    let text = line.strip_prefix("# ")?.trim();
    (!text.is_empty()).then_some(text)
}

/// Formatted final path segment, e.g. `setup-guide` -> `Setup Guide`.
fn fallback_title(dir: &Path) -> String {
    dir.file_name()
        .map(|name| format_dir_name(&name.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fw_render::MarkdownRenderer;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn resolver() -> TitleResolver {
        TitleResolver::new(Arc::new(MarkdownRenderer::new()))
    }

    fn doc_dir(root: &Path, name: &str, content: Option<&str>) -> std::path::PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        if let Some(content) = content {
            fs::write(dir.join(CONTENT_FILE), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_h1_text() {
        assert_eq!(h1_text("# Title"), Some("Title"));
        assert_eq!(h1_text("#  Padded  "), Some("Padded"));
        assert_eq!(h1_text("## Subtitle"), None);
        assert_eq!(h1_text("#NoSpace"), None);
        assert_eq!(h1_text(" # Indented"), None);
        assert_eq!(h1_text("# "), None);
    }

    #[test]
    fn test_resolve_first_h1() {
        let temp = tempfile::tempdir().unwrap();
        let dir = doc_dir(
            temp.path(),
            "guide",
            Some("intro line\n## Not this\n# User Guide\n# Second Title\n"),
        );

        assert_eq!(resolver().resolve(&dir), "User Guide");
    }

    #[test]
    fn test_resolve_applies_emoji_shortcodes() {
        let temp = tempfile::tempdir().unwrap();
        let dir = doc_dir(temp.path(), "launch", Some("# Launch :rocket:\n"));

        assert_eq!(resolver().resolve(&dir), "Launch 🚀");
    }

    #[test]
    fn test_resolve_handles_crlf() {
        let temp = tempfile::tempdir().unwrap();
        let dir = doc_dir(temp.path(), "win", Some("# Windows Title\r\nbody\r\n"));

        assert_eq!(resolver().resolve(&dir), "Windows Title");
    }

    #[test]
    fn test_resolve_falls_back_without_h1() {
        let temp = tempfile::tempdir().unwrap();
        let dir = doc_dir(temp.path(), "setup-guide", Some("## Only H2\ntext"));

        assert_eq!(resolver().resolve(&dir), "Setup Guide");
    }

    #[test]
    fn test_resolve_falls_back_when_file_missing() {
        let temp = tempfile::tempdir().unwrap();
        let dir = doc_dir(temp.path(), "release-notes", None);

        assert_eq!(resolver().resolve(&dir), "Release Notes");
    }

    #[test]
    fn test_resolve_falls_back_on_invalid_utf8() {
        let temp = tempfile::tempdir().unwrap();
        let dir = doc_dir(temp.path(), "binary-blob", None);
        fs::write(dir.join(CONTENT_FILE), [0xff, 0xfe, b'\n', b'#', b' ', b'X']).unwrap();

        assert_eq!(resolver().resolve(&dir), "Binary Blob");
    }
}
