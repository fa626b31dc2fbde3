//! Path sanitization and display-name formatting.
//!
//! [`sanitize_path`] is the sole gate between untrusted path-like strings and
//! filesystem operations. It never fails: any input maps to *some* relative,
//! traversal-free path, with the empty string standing for the root.

/// Sanitize an untrusted path into a safe relative path.
///
/// Steps, in order:
/// 1. Trim leading and trailing `/`.
/// 2. Replace every character outside `[A-Za-z0-9_-/]` with `-`.
/// 3. Collapse repeated `/`.
/// 4. Resolve `.` and `..` segments without ever climbing above the root.
/// 5. Strip any remaining leading `../` or `./` sequences.
///
/// Examples:
/// - `"/guides/setup/"` -> `"guides/setup"`
/// - `"a//b"` -> `"a/b"`
/// - `"my page"` -> `"my-page"`
/// - `"../../etc/passwd"` -> `"--/--/etc/passwd"`
/// - `""` or `"/"` -> `""` (root)
#[must_use]
pub fn sanitize_path(path: &str) -> String {
    let replaced: String = path
        .trim_matches('/')
        .chars()
        .map(|c| if is_allowed(c) { c } else { '-' })
        .collect();

    let mut segments: Vec<&str> = Vec::new();
    for segment in replaced.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut cleaned = segments.join("/");
    while let Some(rest) = cleaned
        .strip_prefix("../")
        .or_else(|| cleaned.strip_prefix("./"))
    {
        cleaned = rest.to_owned();
    }
    if cleaned == "." || cleaned == ".." {
        cleaned.clear();
    }
    cleaned
}

/// Sanitize a single path segment (a directory name).
///
/// Same character rules as [`sanitize_path`], but the result never contains
/// `/` and spaces always become `-`.
#[must_use]
pub fn sanitize_segment(segment: &str) -> String {
    sanitize_path(segment).replace(['/', ' '], "-")
}

/// Build a canonical URL path from raw path segments.
///
/// Each segment is passed through [`sanitize_segment`]; empty results are
/// dropped. The result always starts with `/`, and no segments yields `/`.
///
/// ```
/// use fw_storage::url_path;
///
/// assert_eq!(url_path(["Getting Started", "First steps"]), "/Getting-Started/First-steps");
/// assert_eq!(url_path(Vec::<&str>::new()), "/");
/// ```
#[must_use]
pub fn url_path<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut url = String::new();
    for segment in segments {
        let clean = sanitize_segment(segment);
        if clean.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(&clean);
    }
    if url.is_empty() {
        url.push('/');
    }
    url
}

/// Format a directory name for display.
///
/// Dashes become spaces and the first letter of each word is capitalized.
///
/// Examples:
/// - `"setup-guide"` -> `"Setup Guide"`
/// - `"1-alpha"` -> `"1 Alpha"`
/// - `"api"` -> `"Api"`
#[must_use]
pub fn format_dir_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for word in name.split('-').filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        capitalize_first_into(word, &mut result);
    }
    result
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/')
}

/// Capitalize the first character of a word, appending to `buf`.
fn capitalize_first_into(word: &str, buf: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        buf.extend(first.to_uppercase());
        buf.push_str(chars.as_str());
    }
}
