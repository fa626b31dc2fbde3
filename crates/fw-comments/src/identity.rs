//! Comment identity: `<YYYYMMDDhhmmss>_<author>.md`.

use chrono::{DateTime, NaiveDateTime, Utc};
use fw_storage::{TIMESTAMP_FORMAT, is_timestamp_stem};

/// Author stored when sanitization leaves nothing.
pub const ANONYMOUS_AUTHOR: &str = "anonymous";

const COMMENT_EXT: &str = ".md";

/// Characters removed from author names.
const REMOVED_CHARS: &[char] = &[
    '#', '%', '&', '{', '}', '\\', ':', '<', '>', '*', '?', '|', '"', '\'', ';',
];

/// Make an author name safe to embed in a file name.
///
/// Spaces and `/` become `_`; the characters `# % & { } \ : < > * ? | " ' ;`
/// and control characters are dropped. An empty result becomes
/// [`ANONYMOUS_AUTHOR`].
///
/// ```
/// assert_eq!(fw_comments::sanitize_author("Bob/Smith#1"), "Bob_Smith1");
/// ```
#[must_use]
pub fn sanitize_author(author: &str) -> String {
    let clean: String = author
        .chars()
        .filter(|c| !REMOVED_CHARS.contains(c) && !c.is_control())
        .map(|c| if c == ' ' || c == '/' { '_' } else { c })
        .collect();
    if clean.is_empty() {
        ANONYMOUS_AUTHOR.to_owned()
    } else {
        clean
    }
}

/// File name for a comment by `author` (already sanitized) at `at`.
pub(crate) fn comment_file_name(at: DateTime<Utc>, author: &str) -> String {
    format!("{}_{author}{COMMENT_EXT}", at.format(TIMESTAMP_FORMAT))
}

/// Parsed pieces of a comment file name.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParsedId<'a> {
    pub timestamp: i64,
    pub author: &'a str,
}

/// Parse a comment file name.
///
/// The stem is split on the first `_`. The left part must be a 14-digit
/// calendar timestamp and the right part a non-empty author.
pub(crate) fn parse_id(id: &str) -> Option<ParsedId<'_>> {
    let stem = id.strip_suffix(COMMENT_EXT)?;
    let (stamp, author) = stem.split_once('_')?;
    if author.is_empty() {
        return None;
    }
    Some(ParsedId {
        timestamp: parse_timestamp(stamp)?,
        author,
    })
}

/// Stricter check for ids arriving from callers: the author part must
/// already be in sanitized form, so the id is a single plain file name.
pub(crate) fn is_valid_id(id: &str) -> bool {
    parse_id(id).is_some_and(|parsed| sanitize_author(parsed.author) == parsed.author)
}

/// Unix seconds of a `YYYYMMDDhhmmss` UTC timestamp.
fn parse_timestamp(stamp: &str) -> Option<i64> {
    if !is_timestamp_stem(stamp) {
        return None;
    }
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc().timestamp())
}
