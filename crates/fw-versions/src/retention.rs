//! Keep-newest-N eviction over a version directory.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use fw_storage::{StorageError, is_timestamp_stem};

use crate::error::VersionError;

const VERSION_EXT: &str = ".md";

/// Delete the oldest version files in `dir` beyond `max_versions`.
///
/// Only files named `<14 digits>.md` take part; anything else in the
/// directory is left alone. `max_versions <= 0` keeps everything, and a
/// missing directory has nothing to prune.
///
/// Deletion is best effort: a file that fails to delete is logged and the
/// remaining deletions still run. Returns the names actually removed.
///
/// # Errors
///
/// Returns [`VersionError::Io`] if the directory exists but cannot be read.
pub fn prune(dir: &Path, max_versions: i64) -> Result<Vec<String>, VersionError> {
    let Ok(keep) = usize::try_from(max_versions) else {
        return Ok(Vec::new());
    };
    if keep == 0 {
        return Ok(Vec::new());
    }

    let names = version_files(dir)?;
    if names.len() <= keep {
        return Ok(Vec::new());
    }

    let excess = names.len() - keep;
    let mut removed = Vec::with_capacity(excess);
    for name in names.into_iter().take(excess) {
        let path = dir.join(&name);
        match fs::remove_file(&path) {
            Ok(()) => removed.push(name),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to delete old version");
            }
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        removed = removed.len(),
        kept = keep,
        "Pruned version history"
    );
    Ok(removed)
}

/// Version file names in `dir`, oldest first.
///
/// Fixed-width timestamps make lexical order chronological.
pub(crate) fn version_files(dir: &Path) -> Result<Vec<String>, VersionError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StorageError::io(e, dir).into()),
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            name.strip_suffix(VERSION_EXT)
                .is_some_and(is_timestamp_stem)
        })
        .collect();
    names.sort_unstable();
    Ok(names)
}

/// File name of the version with the given timestamp.
pub(crate) fn version_file_name(timestamp: &str) -> String {
    format!("{timestamp}{VERSION_EXT}")
}
