//! Document saves with timestamped snapshots.
//!
//! A save overwrites `documents/<path>/document.md`, writes the same text
//! to `documents/<path>/versions/<timestamp>.md`, then applies retention.

use std::fs;

use chrono::{DateTime, Utc};
use fw_storage::{Layout, StorageError, TIMESTAMP_FORMAT, is_timestamp_stem};

use crate::error::VersionError;
use crate::retention::{prune, version_file_name, version_files};

/// Outcome of a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedVersion {
    /// Timestamp of the snapshot just written.
    pub timestamp: String,
    /// Older snapshot files removed by retention.
    pub pruned: Vec<String>,
}

/// Saves documents and manages their snapshots.
#[derive(Debug, Clone)]
pub struct VersionStore {
    layout: Layout,
    max_versions: i64,
}

impl VersionStore {
    /// Create a store. `max_versions <= 0` keeps every snapshot.
    #[must_use]
    pub fn new(layout: Layout, max_versions: i64) -> Self {
        Self {
            layout,
            max_versions,
        }
    }

    /// Save `content` as the current revision of `document_path`.
    pub fn save(&self, document_path: &str, content: &str) -> Result<SavedVersion, VersionError> {
        self.save_at(document_path, content, Utc::now())
    }

    /// Save with an explicit snapshot time.
    ///
    /// Writes `document.md`, then `versions/<timestamp>.md`, then prunes.
    /// A second save within the same second replaces that second's snapshot.
    pub fn save_at(
        &self,
        document_path: &str,
        content: &str,
        at: DateTime<Utc>,
    ) -> Result<SavedVersion, VersionError> {
        let versions_dir = self.layout.versions_dir(document_path);
        fs::create_dir_all(&versions_dir).map_err(|e| StorageError::io(e, &versions_dir))?;

        let content_file = self.layout.content_file(document_path);
        fs::write(&content_file, content).map_err(|e| StorageError::io(e, &content_file))?;

        let timestamp = at.format(TIMESTAMP_FORMAT).to_string();
        let snapshot = versions_dir.join(version_file_name(&timestamp));
        fs::write(&snapshot, content).map_err(|e| StorageError::io(e, &snapshot))?;

        let pruned = prune(&versions_dir, self.max_versions)?;
        tracing::info!(
            document = document_path,
            version = %timestamp,
            pruned = pruned.len(),
            "Saved document"
        );

        Ok(SavedVersion { timestamp, pruned })
    }

    /// Snapshot timestamps of `document_path`, newest first.
    pub fn list(&self, document_path: &str) -> Result<Vec<String>, VersionError> {
        let mut names = version_files(&self.layout.versions_dir(document_path))?;
        names.reverse();
        Ok(names
            .into_iter()
            .filter_map(|name| name.strip_suffix(".md").map(str::to_owned))
            .collect())
    }

    /// Content of one snapshot.
    pub fn read(&self, document_path: &str, timestamp: &str) -> Result<String, VersionError> {
        if !is_timestamp_stem(timestamp) {
            return Err(VersionError::InvalidTimestamp(timestamp.to_owned()));
        }
        let path = self
            .layout
            .versions_dir(document_path)
            .join(version_file_name(timestamp));
        Ok(fs::read_to_string(&path).map_err(|e| StorageError::io(e, &path))?)
    }

    /// Apply the retention limit without saving.
    pub fn prune(&self, document_path: &str) -> Result<Vec<String>, VersionError> {
        prune(&self.layout.versions_dir(document_path), self.max_versions)
    }
}
