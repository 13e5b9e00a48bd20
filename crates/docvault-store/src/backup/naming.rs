//! Snapshot filename scheme
//!
//! For a canonical document `services.yaml` snapshots are named
//! `services_20260118_093015.yaml`. The timestamp is fixed-width, so sorting
//! names lexicographically sorts snapshots chronologically.

use chrono::NaiveDateTime;
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TIMESTAMP_LEN: usize = 15;

/// Derives and recognizes snapshot filenames for one canonical document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotNaming {
    stem: String,
    extension: String,
}

impl SnapshotNaming {
    pub fn new(stem: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            extension: extension.into(),
        }
    }

    /// Take stem and extension from the canonical document path
    ///
    /// A path without a stem falls back to `document`, one without an
    /// extension to `yaml`.
    pub fn for_document(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "document".to_string());
        let extension = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "yaml".to_string());
        Self::new(stem, extension)
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Snapshot filename for a point in time (second resolution)
    pub fn filename_for(&self, at: NaiveDateTime) -> String {
        format!(
            "{}_{}.{}",
            self.stem,
            at.format(TIMESTAMP_FORMAT),
            self.extension
        )
    }

    /// Timestamp encoded in `filename`, if it follows the naming scheme
    pub fn parse(&self, filename: &str) -> Option<NaiveDateTime> {
        let rest = filename.strip_prefix(self.stem.as_str())?.strip_prefix('_')?;
        let timestamp = rest
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;

        if timestamp.len() != TIMESTAMP_LEN {
            return None;
        }
        let well_formed = timestamp
            .bytes()
            .enumerate()
            .all(|(i, b)| if i == 8 { b == b'_' } else { b.is_ascii_digit() });
        if !well_formed {
            return None;
        }

        NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()
    }

    /// Filename safety check applied before any snapshot lookup
    ///
    /// Rejects parent-directory markers, path separators, and anything not
    /// ending in the document's extension.
    pub fn is_safe_filename(&self, filename: &str) -> bool {
        !filename.is_empty()
            && !filename.contains("..")
            && !filename.contains('/')
            && !filename.contains('\\')
            && !filename.contains('\0')
            && filename.ends_with(&format!(".{}", self.extension))
    }
}
