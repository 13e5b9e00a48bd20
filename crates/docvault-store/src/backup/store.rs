//! Filesystem-backed snapshot store
//!
//! Copies the canonical document into the backup directory before every
//! mutation, lists snapshots newest first, and reads them back for restore.

use crate::backup::naming::SnapshotNaming;
use crate::clock::Clock;
use crate::errors::{escapes_backup_dir, io_error, snapshot_missing, unsafe_filename, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use docvault_core_types::schema::{
    FIELD_BACKUP_DIR, FIELD_SNAPSHOT, OP_CREATE_BACKUP, OP_LIST_BACKUPS, OP_RESOLVE_BACKUP,
};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Descriptor of one snapshot file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub filename: String,
    /// Timestamp encoded in the filename
    pub created_at: NaiveDateTime,
    pub size_bytes: u64,
    /// Filesystem modification time
    pub modified_at: DateTime<Local>,
}

/// Snapshot directory for one canonical document
pub struct BackupStore {
    dir: PathBuf,
    naming: SnapshotNaming,
    clock: Arc<dyn Clock>,
}

impl BackupStore {
    /// Create a store over `dir`; the directory is created lazily on first backup
    pub fn new(dir: impl Into<PathBuf>, naming: SnapshotNaming, clock: Arc<dyn Clock>) -> Self {
        Self {
            dir: dir.into(),
            naming,
            clock,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn naming(&self) -> &SnapshotNaming {
        &self.naming
    }

    /// Copy `source` into a new snapshot
    ///
    /// Returns `Ok(None)` when `source` does not exist. Two snapshots taken
    /// within the same second share a name; the later copy replaces the
    /// earlier one.
    pub fn create(&self, source: &Path) -> Result<Option<Snapshot>> {
        match fs::metadata(source) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("stat_document", source, e)),
        }

        fs::create_dir_all(&self.dir).map_err(|e| io_error("create_backup_dir", &self.dir, e))?;

        let created_at = self.clock.now();
        let filename = self.naming.filename_for(created_at);
        let target = self.dir.join(&filename);

        if target.exists() {
            tracing::warn!(
                op = OP_CREATE_BACKUP,
                { FIELD_SNAPSHOT } = %filename,
                "snapshot name already taken this second; overwriting"
            );
        }

        let size_bytes =
            fs::copy(source, &target).map_err(|e| io_error("copy_backup", &target, e))?;
        let modified_at = fs::metadata(&target)
            .and_then(|m| m.modified())
            .map(DateTime::<Local>::from)
            .unwrap_or_else(|_| Local::now());

        tracing::info!(
            op = OP_CREATE_BACKUP,
            { FIELD_SNAPSHOT } = %filename,
            size_bytes,
            "Backup created"
        );

        Ok(Some(Snapshot {
            filename,
            created_at,
            size_bytes,
            modified_at,
        }))
    }

    /// All snapshots, newest first
    ///
    /// Files that do not follow the naming scheme, and entries that cannot
    /// be stat'ed, are ignored. A missing backup directory is an empty list.
    pub fn list(&self) -> Result<Vec<Snapshot>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("list_backups", &self.dir, e)),
        };

        let mut snapshots = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error("list_backups", &self.dir, e))?;
            let Ok(filename) = entry.file_name().into_string() else {
                continue;
            };
            let Some(created_at) = self.naming.parse(&filename) else {
                continue;
            };
            // Dangling links and files removed since read_dir are skipped
            let stat = fs::metadata(entry.path()).and_then(|m| {
                let modified = m.modified()?;
                Ok((m, modified))
            });
            let (metadata, modified) = match stat {
                Ok((m, modified)) if m.is_file() => (m, modified),
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(
                        op = OP_LIST_BACKUPS,
                        { FIELD_SNAPSHOT } = %filename,
                        error = %e,
                        "skipping snapshot that cannot be inspected"
                    );
                    continue;
                }
            };
            let modified_at = DateTime::<Local>::from(modified);

            snapshots.push(Snapshot {
                filename,
                created_at,
                size_bytes: metadata.len(),
                modified_at,
            });
        }

        snapshots.sort_by(|a, b| b.filename.cmp(&a.filename));

        tracing::debug!(
            op = OP_LIST_BACKUPS,
            { FIELD_BACKUP_DIR } = %self.dir.display(),
            backup_count = snapshots.len(),
        );
        Ok(snapshots)
    }

    /// Content of the snapshot named `filename`
    pub fn read(&self, filename: &str) -> Result<String> {
        let path = self.resolve(filename)?;
        fs::read_to_string(&path).map_err(|e| io_error("read_backup", &path, e))
    }

    /// Raw bytes of the snapshot named `filename`, with no encoding check
    pub fn read_bytes(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self.resolve(filename)?;
        fs::read(&path).map_err(|e| io_error("read_backup", &path, e))
    }

    /// Resolve `filename` to a snapshot path inside the backup directory
    ///
    /// Applies the filename safety check, then canonicalizes both the
    /// candidate and the directory so a symlink pointing elsewhere is
    /// refused as well.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf> {
        if !self.naming.is_safe_filename(filename) {
            return Err(unsafe_filename(filename));
        }

        let root = match self.dir.canonicalize() {
            Ok(root) => root,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(snapshot_missing(filename)),
            Err(e) => return Err(io_error("resolve_backup_dir", &self.dir, e)),
        };
        let candidate = self.dir.join(filename);
        let resolved = match candidate.canonicalize() {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(snapshot_missing(filename)),
            Err(e) => return Err(io_error("resolve_backup", &candidate, e)),
        };

        if !resolved.starts_with(&root) {
            tracing::warn!(
                op = OP_RESOLVE_BACKUP,
                { FIELD_SNAPSHOT } = filename,
                "refusing snapshot path outside the backup directory"
            );
            return Err(escapes_backup_dir(filename));
        }
        if !resolved.is_file() {
            return Err(snapshot_missing(filename));
        }

        Ok(resolved)
    }
}
