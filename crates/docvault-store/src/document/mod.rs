//! Canonical document store
//!
//! Owns the single canonical file. Every mutation runs the same sequence:
//!
//! ```text
//! Idle -> Validating -> { Rejected | Comparing } -> { NoOp | BackingUp } -> Writing -> Done
//! ```
//!
//! Save and restore are serialized behind one write lock per store. Reads of
//! an existing document and snapshot listing do not take the lock.
//!
//! A failed backup never blocks the write; it is reported in the outcome as
//! `BackupOutcome::Failed`.

mod atomic;

pub use atomic::atomic_write;

use crate::backup::{BackupStore, Snapshot, SnapshotNaming};
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::errors::{io_error, Result};
use docvault_core::errors::ExError;
use docvault_core::{changed, validate, Fingerprint, ValidationReport};
use docvault_core::{log_op_end, log_op_error, log_op_start};
use docvault_core_types::schema::{outcome, OP_LOAD, OP_RESTORE, OP_SAVE};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

/// What happened to the pre-mutation backup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// The previous content was copied to this snapshot
    Created(Snapshot),
    /// There was no previous document to back up
    Skipped,
    /// The copy failed; the mutation went ahead anyway
    Failed { reason: String },
}

impl BackupOutcome {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            BackupOutcome::Created(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn filename(&self) -> Option<&str> {
        self.snapshot().map(|s| s.filename.as_str())
    }
}

/// Result of a save request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Candidate is not valid YAML; nothing was touched
    Rejected { reason: String },
    /// Candidate is byte-identical to the stored document; nothing was touched
    NoOp,
    /// Candidate was written
    Saved { backup: BackupOutcome },
}

impl SaveOutcome {
    /// Human-readable status line for the service boundary and the CLI
    pub fn message(&self) -> String {
        match self {
            SaveOutcome::Rejected { reason } => format!("YAML syntax error: {}", reason),
            SaveOutcome::NoOp => "No changes detected - file already up to date".to_string(),
            SaveOutcome::Saved { backup } => match backup {
                BackupOutcome::Created(snapshot) => format!(
                    "File saved successfully. Backup created: {}",
                    snapshot.filename
                ),
                BackupOutcome::Skipped => "File saved successfully.".to_string(),
                BackupOutcome::Failed { reason } => format!(
                    "File saved successfully. Warning: backup could not be created: {}",
                    reason
                ),
            },
        }
    }
}

/// Result of a successful restore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    /// Snapshot that was restored
    pub filename: String,
    /// Canonical content after the restore
    pub content: String,
    /// Backup of the content that was replaced
    pub previous: BackupOutcome,
}

impl Restored {
    pub fn message(&self) -> String {
        let mut message = format!("Restored from backup: {}", self.filename);
        match &self.previous {
            BackupOutcome::Created(snapshot) => {
                message.push_str(&format!(
                    ". Current version backed up as: {}",
                    snapshot.filename
                ));
            }
            BackupOutcome::Skipped => {}
            BackupOutcome::Failed { reason } => {
                message.push_str(&format!(
                    ". Warning: current version could not be backed up: {}",
                    reason
                ));
            }
        }
        message
    }
}

/// Presence of the store's files, for health checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub document_exists: bool,
    pub backup_dir_exists: bool,
    pub document_path: String,
    pub backup_dir: String,
}

/// The canonical document and its snapshot history
pub struct DocumentStore {
    config: StoreConfig,
    backups: BackupStore,
    write_lock: Mutex<()>,
}

impl DocumentStore {
    /// Create a store that names snapshots from the local wall clock
    pub fn new(config: StoreConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a store with an explicit clock for snapshot names
    pub fn with_clock(config: StoreConfig, clock: Arc<dyn Clock>) -> Self {
        let naming = SnapshotNaming::for_document(&config.document_path);
        let backups = BackupStore::new(config.backup_dir.clone(), naming, clock);
        Self {
            config,
            backups,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn document_path(&self) -> &Path {
        &self.config.document_path
    }

    pub fn backups(&self) -> &BackupStore {
        &self.backups
    }

    /// Create the document's parent directory and the backup directory
    pub fn ensure_layout(&self) -> Result<()> {
        if let Some(parent) = self.document_path().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| io_error("create_document_dir", parent, e))?;
            }
        }
        fs::create_dir_all(&self.config.backup_dir)
            .map_err(|e| io_error("create_backup_dir", &self.config.backup_dir, e))?;
        tracing::info!(
            document_path = %self.document_path().display(),
            backup_dir = %self.config.backup_dir.display(),
            "Directories ensured"
        );
        Ok(())
    }

    /// Current document text
    ///
    /// Seeds and persists the default document on first access. Failures are
    /// logged and turned into a placeholder comment document so an editor
    /// stays usable.
    pub fn load(&self) -> String {
        let start = Instant::now();
        log_op_start!(OP_LOAD, document_path = %self.document_path().display());

        match self.load_or_seed() {
            Ok(content) => {
                log_op_end!(
                    OP_LOAD,
                    since = start,
                    content_len = content.len()
                );
                content
            }
            Err(err) => {
                log_op_error!(OP_LOAD, &err, since = start);
                unreadable_placeholder(&err)
            }
        }
    }

    /// Check candidate text without touching the store
    pub fn validate(&self, candidate: &str) -> ValidationReport {
        validate(candidate)
    }

    /// Validate, compare, back up, then overwrite
    ///
    /// `Err` is returned only when the final write fails.
    pub fn save(&self, candidate: &str) -> Result<SaveOutcome> {
        let start = Instant::now();
        log_op_start!(OP_SAVE, content_len = candidate.len());

        if let Some(reason) = validate(candidate).error {
            tracing::info!(op = OP_SAVE, reason = %reason, "Rejected invalid YAML");
            log_op_end!(
                OP_SAVE,
                since = start,
                outcome = outcome::REJECTED
            );
            return Ok(SaveOutcome::Rejected { reason });
        }

        let _guard = self.lock();

        let current = match self.read_current() {
            Ok(current) => current,
            Err(err) => {
                tracing::warn!(
                    op = OP_SAVE,
                    err_code = err.code(),
                    error = %err,
                    "Could not read current document; treating candidate as changed"
                );
                None
            }
        };

        if !changed(candidate, current.as_deref()) {
            tracing::info!(op = OP_SAVE, "No changes detected, skipping save and backup");
            log_op_end!(OP_SAVE, since = start, outcome = outcome::NO_OP);
            return Ok(SaveOutcome::NoOp);
        }

        let backup = self.backup_current(OP_SAVE);

        if let Err(err) = atomic_write(self.document_path(), candidate.as_bytes()) {
            log_op_error!(OP_SAVE, &err, since = start);
            return Err(err);
        }

        log_op_end!(
            OP_SAVE,
            since = start,
            outcome = outcome::SAVED,
            fingerprint = %Fingerprint::of(candidate),
            snapshot = backup.filename().unwrap_or("none")
        );
        Ok(SaveOutcome::Saved { backup })
    }

    /// Replace the document with the snapshot named `filename`
    ///
    /// The current content is backed up first under the same policy as
    /// `save`. Unsafe names fail with `InvalidFilename`, unknown ones with
    /// `NotFound`, before anything is written. The snapshot's bytes are
    /// copied as-is; when they are not UTF-8 the returned content is the
    /// same placeholder `load` shows.
    pub fn restore(&self, filename: &str) -> Result<Restored> {
        let start = Instant::now();
        log_op_start!(OP_RESTORE, snapshot = filename);

        let result = self.restore_locked(filename);
        match &result {
            Ok(restored) => {
                log_op_end!(
                    OP_RESTORE,
                    since = start,
                    snapshot = filename,
                    previous = restored.previous.filename().unwrap_or("none")
                );
            }
            Err(err) => {
                log_op_error!(
                    OP_RESTORE,
                    err,
                    since = start,
                    snapshot = filename
                );
            }
        }
        result
    }

    /// Snapshots, newest first
    pub fn list_backups(&self) -> Result<Vec<Snapshot>> {
        self.backups.list()
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            document_exists: self.document_path().is_file(),
            backup_dir_exists: self.config.backup_dir.is_dir(),
            document_path: self.document_path().display().to_string(),
            backup_dir: self.config.backup_dir.display().to_string(),
        }
    }

    fn restore_locked(&self, filename: &str) -> Result<Restored> {
        let _guard = self.lock();

        let bytes = self.backups.read_bytes(filename)?;
        let previous = self.backup_current(OP_RESTORE);
        atomic_write(self.document_path(), &bytes)?;

        let content = match self.read_current() {
            Ok(Some(content)) => content,
            Ok(None) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                tracing::warn!(
                    op = OP_RESTORE,
                    err_code = err.code(),
                    error = %err,
                    "Restored document is not readable as text"
                );
                unreadable_placeholder(&err)
            }
        };
        Ok(Restored {
            filename: filename.to_string(),
            content,
            previous,
        })
    }

    fn load_or_seed(&self) -> Result<String> {
        if let Some(content) = self.read_current()? {
            return Ok(content);
        }

        let _guard = self.lock();
        // A writer may have created the document while we waited
        if let Some(content) = self.read_current()? {
            return Ok(content);
        }

        atomic_write(self.document_path(), self.config.default_content.as_bytes())?;
        tracing::info!(
            document_path = %self.document_path().display(),
            "Created new document with default content"
        );
        Ok(self.config.default_content.clone())
    }

    fn read_current(&self) -> Result<Option<String>> {
        match fs::read_to_string(self.document_path()) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read_document", self.document_path(), e)),
        }
    }

    fn backup_current(&self, op: &str) -> BackupOutcome {
        match self.backups.create(self.document_path()) {
            Ok(Some(snapshot)) => BackupOutcome::Created(snapshot),
            Ok(None) => BackupOutcome::Skipped,
            Err(err) => {
                tracing::warn!(
                    op,
                    err_code = err.code(),
                    error = %err,
                    "Backup failed; proceeding with write"
                );
                BackupOutcome::Failed {
                    reason: backup_failure_reason(&err),
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("document write lock was poisoned; continuing");
            poisoned.into_inner()
        })
    }
}

/// Comment-only document shown in place of content that cannot be read
fn unreadable_placeholder(err: &ExError) -> String {
    format!(
        "# Error reading file: {}\n# Please check file permissions and try again.\n",
        err.message()
    )
}

fn backup_failure_reason(err: &ExError) -> String {
    match err.path() {
        Some(path) => format!("{} ({})", err.message(), path),
        None => err.message().to_string(),
    }
}
