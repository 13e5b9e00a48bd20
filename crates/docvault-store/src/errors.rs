//! Error handling for docvault-store
//!
//! Wraps docvault-core ExError with store-specific helpers

use docvault_core::errors::{ExError, VaultError};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error tagged with the failing operation and path
pub fn io_error(op: &str, path: &Path, err: std::io::Error) -> ExError {
    VaultError::io(op, path, &err).into()
}

/// Create a snapshot-not-found error
pub fn snapshot_missing(filename: &str) -> ExError {
    VaultError::SnapshotNotFound {
        filename: filename.to_string(),
    }
    .into()
}

/// Create an unsafe-filename error
pub fn unsafe_filename(filename: &str) -> ExError {
    VaultError::UnsafeFilename {
        filename: filename.to_string(),
    }
    .into()
}

/// Create an error for a snapshot path that resolves outside the backup directory
pub fn escapes_backup_dir(filename: &str) -> ExError {
    VaultError::EscapesBackupDir {
        filename: filename.to_string(),
    }
    .into()
}
