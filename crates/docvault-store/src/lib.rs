//! docvault Store - persistence for a single versioned document
//!
//! Provides:
//! - `DocumentStore`: the canonical file, with validate → compare → backup → write
//!   sequencing and restore
//! - `BackupStore`: a flat directory of timestamp-named snapshots
//! - `StoreConfig`: explicit paths, passed in at construction
//! - `Clock`: the time source used to name snapshots

pub mod backup;
pub mod clock;
pub mod config;
pub mod document;
pub mod errors;

// Re-export key types
pub use backup::{BackupStore, Snapshot, SnapshotNaming};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{StoreConfig, DEFAULT_DOCUMENT};
pub use document::{BackupOutcome, DocumentStore, HealthReport, Restored, SaveOutcome};
pub use errors::Result;
