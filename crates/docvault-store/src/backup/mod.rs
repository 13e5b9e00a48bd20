//! Snapshot directory
//!
//! A flat, append-only directory of full copies of the canonical document,
//! named `<stem>_<YYYYMMDD>_<HHMMSS>.<ext>` after the document's own filename.
//! Snapshots are never modified or pruned.

mod naming;
mod store;

pub use naming::SnapshotNaming;
pub use store::{BackupStore, Snapshot};
