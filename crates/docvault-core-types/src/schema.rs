//! Field keys, operation names and event names shared by every log line
//!
//! The HTTP layer, the store and the test capture all refer to these, so a
//! renamed field shows up as a compile error rather than a silent gap in
//! the logs.

// Envelope fields written by the logging macros
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Store context
pub const FIELD_BACKUP_DIR: &str = "backup_dir";
pub const FIELD_SNAPSHOT: &str = "snapshot";
pub const FIELD_OUTCOME: &str = "outcome";

// Operations with start/end boundaries
pub const OP_LOAD: &str = "load";
pub const OP_SAVE: &str = "save";
pub const OP_RESTORE: &str = "restore";

// Single-event operations
pub const OP_CREATE_BACKUP: &str = "create_backup";
pub const OP_LIST_BACKUPS: &str = "list_backups";
pub const OP_RESOLVE_BACKUP: &str = "resolve_backup";

/// Values of `outcome` on the `save` end event
pub mod outcome {
    pub const SAVED: &str = "saved";
    pub const NO_OP: &str = "no_op";
    pub const REJECTED: &str = "rejected";
}

// Boundary events
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
