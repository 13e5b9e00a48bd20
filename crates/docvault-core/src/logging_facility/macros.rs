//! Operation boundary macros
//!
//! Each public store operation logs one `start` event and exactly one of
//! `end` or `end_error`. Durations are given either directly as
//! `duration_ms = <u64>` or as `since = <Instant>`.
//!
//! The calling crate needs `tracing` in its dependencies.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use docvault_core::log_op_start;
/// log_op_start!("save");
/// log_op_start!("restore", snapshot = "services_20260101_120000.yaml");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__types::schema::EVENT_START,
            $($($field)*)?
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use docvault_core::log_op_end;
/// let start = std::time::Instant::now();
/// log_op_end!("load", since = start, content_len = 120);
/// log_op_end!("save", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, since = $start:expr $(, $($field:tt)*)?) => {
        $crate::log_op_end!(
            $op,
            duration_ms = $start.elapsed().as_millis() as u64
            $(, $($field)*)?
        )
    };
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Log the failed end of an operation
///
/// Accepts anything convertible into `ExError`: a `VaultError`, an owned
/// `ExError` or a `&ExError`.
///
/// # Example
///
/// ```
/// # use docvault_core::{log_op_error, errors::VaultError};
/// let err = VaultError::SnapshotNotFound { filename: "x.yaml".to_string() };
/// log_op_error!("restore", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, since = $start:expr $(, $($field:tt)*)?) => {
        $crate::log_op_error!(
            $op,
            $err,
            duration_ms = $start.elapsed().as_millis() as u64
            $(, $($field)*)?
        )
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = ($err).into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
            $($($field)*)?
        );
    }};
}
