//! Structured logging for docvault
//!
//! Store operations log a `start` event and one closing event (`end` or
//! `end_error`) through `log_op_start!`, `log_op_end!` and `log_op_error!`.
//! Every boundary event carries `component`, `op` and `event`; closing
//! events add `duration_ms`, and error events add `err_kind`, `err_code` and
//! `err_message`. The HTTP layer wraps each request in a span holding
//! `request_id`.
//!
//! ```rust
//! use docvault_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
