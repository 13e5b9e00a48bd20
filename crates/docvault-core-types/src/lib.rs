//! Types shared by the docvault error and logging facilities
//!
//! - `RequestId`: per-request correlation id
//! - `schema`: log field keys, operation names and event names

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
