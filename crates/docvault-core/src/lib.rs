//! docvault Core - validation, fingerprints and shared facilities
//!
//! This crate provides the pure building blocks of the document store:
//! - YAML content validation (`validate`)
//! - Content fingerprints for byte-exact change detection (`fingerprint`)
//! - The structured error facility (`errors`)
//! - The structured logging facility (`logging_facility`)
//!
//! Nothing in here touches the filesystem; persistence lives in `docvault-store`.

pub mod errors;
pub mod fingerprint;
pub mod logging_facility;
pub mod validate;

// Lets the logging macros name schema constants from any calling crate
#[doc(hidden)]
pub use docvault_core_types as __types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, VaultError};
pub use fingerprint::{changed, Fingerprint};
pub use validate::{require_valid, validate, ValidationReport};
