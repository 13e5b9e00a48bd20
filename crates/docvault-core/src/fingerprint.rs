//! Content fingerprints
//!
//! SHA-256 over the UTF-8 bytes of a document. Used only to decide whether a
//! candidate differs from what is stored; never persisted.

use sha2::{Digest, Sha256};
use std::fmt;

/// 256-bit content digest
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Compute the fingerprint of `text`
    pub fn of(text: &str) -> Self {
        Self(Sha256::digest(text.as_bytes()).into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex, 64 chars
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

/// Whether `candidate` differs from `current`
///
/// A missing current document always counts as a change. Otherwise the
/// comparison is byte-exact: a trailing newline or CRLF vs LF is a change.
pub fn changed(candidate: &str, current: Option<&str>) -> bool {
    match current {
        None => true,
        Some(current) => Fingerprint::of(candidate) != Fingerprint::of(current),
    }
}
