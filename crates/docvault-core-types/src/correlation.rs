//! Request correlation
//!
//! The HTTP boundary attaches a `RequestId` to every request span and error,
//! and returns it in the `x-request-id` response header.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest caller-supplied id that is adopted as-is
pub const MAX_INBOUND_LEN: usize = 128;

/// Identifier for one request, UUIDv7 unless the caller supplied one
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Mint a time-ordered id
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Adopt a caller's id when it is usable, otherwise mint one
    ///
    /// Empty values, values longer than `MAX_INBOUND_LEN` and values with
    /// characters outside visible ASCII are replaced.
    pub fn adopt_or_new(inbound: Option<&str>) -> Self {
        match inbound {
            Some(value)
                if !value.is_empty()
                    && value.len() <= MAX_INBOUND_LEN
                    && value.bytes().all(|b| b.is_ascii_graphic()) =>
            {
                Self(value.to_string())
            }
            _ => Self::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minted_ids_are_uuid_v7() {
        let id = RequestId::new();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
        assert_ne!(id, RequestId::new());
    }

    #[test]
    fn test_adopts_usable_inbound_id() {
        let id = RequestId::adopt_or_new(Some("trace-abc-123"));
        assert_eq!(id.as_str(), "trace-abc-123");
        assert_eq!(id.to_string(), "trace-abc-123");
    }

    #[test]
    fn test_replaces_unusable_inbound_id() {
        let long = "x".repeat(MAX_INBOUND_LEN + 1);
        for inbound in [None, Some(""), Some("has space"), Some(long.as_str())] {
            let id = RequestId::adopt_or_new(inbound);
            assert!(Uuid::parse_str(id.as_str()).is_ok(), "inbound: {:?}", inbound);
        }
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = RequestId::adopt_or_new(Some("req-1"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"req-1\"");
        let back: RequestId = serde_json::from_str("\"req-1\"").unwrap();
        assert_eq!(back, id);
    }
}
