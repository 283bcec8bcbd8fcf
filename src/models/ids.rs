//! Match identifiers.
//!
//! New matches get a random UUID. Legacy records written before ids existed
//! get a deterministic id hashed from their content.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

/// Opaque, stable identifier of a stored match.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// A fresh random id for a newly recorded match.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Derive an id from input fields.
    /// Uses SHA256 and takes the first 16 characters for brevity.
    pub fn derive(fields: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(field.as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchId({})", self.0)
    }
}

impl From<String> for MatchId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MatchId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_is_deterministic() {
        let a = MatchId::derive(&["Gregi", "Tomi", "11", "9", "2025-06-01", "0"]);
        let b = MatchId::derive(&["Gregi", "Tomi", "11", "9", "2025-06-01", "0"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_derive_depends_on_position() {
        let a = MatchId::derive(&["Gregi", "Tomi", "11", "9", "2025-06-01", "0"]);
        let b = MatchId::derive(&["Gregi", "Tomi", "11", "9", "2025-06-01", "1"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_derive_hex_prefix() {
        let id = MatchId::derive(&["test"]);
        assert_eq!(id.as_str().len(), 16);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fresh_ids_differ() {
        assert_ne!(MatchId::fresh(), MatchId::fresh());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = MatchId::from("abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
        let back: MatchId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_display_and_debug() {
        let id = MatchId::new("m-1".to_string());
        assert_eq!(format!("{}", id), "m-1");
        assert!(format!("{:?}", id).contains("m-1"));
    }
}
