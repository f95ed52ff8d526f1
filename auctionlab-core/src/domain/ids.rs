use serde::{Deserialize, Serialize};
use std::fmt;

/// Bidder identity. Unique within an auction, immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BidderId(pub u32);

impl fmt::Display for BidderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic run ID (BLAKE3 of the canonical run configuration).
///
/// Used as a namespace when deriving RNG sub-seeds, so two different
/// configurations sharing a master seed still draw from different streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub [u8; 32]);

impl RunId {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(*blake3::hash(bytes).as_bytes())
    }

    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }

    /// First 12 hex characters, for directory names and log lines.
    pub fn short(&self) -> String {
        self.to_hex()[..12].to_string()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_is_content_addressed() {
        let a = RunId::from_bytes(b"reserve=750");
        let b = RunId::from_bytes(b"reserve=750");
        let c = RunId::from_bytes(b"reserve=800");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn run_id_hex_is_64_chars() {
        let id = RunId::from_bytes(b"x");
        assert_eq!(id.to_hex().len(), 64);
        assert_eq!(id.short().len(), 12);
        assert!(id.to_hex().starts_with(&id.short()));
    }

    #[test]
    fn run_id_hex_matches_blake3() {
        let id = RunId::from_bytes(b"reserve=750");
        assert_eq!(id.to_hex(), blake3::hash(b"reserve=750").to_hex().to_string());
    }

    #[test]
    fn bidder_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&BidderId(7)).unwrap();
        assert_eq!(json, "7");
    }
}
