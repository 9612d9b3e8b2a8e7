//! Owner (principal) identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of an already-authenticated principal.
///
/// The registry never verifies credentials itself; an external
/// authentication collaborator resolves the raw credential into this
/// 32-byte identifier before any operation is invoked. The all-zero
/// identity is reserved: it marks a record that was never registered
/// and is rejected as a transfer target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub [u8; 32]);

impl OwnerId {
    /// The reserved "never registered" identity.
    pub const ZERO: OwnerId = OwnerId([0u8; 32]);

    /// Create from a byte array.
    pub fn new(id: [u8; 32]) -> Self {
        Self(id)
    }

    /// Get as a byte array.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether this is the reserved zero identity.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_identity_is_detected() {
        assert!(OwnerId::ZERO.is_zero());
        assert!(OwnerId::default().is_zero());
        assert!(!OwnerId::new([1u8; 32]).is_zero());
    }

    #[test]
    fn test_display_is_hex() {
        let id = OwnerId::new([0xab; 32]);
        assert_eq!(id.to_string(), "ab".repeat(32));
    }
}
