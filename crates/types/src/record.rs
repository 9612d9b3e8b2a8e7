//! Per-name registry record.

use crate::{Amount, OwnerId, Timestamp};
use serde::{Deserialize, Serialize};

/// The registry's record for one name.
///
/// Records are created on first registration and never deleted:
/// expiry and deactivation retire them logically, and a later
/// re-registration overwrites them in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Current controlling principal; zero iff never registered.
    pub owner: OwnerId,
    /// Opaque locator the name resolves to (an IP address or similar).
    pub endpoint: String,
    /// Absolute expiry timestamp (seconds since UNIX_EPOCH).
    pub expires_at: Timestamp,
    /// False once deactivated (or before first registration).
    pub active: bool,
}

impl DomainRecord {
    /// A name is available for fresh registration when it has no
    /// live, unexpired registration.
    pub fn is_available(&self, now: Timestamp) -> bool {
        !self.active || now >= self.expires_at
    }

    /// A name resolves only while active and unexpired.
    pub fn is_resolvable(&self, now: Timestamp) -> bool {
        self.active && now < self.expires_at
    }

    /// Past the expiry deadline, regardless of the active flag.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    /// Whether any registration ever touched this record.
    pub fn ever_registered(&self) -> bool {
        !self.owner.is_zero()
    }
}

impl Default for DomainRecord {
    fn default() -> Self {
        Self {
            owner: OwnerId::ZERO,
            endpoint: String::new(),
            expires_at: 0,
            active: false,
        }
    }
}

/// Registry-wide mutable state persisted alongside the record table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryMeta {
    /// The single privileged principal, fixed at creation.
    pub admin: OwnerId,
    /// Current registration/renewal fee.
    pub fee: Amount,
    /// Accumulated fees not yet withdrawn.
    pub balance: Amount,
}
