//! Events emitted by successful registry mutations.

use crate::{DomainName, OwnerId, Timestamp};
use serde::{Deserialize, Serialize};

/// One event per successful mutating operation, emitted in
/// serialization order. Pure queries emit nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistryEvent {
    DomainRegistered {
        name: DomainName,
        owner: OwnerId,
        endpoint: String,
    },
    DomainUpdated {
        name: DomainName,
        new_endpoint: String,
    },
    DomainTransferred {
        name: DomainName,
        old_owner: OwnerId,
        new_owner: OwnerId,
    },
    DomainRenewed {
        name: DomainName,
        new_expires_at: Timestamp,
    },
    DomainDeactivated {
        name: DomainName,
    },
}

impl RegistryEvent {
    /// The name this event concerns.
    pub fn name(&self) -> &DomainName {
        match self {
            RegistryEvent::DomainRegistered { name, .. }
            | RegistryEvent::DomainUpdated { name, .. }
            | RegistryEvent::DomainTransferred { name, .. }
            | RegistryEvent::DomainRenewed { name, .. }
            | RegistryEvent::DomainDeactivated { name } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_serialize_with_kind_tag() {
        let event = RegistryEvent::DomainDeactivated {
            name: DomainName::new("test.eth"),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"domain_deactivated\""));
        let back: RegistryEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
