//! Registry configuration.

use namereg_types::{Amount, DEFAULT_REGISTRATION_FEE, REGISTRATION_PERIOD_SECS};
use serde::{Deserialize, Serialize};

/// Tunables fixed at registry construction. The fee is only the
/// starting value; the admin can change it at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Initial registration/renewal fee in base currency units.
    #[serde(default = "default_fee")]
    pub registration_fee: Amount,
    /// Validity window granted per registration or renewal, in seconds.
    #[serde(default = "default_period")]
    pub registration_period_secs: u64,
}

fn default_fee() -> Amount {
    DEFAULT_REGISTRATION_FEE
}

fn default_period() -> u64 {
    REGISTRATION_PERIOD_SECS
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            registration_fee: default_fee(),
            registration_period_secs: default_period(),
        }
    }
}
