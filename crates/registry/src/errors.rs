//! Error types for the name registry.

use namereg_types::{Amount, DomainName};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Domain name must not be empty")]
    EmptyName,

    #[error("Endpoint must not be empty for domain {name}")]
    EmptyEndpoint { name: DomainName },

    #[error("New owner for domain {name} is not a valid identity")]
    InvalidNewOwner { name: DomainName },

    #[error("Domain {name} already belongs to the caller")]
    SelfTransfer { name: DomainName },

    #[error("Caller is not the owner of domain {name}")]
    NotOwner { name: DomainName },

    #[error("Caller is not the registry admin")]
    NotAdmin,

    #[error("Domain {name} is already registered and unexpired")]
    AlreadyRegistered { name: DomainName },

    #[error("Domain {name} is not active")]
    Inactive { name: DomainName },

    #[error("Domain {name} has expired")]
    Expired { name: DomainName },

    #[error("Insufficient fee: required {required}, paid {paid}")]
    InsufficientFee { required: Amount, paid: Amount },

    #[error("Domain not found: {name}")]
    NotFound { name: DomainName },

    #[error("Resolution timed out for domain {name}")]
    ResolutionTimeout { name: DomainName },

    #[error("Registry storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("Settlement failed: {0}")]
    Settlement(#[source] anyhow::Error),
}

/// Coarse failure classification, one kind per taxonomy bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed caller input (empty name/endpoint, bad transfer target).
    Validation,
    /// Caller lacks ownership or admin rights.
    Authorization,
    /// The domain's lifecycle state rejects the operation.
    State,
    /// Absent or deactivated domain on resolution.
    NotFound,
    /// Resolver gave up waiting.
    Timeout,
    /// Persistence collaborator failed.
    Storage,
    /// Payout collaborator refused the withdrawal.
    Settlement,
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::EmptyName
            | RegistryError::EmptyEndpoint { .. }
            | RegistryError::InvalidNewOwner { .. }
            | RegistryError::SelfTransfer { .. } => ErrorKind::Validation,
            RegistryError::NotOwner { .. } | RegistryError::NotAdmin => ErrorKind::Authorization,
            RegistryError::AlreadyRegistered { .. }
            | RegistryError::Inactive { .. }
            | RegistryError::Expired { .. }
            | RegistryError::InsufficientFee { .. } => ErrorKind::State,
            RegistryError::NotFound { .. } => ErrorKind::NotFound,
            RegistryError::ResolutionTimeout { .. } => ErrorKind::Timeout,
            RegistryError::Storage(_) => ErrorKind::Storage,
            RegistryError::Settlement(_) => ErrorKind::Settlement,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
