//! Scalar aliases and protocol constants.

/// Seconds since UNIX_EPOCH. All registry operations take time as an
/// explicit parameter so the state machine stays deterministic.
pub type Timestamp = u64;

/// Fee and balance amounts, in the smallest unit of the payment
/// collaborator's currency (18-decimal token base units).
pub type Amount = u128;

/// How long a registration stays valid from the moment it is
/// registered or renewed: 365 days.
pub const REGISTRATION_PERIOD_SECS: u64 = 31_536_000;

/// Default registration fee: 0.01 of an 18-decimal unit.
pub const DEFAULT_REGISTRATION_FEE: Amount = 10_000_000_000_000_000;
