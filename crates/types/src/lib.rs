//! Core domain types for the name registry.
//!
//! These types are shared between the registry state machine and the
//! persistence layer: domain names, owner identities, the per-name
//! record, and the events emitted by every successful mutation.

pub mod event;
pub mod name;
pub mod owner;
pub mod record;
pub mod units;

pub use event::*;
pub use name::*;
pub use owner::*;
pub use record::*;
pub use units::*;
