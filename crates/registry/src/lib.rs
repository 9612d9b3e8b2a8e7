//! Name registration and resolution registry.
//!
//! Maps human-chosen names to endpoint records with unique,
//! time-bounded ownership. Ownership can be transferred, renewed, and
//! deactivated; expired and deactivated names become available for
//! re-registration by anyone. Callers arrive already authenticated;
//! an external settlement gateway confirms admin withdrawals; every
//! successful mutation is emitted to an event sink in serialization
//! order.

pub mod config;
pub mod errors;
pub mod events;
pub mod registry;
pub mod resolver;
pub mod settlement;

pub use config::RegistryConfig;
pub use errors::{ErrorKind, RegistryError, Result};
pub use events::{EventSink, MemoryEventSink, TracingEventSink};
pub use registry::DomainRegistry;
pub use resolver::EndpointResolver;
pub use settlement::{AcceptingGateway, SettlementGateway};
