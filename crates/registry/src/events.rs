//! Event-sink collaborator.
//!
//! Every successful mutation emits exactly one [`RegistryEvent`],
//! delivered while the state lock is still held so the sink observes
//! events in serialization order.

use namereg_types::RegistryEvent;
use parking_lot::Mutex;

/// Durable recorder of registry events.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &RegistryEvent);
}

/// Default sink: structured log line per event.
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn record(&self, event: &RegistryEvent) {
        match event {
            RegistryEvent::DomainRegistered {
                name,
                owner,
                endpoint,
            } => {
                tracing::info!(%name, %owner, %endpoint, "domain registered");
            }
            RegistryEvent::DomainUpdated { name, new_endpoint } => {
                tracing::info!(%name, %new_endpoint, "domain updated");
            }
            RegistryEvent::DomainTransferred {
                name,
                old_owner,
                new_owner,
            } => {
                tracing::info!(%name, %old_owner, %new_owner, "domain transferred");
            }
            RegistryEvent::DomainRenewed {
                name,
                new_expires_at,
            } => {
                tracing::info!(%name, new_expires_at, "domain renewed");
            }
            RegistryEvent::DomainDeactivated { name } => {
                tracing::info!(%name, "domain deactivated");
            }
        }
    }
}

/// In-memory sink retaining events in order. Used by tests and by
/// callers that forward events to their own durable log.
#[derive(Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<RegistryEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, oldest first.
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.lock().clone()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<RegistryEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventSink for MemoryEventSink {
    fn record(&self, event: &RegistryEvent) {
        self.events.lock().push(event.clone());
    }
}
