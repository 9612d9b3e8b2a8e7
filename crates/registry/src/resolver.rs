//! Cached endpoint resolution service.

use crate::errors::*;
use crate::registry::DomainRegistry;
use namereg_types::{DomainName, Timestamp};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::time::{timeout, Duration};

/// Read-side resolution front for the registry.
///
/// Resolves names to endpoints against the wall clock, with a TTL
/// cache and a lookup timeout. Cached entries may lag a concurrent
/// update or transfer by up to the TTL; callers needing the exact
/// current endpoint should query the registry directly.
#[derive(Clone)]
pub struct EndpointResolver {
    registry: Arc<DomainRegistry>,
    cache: Arc<RwLock<HashMap<DomainName, (String, Timestamp)>>>,
    cache_ttl: Duration,
    lookup_timeout: Duration,
}

impl EndpointResolver {
    pub fn new(registry: Arc<DomainRegistry>) -> Self {
        Self {
            registry,
            cache: Arc::new(RwLock::new(HashMap::new())),
            cache_ttl: Duration::from_secs(300),
            lookup_timeout: Duration::from_secs(5),
        }
    }

    /// Resolve a name to its endpoint, serving from cache when fresh.
    pub async fn resolve(&self, name: &DomainName) -> Result<String> {
        if let Some((endpoint, cached_at)) = self.get_from_cache(name) {
            if self.is_cache_valid(cached_at) {
                tracing::debug!(%name, "cache hit");
                return Ok(endpoint);
            }
        }

        let registry = self.registry.clone();
        let lookup = {
            let name = name.clone();
            async move { registry.resolve_domain(&name, wall_now()) }
        };

        match timeout(self.lookup_timeout, lookup).await {
            Ok(Ok(endpoint)) => {
                self.store_in_cache(name, &endpoint);
                Ok(endpoint)
            }
            Ok(Err(err)) => Err(err),
            Err(_) => Err(RegistryError::ResolutionTimeout { name: name.clone() }),
        }
    }

    /// Resolve several names concurrently; one result per name.
    pub async fn resolve_batch(&self, names: &[DomainName]) -> HashMap<DomainName, Result<String>> {
        let mut futures = Vec::with_capacity(names.len());
        for name in names {
            let resolver = self.clone();
            let name = name.clone();
            futures.push(async move {
                let result = resolver.resolve(&name).await;
                (name, result)
            });
        }

        futures::future::join_all(futures).await.into_iter().collect()
    }

    /// Drop every cached entry.
    pub fn clear_cache(&self) {
        self.cache.write().clear();
    }

    /// Current cache size and TTL.
    pub fn cache_stats(&self) -> (usize, Duration) {
        (self.cache.read().len(), self.cache_ttl)
    }

    fn get_from_cache(&self, name: &DomainName) -> Option<(String, Timestamp)> {
        self.cache.read().get(name).cloned()
    }

    fn store_in_cache(&self, name: &DomainName, endpoint: &str) {
        self.cache
            .write()
            .insert(name.clone(), (endpoint.to_string(), wall_now()));
    }

    fn is_cache_valid(&self, cached_at: Timestamp) -> bool {
        wall_now().saturating_sub(cached_at) < self.cache_ttl.as_secs()
    }
}

fn wall_now() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
