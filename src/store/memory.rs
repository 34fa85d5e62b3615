use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::repository::{Store, Visitor};
use super::types::{Id, Payload, Result, StoreError};

/// Volatile, process-local store backed by a concurrent map.
///
/// Contents vanish when the last clone is dropped. Clones share the same map,
/// so a `MemoryStore` can be handed to several servers or tasks at once.
///
/// `list` and `for_each` work on a point-in-time copy: writes that land while
/// a visit is in progress (including writes made by the visitor itself) are
/// not observed by that visit.
///
/// Writers hold the gate shared and run concurrently on the map. A copy holds
/// it exclusively, so it reflects a single instant between writes.
pub struct MemoryStore<V> {
    data: Arc<DashMap<Id, V>>,
    gate: Arc<RwLock<()>>,
}

impl<V: Payload> MemoryStore<V> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
            gate: Arc::new(RwLock::new(())),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    async fn snapshot(&self) -> Vec<(Id, V)> {
        let _exclusive = self.gate.write().await;
        self.data
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl<V: Payload> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for MemoryStore<V> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            gate: self.gate.clone(),
        }
    }
}

#[async_trait]
impl<V: Payload> Store<V> for MemoryStore<V> {
    async fn put(&self, id: Id, payload: V) -> Result<()> {
        tracing::debug!("MemoryStore: put {}", id);
        let _shared = self.gate.read().await;
        self.data.insert(id, payload);
        Ok(())
    }

    async fn get(&self, id: &Id) -> Result<V> {
        self.data
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn list(&self) -> Result<Vec<Id>> {
        let _exclusive = self.gate.write().await;
        Ok(self.data.iter().map(|entry| entry.key().clone()).collect())
    }

    async fn for_each(&self, visitor: &mut Visitor<'_, V>) -> Result<()> {
        // The gate and the shard locks are released before the visitor runs.
        for (id, payload) in self.snapshot().await {
            visitor(&id, &payload)?;
        }
        Ok(())
    }

    async fn delete(&self, id: &Id) -> Result<()> {
        let removed = {
            let _shared = self.gate.read().await;
            self.data.remove(id)
        };
        if removed.is_some() {
            tracing::debug!("MemoryStore: deleted {}", id);
        }
        Ok(())
    }
}
