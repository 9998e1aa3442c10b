// # Memory State Store
//
// In-memory implementation of StateStore.
//
// ## Purpose
//
// Keeps generated entities for the lifetime of the process. Useful for tests
// and for one-shot runs where names only need to be stable within the run.
//
// ## Restart Behavior
//
// - All state is lost on exit
// - The next run treats every declared resource as new and generates fresh
//   names

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::model::GeneratedEntity;
use crate::traits::state_store::{StateRecord, StateStore, StateStoreFactory};

/// In-memory state store implementation
///
/// # Example
///
/// ```rust,no_run
/// use whimsy_core::catalog::Category;
/// use whimsy_core::model::{EntitySpec, GeneratedEntity, TriggerMap};
/// use whimsy_core::state::MemoryStateStore;
/// use whimsy_core::traits::StateStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryStateStore::new();
///     let spec = EntitySpec::single(Category::Plant, TriggerMap::new());
///     let entity = GeneratedEntity::new("fern", spec);
///
///     store.set_entity("whimsy_plant.server", &entity).await?;
///     assert_eq!(store.get_entity("whimsy_plant.server").await?, Some(entity));
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    inner: Arc<RwLock<BTreeMap<String, StateRecord>>>,
}

impl MemoryStateStore {
    /// Create a new empty memory state store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of records in the store
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get_entity(&self, address: &str) -> Result<Option<GeneratedEntity>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.get(address).map(|record| record.entity.clone()))
    }

    async fn get_record(&self, address: &str) -> Result<Option<StateRecord>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.get(address).cloned())
    }

    async fn set_entity(&self, address: &str, entity: &GeneratedEntity) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        let record = StateRecord::upsert(guard.remove(address), entity.clone());
        guard.insert(address.to_string(), record);
        Ok(())
    }

    async fn delete_record(&self, address: &str) -> Result<(), Error> {
        self.inner.write().await.remove(address);
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<String>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.keys().cloned().collect())
    }

    async fn flush(&self) -> Result<(), Error> {
        // Nothing to persist
        Ok(())
    }
}

/// Factory for `{"type": "memory"}` state stores
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStateStoreFactory;

#[async_trait]
impl StateStoreFactory for MemoryStateStoreFactory {
    async fn create(&self, _config: &serde_json::Value) -> Result<Box<dyn StateStore>, Error> {
        Ok(Box::new(MemoryStateStore::new()))
    }
}
