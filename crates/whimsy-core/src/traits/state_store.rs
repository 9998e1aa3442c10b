// # State Store Trait
//
// Defines the interface for persisting generated names between runs.
//
// ## Purpose
//
// The state store is what makes names stable. It keeps, per resource address:
// - The generated entity (name, id, and the snapshot that produced it)
// - When the entity was first created and last written
//
// Without it every run would be a create, and every name would change.
//
// ## Implementations
//
// - `MemoryStateStore`: process lifetime only
// - `FileStateStore`: JSON file with atomic writes and backup recovery
//
// ## Usage
//
// ```rust,ignore
// use whimsy_core::StateStore;
//
// let store = /* StateStore implementation */;
//
// // Prior entity, if any
// let previous = store.get_entity("whimsy_plant.server").await?;
//
// // Persist after the engine decided what the entity is now
// store.set_entity("whimsy_plant.server", &entity).await?;
// ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::GeneratedEntity;

/// State record for one resource address
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StateRecord {
    /// The persisted entity
    pub entity: GeneratedEntity,
    /// When the address was first written
    pub created_at: DateTime<Utc>,
    /// When the address was last written
    pub last_updated: DateTime<Utc>,
}

impl StateRecord {
    /// Create a record for a newly stored entity
    pub(crate) fn new(entity: GeneratedEntity) -> Self {
        let now = Utc::now();
        Self {
            entity,
            created_at: now,
            last_updated: now,
        }
    }

    /// Replace the entity, keeping the creation time
    pub(crate) fn replaced(self, entity: GeneratedEntity) -> Self {
        Self {
            entity,
            created_at: self.created_at,
            last_updated: Utc::now(),
        }
    }

    /// Store `entity` over an optional existing record
    pub(crate) fn upsert(existing: Option<StateRecord>, entity: GeneratedEntity) -> Self {
        match existing {
            Some(record) => record.replaced(entity),
            None => Self::new(entity),
        }
    }
}

/// Trait for state store implementations
///
/// # Thread Safety
///
/// All methods must be safe to call concurrently from multiple tasks. The
/// engine never issues two operations for the same address at once, but
/// different addresses are processed independently.
///
/// # Responsibilities
///
/// A store persists and returns what it is given. It must not generate names,
/// compare snapshots, or decide whether a name changes; those belong to the
/// engine.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Get the persisted entity for an address
    ///
    /// # Returns
    ///
    /// - `Ok(Some(GeneratedEntity))`: The persisted entity
    /// - `Ok(None)`: Nothing stored at this address
    /// - `Err(Error)`: Storage error
    async fn get_entity(&self, address: &str) -> Result<Option<GeneratedEntity>, crate::Error>;

    /// Get the full state record for an address
    async fn get_record(&self, address: &str) -> Result<Option<StateRecord>, crate::Error>;

    /// Store an entity at an address
    ///
    /// Creates the record or replaces its entity, keeping the original
    /// creation time.
    async fn set_entity(&self, address: &str, entity: &GeneratedEntity) -> Result<(), crate::Error>;

    /// Delete the record at an address
    ///
    /// Deleting an absent address succeeds.
    async fn delete_record(&self, address: &str) -> Result<(), crate::Error>;

    /// List all stored addresses, sorted
    async fn list_records(&self) -> Result<Vec<String>, crate::Error>;

    /// Persist any pending changes
    async fn flush(&self) -> Result<(), crate::Error>;
}

/// Helper trait for constructing state stores from configuration
#[async_trait]
pub trait StateStoreFactory: Send + Sync {
    /// Create a StateStore instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: The serialized `StateStoreConfig` for this store
    async fn create(&self, config: &serde_json::Value) -> Result<Box<dyn StateStore>, crate::Error>;
}
