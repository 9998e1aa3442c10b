//! Plugin-based resource registry
//!
//! The registry maps resource type names to the kind of entity they produce,
//! and state store type names to factories, so the engine never branches on
//! type strings itself.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use whimsy_core::config::StateStoreConfig;
//! use whimsy_core::model::EntityKind;
//! use whimsy_core::registry::ResourceRegistry;
//!
//! # async fn run() -> whimsy_core::Result<()> {
//! let registry = ResourceRegistry::with_builtins();
//!
//! assert_eq!(registry.resolve_kind("whimsy_name")?, EntityKind::Compound);
//!
//! let store = registry.create_state_store(&StateStoreConfig::Memory).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Registration
//!
//! Additional resource types register against an existing kind:
//!
//! ```rust,no_run
//! # use whimsy_core::catalog::Category;
//! # use whimsy_core::model::EntityKind;
//! # use whimsy_core::registry::ResourceRegistry;
//! let registry = ResourceRegistry::with_builtins();
//! registry.register_resource("whimsy_tree", EntityKind::Single(Category::Plant));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::catalog::Category;
use crate::config::{ResourceConfig, StateStoreConfig};
use crate::error::{Error, Result};
use crate::model::{EntityKind, EntitySpec};
use crate::state::{FileStateStoreFactory, MemoryStateStoreFactory};
use crate::traits::{StateStore, StateStoreFactory};

/// Built-in resource types
pub const BUILTIN_RESOURCES: [(&str, EntityKind); 4] = [
    ("whimsy_plant", EntityKind::Single(Category::Plant)),
    ("whimsy_animal", EntityKind::Single(Category::Animal)),
    ("whimsy_color", EntityKind::Single(Category::Color)),
    ("whimsy_name", EntityKind::Compound),
];

/// Registry of resource types and state store factories
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct ResourceRegistry {
    /// Resource type name -> entity kind
    resources: RwLock<HashMap<String, EntityKind>>,

    /// Registered state store factories
    state_stores: RwLock<HashMap<String, Arc<dyn StateStoreFactory>>>,
}

impl ResourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in resource types and the `file` and
    /// `memory` state stores
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for (name, kind) in BUILTIN_RESOURCES {
            registry.register_resource(name, kind);
        }
        registry.register_state_store("file", Box::new(FileStateStoreFactory));
        registry.register_state_store("memory", Box::new(MemoryStateStoreFactory));
        registry
    }

    /// Register a resource type
    ///
    /// # Parameters
    ///
    /// - `name`: Resource type name (e.g., "whimsy_plant")
    /// - `kind`: Kind of entity the type produces
    pub fn register_resource(&self, name: impl Into<String>, kind: EntityKind) {
        let mut resources = self
            .resources
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        resources.insert(name.into(), kind);
    }

    /// Register a state store factory
    ///
    /// # Parameters
    ///
    /// - `name`: State store type name (e.g., "file", "memory")
    /// - `factory`: Factory object for creating state store instances
    pub fn register_state_store(
        &self,
        name: impl Into<String>,
        factory: Box<dyn StateStoreFactory>,
    ) {
        let mut stores = self
            .state_stores
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        stores.insert(name.into(), Arc::from(factory));
    }

    /// Resolve a resource type name
    ///
    /// # Returns
    ///
    /// - `Ok(EntityKind)`: Kind of entity the type produces
    /// - `Err(Error::Config)`: If the type is not registered
    pub fn resolve_kind(&self, resource_type: &str) -> Result<EntityKind> {
        let resources = self
            .resources
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        resources
            .get(resource_type)
            .copied()
            .ok_or_else(|| Error::config(format!("Unknown resource type: {}", resource_type)))
    }

    /// Resolve a resource declaration into a snapshot
    ///
    /// # Parameters
    ///
    /// - `resource`: Resource declaration from the manifest
    ///
    /// # Returns
    ///
    /// - `Ok(EntitySpec)`: Snapshot with defaults filled in
    /// - `Err(Error)`: If the type is unknown or the declaration is invalid
    pub fn resolve(&self, resource: &ResourceConfig) -> Result<EntitySpec> {
        let kind = self.resolve_kind(&resource.resource_type)?;
        resource.to_spec(kind)
    }

    /// Create a state store from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: State store configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn StateStore>)`: Created state store instance
    /// - `Err(Error)`: If store type is not registered or creation fails
    pub async fn create_state_store(
        &self,
        config: &StateStoreConfig,
    ) -> Result<Box<dyn StateStore>> {
        let store_type = config.type_name();

        let factory = {
            let stores = self
                .state_stores
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            stores
                .get(store_type)
                .ok_or_else(|| Error::config(format!("Unknown state store type: {}", store_type)))?
                .clone()
        };

        let config_json = serde_json::to_value(config)?;
        factory.create(&config_json).await
    }

    /// List all registered resource types, sorted
    pub fn list_resources(&self) -> Vec<String> {
        let resources = self
            .resources
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = resources.keys().cloned().collect();
        names.sort();
        names
    }

    /// List all registered state store types, sorted
    pub fn list_state_stores(&self) -> Vec<String> {
        let stores = self
            .state_stores
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = stores.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a resource type is registered
    pub fn has_resource(&self, name: &str) -> bool {
        self.resources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}
