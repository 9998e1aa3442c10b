// # whimsy-core
//
// Core library for whimsical resource names.
//
// ## Architecture Overview
//
// - **Catalog**: Three fixed, disjoint word sets (plant, animal, color)
// - **Selector**: Deterministic word choice keyed by category and triggers
// - **Compound**: Random multi-word names with optional category shuffle
// - **Lifecycle**: Pure create / keep / regenerate / delete decisions
// - **NameEngine**: Async orchestrator that persists entities in a StateStore
// - **ResourceRegistry**: Resource type names and state store factories
//
// ## Quick Start
//
// ```rust,no_run
// use whimsy_core::generate::{generate_compound, generate_single};
// use whimsy_core::model::TriggerMap;
//
// let server = generate_single("plant", &TriggerMap::from([("env", "prod")]))?;
// let bucket = generate_compound(&["color", "animal"], "-", false)?;
// # Ok::<(), whimsy_core::Error>(())
// ```

pub mod catalog;
pub mod compound;
pub mod config;
pub mod engine;
pub mod error;
pub mod generate;
pub mod lifecycle;
pub mod model;
pub mod registry;
pub mod rng;
pub mod selector;
pub mod state;
pub mod traits;

// Re-export core types for convenience
pub use catalog::{Catalog, Category, WordSet};
pub use config::{EngineConfig, SingleSelection, StateStoreConfig, WhimsyConfig};
pub use engine::{EngineEvent, NameEngine, ReconcileReport};
pub use error::{Error, Result};
pub use generate::CatalogSource;
pub use lifecycle::should_regenerate;
pub use model::{EntityKind, EntitySpec, GeneratedEntity, NameConfig, TriggerMap};
pub use registry::ResourceRegistry;
pub use state::{FileStateStore, MemoryStateStore};
pub use traits::{NameSource, StateStore};
