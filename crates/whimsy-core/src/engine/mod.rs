//! Core naming engine
//!
//! The NameEngine is responsible for:
//! - Loading the prior entity for an address from the StateStore
//! - Running the lifecycle transition against the NameSource
//! - Persisting the result
//! - Emitting events for monitoring
//!
//! ## Architecture
//!
//! ```text
//!                    address + EntitySpec
//!                             │
//!                             ▼
//!                    ┌──────────────┐
//!                    │  NameEngine  │
//!                    └──────────────┘
//!                             │
//!         ┌───────────────────┼───────────────────┐
//!         │                   │                   │
//!         ▼                   ▼                   ▼
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ StateStore  │     │  NameSource  │     │   Events    │
//! │ (load/save) │     │  (generate)  │     │  (notify)   │
//! └─────────────┘     └──────────────┘     └─────────────┘
//! ```
//!
//! ## Apply Flow
//!
//! 1. Load the prior entity for the address
//! 2. Compare the prior snapshot with the desired one
//! 3. Generate only on create or when the snapshot changed
//! 4. Persist the entity
//! 5. Emit event

use std::collections::BTreeSet;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::catalog::Category;
use crate::config::{EngineConfig, SingleSelection, WhimsyConfig};
use crate::error::Result;
use crate::lifecycle::{Lifecycle, LifecycleState, Transition, plan};
use crate::model::{EntitySpec, GeneratedEntity, TriggerMap};
use crate::registry::ResourceRegistry;
use crate::traits::{NameSource, StateStore};

/// Events emitted by the NameEngine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// First name generated for an address
    Created { address: String, name: String },

    /// Snapshot changed and a new name replaced the old one
    Regenerated {
        address: String,
        previous_name: String,
        name: String,
    },

    /// Snapshot unchanged, name kept
    Kept { address: String, name: String },

    /// Persisted entity read
    Read { address: String, name: String },

    /// Entity discarded
    Deleted { address: String, name: String },

    /// Operation failed for an address
    Failed { address: String, error: String },
}

/// Outcome of a single resource during reconcile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResourceOutcome {
    /// New name generated
    Created { address: String, name: String },
    /// Name replaced
    Regenerated {
        address: String,
        previous_name: String,
        name: String,
    },
    /// Name kept
    Kept { address: String, name: String },
    /// Persisted address no longer declared
    Deleted { address: String, name: String },
    /// The resource could not be applied
    Failed { address: String, error: String },
}

impl ResourceOutcome {
    /// Address the outcome refers to
    pub fn address(&self) -> &str {
        match self {
            ResourceOutcome::Created { address, .. }
            | ResourceOutcome::Regenerated { address, .. }
            | ResourceOutcome::Kept { address, .. }
            | ResourceOutcome::Deleted { address, .. }
            | ResourceOutcome::Failed { address, .. } => address,
        }
    }

    fn from_transition(address: &str, transition: &Transition) -> Self {
        let address = address.to_string();
        let name = transition.entity.name().to_string();
        match (&transition.state, &transition.previous_name) {
            (LifecycleState::Created, _) => ResourceOutcome::Created { address, name },
            (LifecycleState::Regenerated, Some(previous_name)) => ResourceOutcome::Regenerated {
                address,
                previous_name: previous_name.clone(),
                name,
            },
            _ => ResourceOutcome::Kept { address, name },
        }
    }
}

/// Result of a read-only lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupOutcome {
    /// Lookup name from the manifest
    pub lookup: String,
    /// Entity id (same as the name)
    pub id: String,
    /// Selected word
    pub name: String,
}

/// Summary of a reconcile pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Per-resource outcomes, declared resources first, then removals
    pub resources: Vec<ResourceOutcome>,
    /// Lookup results
    pub lookups: Vec<LookupOutcome>,
}

impl ReconcileReport {
    /// Whether any resource failed
    pub fn has_failures(&self) -> bool {
        self.failures() > 0
    }

    /// Number of failed resources
    pub fn failures(&self) -> usize {
        self.resources
            .iter()
            .filter(|outcome| matches!(outcome, ResourceOutcome::Failed { .. }))
            .count()
    }
}

/// Core naming engine
///
/// The engine owns the name source and the state store and turns declared
/// resources into persisted names.
///
/// ## Lifecycle
///
/// 1. Create with [`NameEngine::new()`]
/// 2. Call [`NameEngine::apply()`] per resource, or
///    [`NameEngine::reconcile()`] for a whole manifest
/// 3. Call [`NameEngine::flush()`] before exiting
///
/// ## Threading
///
/// All operations take `&self`; the engine can be shared across tasks.
/// Operations on the same address are not serialized against each other.
///
/// ## Load Resistance
///
/// - **Bounded event channel**: Prevents unbounded memory growth
/// - **Event dropping**: When the channel is full, new events are dropped (logged)
pub struct NameEngine {
    /// Name source for generating words
    source: Box<dyn NameSource>,

    /// State store for persisted entities
    state_store: Box<dyn StateStore>,

    /// Word selection for single-category resources
    single_selection: SingleSelection,

    /// Event sender for external monitoring
    event_tx: mpsc::Sender<EngineEvent>,
}

impl NameEngine {
    /// Create a new naming engine
    ///
    /// # Parameters
    ///
    /// - `source`: Name source implementation
    /// - `state_store`: State store implementation
    /// - `config`: Engine configuration
    ///
    /// # Returns
    ///
    /// A tuple of (engine, event_receiver) where event_receiver yields engine events
    pub fn new(
        source: Box<dyn NameSource>,
        state_store: Box<dyn StateStore>,
        config: EngineConfig,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(config.event_channel_capacity);

        let engine = Self {
            source,
            state_store,
            single_selection: config.single_selection,
            event_tx: tx,
        };

        Ok((engine, rx))
    }

    fn lifecycle(&self) -> Lifecycle<'_> {
        Lifecycle::new(self.source.as_ref(), self.single_selection)
    }

    /// Create or update the entity at an address
    ///
    /// # Parameters
    ///
    /// - `address`: State address, e.g. `whimsy_plant.server`
    /// - `desired`: Snapshot the entity should have after the call
    ///
    /// # Returns
    ///
    /// - `Ok(Transition)`: The persisted entity and the state it reached
    /// - `Err(Error)`: Generation or persistence failed; nothing is written
    pub async fn apply(&self, address: &str, desired: EntitySpec) -> Result<Transition> {
        match self.apply_inner(address, desired).await {
            Ok(transition) => Ok(transition),
            Err(e) => {
                error!("Failed to apply {}: {}", address, e);
                self.emit_event(EngineEvent::Failed {
                    address: address.to_string(),
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn apply_inner(&self, address: &str, desired: EntitySpec) -> Result<Transition> {
        let previous = self.state_store.get_entity(address).await?;
        debug!("{}: {:?}", address, plan(previous.as_ref(), &desired));
        let transition = self.lifecycle().apply(previous, desired)?;

        self.state_store
            .set_entity(address, &transition.entity)
            .await?;

        let name = transition.entity.name().to_string();
        match (&transition.state, &transition.previous_name) {
            (LifecycleState::Created, _) => {
                info!("Created {} -> {}", address, name);
                self.emit_event(EngineEvent::Created {
                    address: address.to_string(),
                    name,
                });
            }
            (LifecycleState::Regenerated, Some(previous_name)) => {
                info!("Regenerated {}: {} -> {}", address, previous_name, name);
                self.emit_event(EngineEvent::Regenerated {
                    address: address.to_string(),
                    previous_name: previous_name.clone(),
                    name,
                });
            }
            _ => {
                debug!("{} unchanged, keeping {}", address, name);
                self.emit_event(EngineEvent::Kept {
                    address: address.to_string(),
                    name,
                });
            }
        }

        Ok(transition)
    }

    /// Read the persisted entity at an address
    ///
    /// Never generates.
    pub async fn read(&self, address: &str) -> Result<Option<GeneratedEntity>> {
        let Some(persisted) = self.state_store.get_entity(address).await? else {
            debug!("No entity persisted at {}", address);
            return Ok(None);
        };

        let entity = self.lifecycle().read(&persisted);
        self.emit_event(EngineEvent::Read {
            address: address.to_string(),
            name: entity.name().to_string(),
        });
        Ok(Some(entity))
    }

    /// Discard the entity at an address
    ///
    /// # Returns
    ///
    /// The discarded entity, or `None` when nothing was persisted
    pub async fn destroy(&self, address: &str) -> Result<Option<GeneratedEntity>> {
        let Some(persisted) = self.state_store.get_entity(address).await? else {
            debug!("Nothing to destroy at {}", address);
            return Ok(None);
        };

        self.state_store.delete_record(address).await?;

        let transition = self.lifecycle().delete(persisted);
        let name = transition.entity.name().to_string();
        info!("Deleted {} ({})", address, name);
        self.emit_event(EngineEvent::Deleted {
            address: address.to_string(),
            name,
        });
        Ok(Some(transition.entity))
    }

    /// Destroy every persisted entity
    ///
    /// # Returns
    ///
    /// Discarded entities with their addresses, sorted by address
    pub async fn destroy_all(&self) -> Result<Vec<(String, GeneratedEntity)>> {
        let mut destroyed = Vec::new();
        for address in self.state_store.list_records().await? {
            if let Some(entity) = self.destroy(&address).await? {
                destroyed.push((address, entity));
            }
        }
        Ok(destroyed)
    }

    /// Deterministic lookup; nothing is persisted
    ///
    /// # Parameters
    ///
    /// - `category`: Category tag (`plant`, `animal` or `color`)
    /// - `triggers`: Key for the selection
    ///
    /// # Returns
    ///
    /// An entity whose id and name are the selected word
    pub fn lookup(&self, category: &str, triggers: &TriggerMap) -> Result<GeneratedEntity> {
        let category: Category = category.parse()?;
        let name = self.source.generate_single(category, triggers)?;
        Ok(GeneratedEntity::new(
            name,
            EntitySpec::single(category, triggers.clone()),
        ))
    }

    /// Bring persisted state in line with a manifest
    ///
    /// Every declared resource is applied; persisted addresses that are no
    /// longer declared are destroyed. A failing resource is recorded in the
    /// report and the pass continues with the next one.
    ///
    /// # Returns
    ///
    /// - `Ok(ReconcileReport)`: Per-resource outcomes and lookup results
    /// - `Err(Error)`: The manifest is invalid, a lookup failed, or the store
    ///   failed outside a single resource. Lookups run first, so a failing
    ///   lookup leaves state untouched.
    pub async fn reconcile(
        &self,
        manifest: &WhimsyConfig,
        registry: &ResourceRegistry,
    ) -> Result<ReconcileReport> {
        manifest.validate()?;

        let mut report = ReconcileReport::default();

        // Lookups touch no state, so a failing one stops the pass before any write
        for lookup in &manifest.lookups {
            let entity = self.lookup(&lookup.category, &lookup.triggers)?;
            report.lookups.push(LookupOutcome {
                lookup: lookup.name.clone(),
                id: entity.id().to_string(),
                name: entity.name().to_string(),
            });
        }

        let mut declared = BTreeSet::new();

        for resource in &manifest.resources {
            let address = resource.address();
            declared.insert(address.clone());

            let outcome = match registry.resolve(resource) {
                Ok(spec) => match self.apply(&address, spec).await {
                    Ok(transition) => ResourceOutcome::from_transition(&address, &transition),
                    Err(e) => ResourceOutcome::Failed {
                        address,
                        error: e.to_string(),
                    },
                },
                Err(e) => {
                    warn!("Skipping {}: {}", address, e);
                    self.emit_event(EngineEvent::Failed {
                        address: address.clone(),
                        error: e.to_string(),
                    });
                    ResourceOutcome::Failed {
                        address,
                        error: e.to_string(),
                    }
                }
            };
            report.resources.push(outcome);
        }

        for address in self.state_store.list_records().await? {
            if declared.contains(&address) {
                continue;
            }
            match self.destroy(&address).await {
                Ok(Some(entity)) => report.resources.push(ResourceOutcome::Deleted {
                    address,
                    name: entity.name().to_string(),
                }),
                Ok(None) => {}
                Err(e) => {
                    error!("Failed to destroy {}: {}", address, e);
                    report.resources.push(ResourceOutcome::Failed {
                        address,
                        error: e.to_string(),
                    });
                }
            }
        }

        self.flush().await?;

        info!(
            "Reconciled {} resources ({} failed), {} lookups",
            report.resources.len(),
            report.failures(),
            report.lookups.len()
        );
        Ok(report)
    }

    /// Persist any buffered state
    pub async fn flush(&self) -> Result<()> {
        self.state_store.flush().await
    }

    /// Name of the configured name source
    pub fn source_name(&self) -> &'static str {
        self.source.source_name()
    }

    /// Emit an engine event
    ///
    /// # Parameters
    ///
    /// - `event`: The event to emit
    fn emit_event(&self, event: EngineEvent) {
        if self.event_tx.try_send(event).is_err() {
            // Full or closed: the event is dropped
            warn!(
                "Event channel full, dropping event. Consider increasing event_channel_capacity."
            );
        }
    }
}
