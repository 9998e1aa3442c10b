//! Regeneration state machine
//!
//! Per entity:
//!
//! ```text
//! (absent)        --create-->                     Created
//! Created|Stable  --update, snapshot unchanged--> Stable
//! Created|Stable  --update, snapshot changed-->   Regenerated --persist--> Stable
//! any             --delete-->                     Deleted
//! ```
//!
//! Everything here is a pure transformation `(previous, desired) -> next`.
//! Persisting the result is the caller's job; nothing in this module keeps
//! state between calls.

use crate::config::SingleSelection;
use crate::error::Result;
use crate::model::{EntitySpec, GeneratedEntity};
use crate::traits::NameSource;

/// Lifecycle state of an entity after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// First generation
    Created,
    /// Name unchanged
    Stable,
    /// Name replaced; becomes `Stable` once persisted
    Regenerated,
    /// Discarded
    Deleted,
}

/// Decision for an apply, before any generation work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// No prior entity: generate
    Create,
    /// Snapshots match: echo the prior name
    Keep,
    /// Snapshots differ: generate a new name
    Regenerate,
}

/// Result of a create or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State the entity is in after the operation
    pub state: LifecycleState,
    /// The entity to persist
    pub entity: GeneratedEntity,
    /// Name before a regeneration
    pub previous_name: Option<String>,
}

impl Transition {
    /// Whether a new name was generated
    pub fn generated(&self) -> bool {
        matches!(
            self.state,
            LifecycleState::Created | LifecycleState::Regenerated
        )
    }
}

/// Whether moving from `old` to `new` requires a new name
///
/// - Single-category: the trigger maps differ in any key or value.
/// - Compound: categories (order-sensitive), delimiter, shuffle flag or
///   trigger maps differ.
/// - A change of entity kind or of single category always regenerates.
pub fn should_regenerate(old: &EntitySpec, new: &EntitySpec) -> bool {
    match (old, new) {
        (
            EntitySpec::Single {
                category: old_category,
                triggers: old_triggers,
            },
            EntitySpec::Single {
                category: new_category,
                triggers: new_triggers,
            },
        ) => old_category != new_category || old_triggers != new_triggers,
        (
            EntitySpec::Compound {
                config: old_config,
                triggers: old_triggers,
            },
            EntitySpec::Compound {
                config: new_config,
                triggers: new_triggers,
            },
        ) => {
            old_config.categories != new_config.categories
                || old_config.delimiter != new_config.delimiter
                || old_config.shuffle != new_config.shuffle
                || old_triggers != new_triggers
        }
        _ => true,
    }
}

/// Decide what an apply must do
pub fn plan(previous: Option<&GeneratedEntity>, desired: &EntitySpec) -> Plan {
    match previous {
        None => Plan::Create,
        Some(entity) if should_regenerate(entity.spec(), desired) => Plan::Regenerate,
        Some(_) => Plan::Keep,
    }
}

/// Executes lifecycle transitions against a name source
pub struct Lifecycle<'a> {
    source: &'a dyn NameSource,
    selection: SingleSelection,
}

impl<'a> Lifecycle<'a> {
    /// Create a lifecycle over a name source
    pub fn new(source: &'a dyn NameSource, selection: SingleSelection) -> Self {
        Self { source, selection }
    }

    /// Generate a name for a spec
    ///
    /// Single-category names follow the configured selection; compound names
    /// are always random.
    pub fn generate(&self, spec: &EntitySpec) -> Result<String> {
        match spec {
            EntitySpec::Single { category, triggers } => match self.selection {
                SingleSelection::Keyed => self.source.generate_single(*category, triggers),
                SingleSelection::Random => self.source.generate_single_random(*category),
            },
            EntitySpec::Compound { config, .. } => self.source.generate_compound(config),
        }
    }

    /// `(absent) -> Created`
    pub fn create(&self, desired: EntitySpec) -> Result<Transition> {
        let name = self.generate(&desired)?;
        Ok(Transition {
            state: LifecycleState::Created,
            entity: GeneratedEntity::new(name, desired),
            previous_name: None,
        })
    }

    /// `Created/Stable -> Stable` or `Created/Stable -> Regenerated`
    pub fn update(&self, previous: GeneratedEntity, desired: EntitySpec) -> Result<Transition> {
        if plan(Some(&previous), &desired) == Plan::Keep {
            return Ok(Transition {
                state: LifecycleState::Stable,
                entity: previous.with_spec(desired),
                previous_name: None,
            });
        }

        let name = self.generate(&desired)?;
        Ok(Transition {
            state: LifecycleState::Regenerated,
            entity: GeneratedEntity::new(name, desired),
            previous_name: Some(previous.name().to_string()),
        })
    }

    /// Create when absent, update otherwise
    pub fn apply(
        &self,
        previous: Option<GeneratedEntity>,
        desired: EntitySpec,
    ) -> Result<Transition> {
        match previous {
            None => self.create(desired),
            Some(previous) => self.update(previous, desired),
        }
    }

    /// Reads never regenerate
    pub fn read(&self, persisted: &GeneratedEntity) -> GeneratedEntity {
        persisted.clone()
    }

    /// `any -> Deleted`; no generation work
    pub fn delete(&self, persisted: GeneratedEntity) -> Transition {
        Transition {
            state: LifecycleState::Deleted,
            entity: persisted,
            previous_name: None,
        }
    }
}
