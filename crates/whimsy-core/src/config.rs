//! Configuration types for the whimsy system
//!
//! A [`WhimsyConfig`] is the declared manifest: where state lives, how the
//! engine behaves, and which resources and lookups exist.
//!
//! ```json
//! {
//!   "state_store": { "type": "file", "path": "/var/lib/whimsy/state.json" },
//!   "resources": [
//!     { "type": "whimsy_plant", "name": "server", "triggers": { "env": "prod" } },
//!     { "type": "whimsy_name", "name": "bucket", "parts": ["color", "plant"], "delimiter": "_" }
//!   ],
//!   "lookups": [
//!     { "category": "animal", "name": "mascot", "triggers": { "team": "infra" } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::Category;
use crate::model::{DEFAULT_DELIMITER, EntityKind, EntitySpec, NameConfig, TriggerMap};

/// Declared manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhimsyConfig {
    /// State store configuration
    #[serde(default)]
    pub state_store: StateStoreConfig,

    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Stateful resources
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,

    /// Read-only keyed lookups
    #[serde(default)]
    pub lookups: Vec<LookupConfig>,
}

impl WhimsyConfig {
    /// Create an empty configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON manifest
    pub fn from_json(json: &str) -> Result<Self, crate::Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a resource
    pub fn with_resource(mut self, resource: ResourceConfig) -> Self {
        self.resources.push(resource);
        self
    }

    /// Add a lookup
    pub fn with_lookup(mut self, lookup: LookupConfig) -> Self {
        self.lookups.push(lookup);
        self
    }

    /// Validate the configuration
    ///
    /// Resource types are resolved later by the registry; this checks
    /// everything that does not need it.
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.state_store.validate()?;
        self.engine.validate()?;

        let mut addresses = HashSet::new();
        for resource in &self.resources {
            resource.validate()?;
            if !addresses.insert(resource.address()) {
                return Err(crate::Error::config(format!(
                    "Duplicate resource address: {}",
                    resource.address()
                )));
            }
        }

        let mut lookup_names = HashSet::new();
        for lookup in &self.lookups {
            lookup.validate()?;
            if !lookup_names.insert(lookup.name.as_str()) {
                return Err(crate::Error::config(format!(
                    "Duplicate lookup name: {}",
                    lookup.name
                )));
            }
        }

        Ok(())
    }
}

/// State store configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateStoreConfig {
    /// File-based state store
    File {
        /// Path to the state file
        path: String,
    },

    /// In-memory state store (not persistent)
    #[default]
    Memory,
}

impl StateStoreConfig {
    /// Registry name of the store type
    pub fn type_name(&self) -> &'static str {
        match self {
            StateStoreConfig::File { .. } => "file",
            StateStoreConfig::Memory => "memory",
        }
    }

    /// Validate the state store configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            StateStoreConfig::File { path } if path.is_empty() => {
                Err(crate::Error::config("File state store path cannot be empty"))
            }
            _ => Ok(()),
        }
    }
}

/// How stateful single-category resources pick their word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SingleSelection {
    /// Keyed by category and triggers: the same triggers give the same word
    #[default]
    Keyed,
    /// Cryptographically random on every generation
    Random,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Word selection for single-category resources
    #[serde(default)]
    pub single_selection: SingleSelection,

    /// Capacity of the engine event channel
    ///
    /// When full, new events are dropped with a warning.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl EngineConfig {
    /// Validate the engine configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.event_channel_capacity == 0 {
            return Err(crate::Error::config("Event channel capacity must be > 0"));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            single_selection: SingleSelection::default(),
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

fn default_event_channel_capacity() -> usize {
    1000
}

/// A declared stateful resource
///
/// `parts`, `delimiter` and `random` apply to `whimsy_name` resources only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Resource type, e.g. `whimsy_plant` or `whimsy_name`
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Resource name, unique per type
    pub name: String,

    /// Values that force a new name when they change
    #[serde(default)]
    pub triggers: TriggerMap,

    /// Categories to combine; defaults to `["color", "animal"]`
    #[serde(default, alias = "categories", skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<String>>,

    /// Separator between words; defaults to `-`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,

    /// Shuffle the categories; defaults to `false`
    #[serde(default, alias = "shuffle", skip_serializing_if = "Option::is_none")]
    pub random: Option<bool>,
}

impl ResourceConfig {
    /// Create a resource declaration
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            triggers: TriggerMap::new(),
            parts: None,
            delimiter: None,
            random: None,
        }
    }

    /// Set the triggers
    pub fn with_triggers(mut self, triggers: impl Into<TriggerMap>) -> Self {
        self.triggers = triggers.into();
        self
    }

    /// Set the compound parts
    pub fn with_parts<S: Into<String>>(mut self, parts: impl IntoIterator<Item = S>) -> Self {
        self.parts = Some(parts.into_iter().map(Into::into).collect());
        self
    }

    /// Set the compound delimiter
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Set the compound shuffle flag
    pub fn with_random(mut self, random: bool) -> Self {
        self.random = Some(random);
        self
    }

    /// State address: `<type>.<name>`
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.name)
    }

    /// Validate the declaration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.resource_type.is_empty() {
            return Err(crate::Error::config("Resource type cannot be empty"));
        }
        if self.name.is_empty() {
            return Err(crate::Error::config(format!(
                "Resource name cannot be empty (type {})",
                self.resource_type
            )));
        }
        if let Some(parts) = &self.parts {
            if parts.is_empty() {
                return Err(crate::Error::EmptyCategoryList);
            }
            Category::parse_all(parts)?;
        }
        Ok(())
    }

    /// Resolve the declaration into a snapshot for the given kind
    ///
    /// Compound defaults are filled in here, so the persisted snapshot holds
    /// the values that were actually used.
    pub fn to_spec(&self, kind: EntityKind) -> Result<EntitySpec, crate::Error> {
        match kind {
            EntityKind::Single(category) => {
                if self.parts.is_some() || self.delimiter.is_some() || self.random.is_some() {
                    return Err(crate::Error::invalid_input(format!(
                        "{}: 'parts', 'delimiter' and 'random' only apply to compound names",
                        self.address()
                    )));
                }
                Ok(EntitySpec::single(category, self.triggers.clone()))
            }
            EntityKind::Compound => {
                let categories = match &self.parts {
                    Some(parts) if parts.is_empty() => return Err(crate::Error::EmptyCategoryList),
                    Some(parts) => Category::parse_all(parts)?,
                    None => NameConfig::default().categories,
                };
                let config = NameConfig {
                    categories,
                    delimiter: self
                        .delimiter
                        .clone()
                        .unwrap_or_else(|| DEFAULT_DELIMITER.to_string()),
                    shuffle: self.random.unwrap_or(false),
                };
                Ok(EntitySpec::compound(config, self.triggers.clone()))
            }
        }
    }
}

/// A read-only keyed lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Category tag
    pub category: String,

    /// Lookup name, unique in the manifest
    pub name: String,

    /// Key for the selection
    #[serde(default)]
    pub triggers: TriggerMap,
}

impl LookupConfig {
    /// Create a lookup declaration
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            triggers: TriggerMap::new(),
        }
    }

    /// Set the triggers
    pub fn with_triggers(mut self, triggers: impl Into<TriggerMap>) -> Self {
        self.triggers = triggers.into();
        self
    }

    /// Validate the declaration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.name.is_empty() {
            return Err(crate::Error::config("Lookup name cannot be empty"));
        }
        self.category.parse::<Category>()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn manifest_parses_with_defaults() {
        let config = WhimsyConfig::from_json(
            r#"{
                "resources": [
                    { "type": "whimsy_plant", "name": "server", "triggers": { "env": "prod" } },
                    { "type": "whimsy_name", "name": "bucket", "categories": ["plant"], "shuffle": true }
                ],
                "lookups": [ { "category": "color", "name": "theme" } ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.state_store, StateStoreConfig::Memory);
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.resources[0].address(), "whimsy_plant.server");
        assert_eq!(config.resources[0].triggers.get("env"), Some("prod"));
        assert_eq!(config.resources[1].parts, Some(vec!["plant".to_string()]));
        assert_eq!(config.resources[1].random, Some(true));
        config.validate().unwrap();
    }

    #[test]
    fn file_store_needs_a_path() {
        let config = WhimsyConfig {
            state_store: StateStoreConfig::File {
                path: String::new(),
            },
            ..WhimsyConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn duplicate_addresses_are_rejected() {
        let config = WhimsyConfig::new()
            .with_resource(ResourceConfig::new("whimsy_plant", "a"))
            .with_resource(ResourceConfig::new("whimsy_plant", "a"));
        assert!(config.validate().is_err());

        // Same name under another type is a different address
        let config = WhimsyConfig::new()
            .with_resource(ResourceConfig::new("whimsy_plant", "a"))
            .with_resource(ResourceConfig::new("whimsy_color", "a"));
        config.validate().unwrap();
    }

    #[test]
    fn bad_parts_are_rejected() {
        let empty = ResourceConfig::new("whimsy_name", "a").with_parts(Vec::<String>::new());
        assert!(matches!(empty.validate(), Err(Error::EmptyCategoryList)));

        let bogus = ResourceConfig::new("whimsy_name", "a").with_parts(["plant", "bogus"]);
        assert!(matches!(bogus.validate(), Err(Error::UnknownCategory(_))));
    }

    #[test]
    fn compound_spec_fills_defaults() {
        let spec = ResourceConfig::new("whimsy_name", "a")
            .to_spec(EntityKind::Compound)
            .unwrap();
        assert_eq!(spec, EntitySpec::compound(NameConfig::default(), TriggerMap::new()));
    }

    #[test]
    fn single_spec_rejects_compound_fields() {
        let resource = ResourceConfig::new("whimsy_plant", "a").with_delimiter("_");
        let err = resource.to_spec(EntityKind::Single(Category::Plant)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn lookup_category_must_be_known() {
        assert!(LookupConfig::new("plant", "x").validate().is_ok());
        assert!(matches!(
            LookupConfig::new("mineral", "x").validate(),
            Err(Error::UnknownCategory(_))
        ));
    }
}
