//! Value types shared by the generators and the lifecycle
//!
//! Every type here compares by value over a canonical representation:
//! trigger maps are kept sorted by key, so map iteration order never affects
//! equality or seeding.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use crate::catalog::Category;

/// Default compound categories
pub const DEFAULT_CATEGORIES: [Category; 2] = [Category::Color, Category::Animal];

/// Default compound delimiter
pub const DEFAULT_DELIMITER: &str = "-";

/// Arbitrary string values that force regeneration when they change
///
/// An absent map and an empty map are the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerMap(BTreeMap<String, String>);

impl TriggerMap {
    /// Create an empty trigger map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a trigger, returning the previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a trigger value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of triggers
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no triggers
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over triggers in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Canonical serialization: `key=value;` for each trigger, keys ascending
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            // Writing to a String cannot fail
            let _ = write!(out, "{key}={value};");
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TriggerMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for TriggerMap {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<HashMap<String, String>> for TriggerMap {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Option<TriggerMap>> for TriggerMap {
    fn from(map: Option<TriggerMap>) -> Self {
        map.unwrap_or_default()
    }
}

/// Declared configuration for a compound name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameConfig {
    /// Categories in output order (before any shuffle)
    pub categories: Vec<Category>,
    /// Joins the words; not escaped
    pub delimiter: String,
    /// Randomize category order on each generation
    pub shuffle: bool,
}

impl NameConfig {
    /// Create a config with the default delimiter and no shuffle
    pub fn new(categories: impl Into<Vec<Category>>) -> Self {
        Self {
            categories: categories.into(),
            ..Self::default()
        }
    }

    /// Set the delimiter
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Enable or disable shuffling
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }
}

impl Default for NameConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.to_vec(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            shuffle: false,
        }
    }
}

/// Kind of generated entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "category", rename_all = "snake_case")]
pub enum EntityKind {
    /// One word from one category
    Single(Category),
    /// Several words joined by a delimiter
    Compound,
}

/// Snapshot of the inputs that produced a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntitySpec {
    /// Single-category entity
    Single {
        category: Category,
        #[serde(default)]
        triggers: TriggerMap,
    },
    /// Compound entity
    Compound {
        config: NameConfig,
        #[serde(default)]
        triggers: TriggerMap,
    },
}

impl EntitySpec {
    /// Single-category spec
    pub fn single(category: Category, triggers: impl Into<TriggerMap>) -> Self {
        Self::Single {
            category,
            triggers: triggers.into(),
        }
    }

    /// Compound spec
    pub fn compound(config: NameConfig, triggers: impl Into<TriggerMap>) -> Self {
        Self::Compound {
            config,
            triggers: triggers.into(),
        }
    }

    /// The entity kind this spec describes
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Single { category, .. } => EntityKind::Single(*category),
            Self::Compound { .. } => EntityKind::Compound,
        }
    }

    /// The trigger snapshot
    pub fn triggers(&self) -> &TriggerMap {
        match self {
            Self::Single { triggers, .. } | Self::Compound { triggers, .. } => triggers,
        }
    }
}

/// Persisted result of a generation
///
/// The id always equals the name; both are replaced together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedEntity {
    id: String,
    name: String,
    spec: EntitySpec,
}

impl GeneratedEntity {
    /// Create an entity for a freshly generated name
    pub fn new(name: impl Into<String>, spec: EntitySpec) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            spec,
        }
    }

    /// Identifier (equal to the name)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Generated name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot used to produce the name
    pub fn spec(&self) -> &EntitySpec {
        &self.spec
    }

    /// Entity kind
    pub fn kind(&self) -> EntityKind {
        self.spec.kind()
    }

    /// Keep the name, record a new snapshot
    pub(crate) fn with_spec(self, spec: EntitySpec) -> Self {
        Self { spec, ..self }
    }
}
