//! Name generation entry points
//!
//! Free functions take category tags as plain strings and validate them;
//! [`CatalogSource`] is the [`NameSource`] the engine uses.

use crate::catalog::{Catalog, Category};
use crate::compound;
use crate::error::Result;
use crate::model::{NameConfig, TriggerMap};
use crate::selector;
use crate::traits::NameSource;

/// Keyed word for a category tag and trigger map
///
/// Used by read-only lookups: calling it twice with the same arguments gives
/// the same word.
pub fn generate_single(category: &str, triggers: &TriggerMap) -> Result<String> {
    let category: Category = category.parse()?;
    CatalogSource::builtin().generate_single(category, triggers)
}

/// Random word for a category tag
pub fn generate_single_random(category: &str) -> Result<String> {
    let category: Category = category.parse()?;
    CatalogSource::builtin().generate_single_random(category)
}

/// Random compound name from category tags
pub fn generate_compound<S: AsRef<str>>(
    categories: &[S],
    delimiter: &str,
    shuffle: bool,
) -> Result<String> {
    compound::build_from_tags(Catalog::global(), categories, delimiter, shuffle)
}

/// [`NameSource`] backed by a word catalog
#[derive(Debug, Clone, Copy)]
pub struct CatalogSource {
    catalog: &'static Catalog,
}

impl CatalogSource {
    /// Source over the built-in catalog
    pub fn builtin() -> Self {
        Self::new(Catalog::global())
    }

    /// Source over an explicit catalog
    pub fn new(catalog: &'static Catalog) -> Self {
        Self { catalog }
    }

    /// The catalog words are drawn from
    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self::builtin()
    }
}

impl NameSource for CatalogSource {
    fn generate_single(&self, category: Category, triggers: &TriggerMap) -> Result<String> {
        selector::select(self.catalog, category, triggers).map(str::to_string)
    }

    fn generate_single_random(&self, category: Category) -> Result<String> {
        self.catalog.pick_random(category).map(str::to_string)
    }

    fn generate_compound(&self, config: &NameConfig) -> Result<String> {
        compound::build_config(self.catalog, config)
    }

    fn source_name(&self) -> &'static str {
        "catalog"
    }
}
