// # Name Source Trait
//
// Defines the interface the engine uses to produce names.
//
// ## Implementations
//
// - `CatalogSource`: draws from a word catalog (see `generate`)
// - Tests wrap it to count generation calls
//
// ## Usage
//
// ```rust
// use whimsy_core::catalog::Category;
// use whimsy_core::model::TriggerMap;
// use whimsy_core::{CatalogSource, NameSource};
//
// let source = CatalogSource::builtin();
// let triggers = TriggerMap::from([("env", "prod")]);
// let name = source.generate_single(Category::Plant, &triggers).unwrap();
// assert_eq!(name, source.generate_single(Category::Plant, &triggers).unwrap());
// ```

use crate::catalog::Category;
use crate::error::Result;
use crate::model::{NameConfig, TriggerMap};

/// Trait for name generators
///
/// A name source only generates. It never reads or writes state and never
/// decides whether a name should be regenerated; both belong to the engine
/// and the lifecycle.
///
/// # Thread Safety
///
/// Implementations must be usable from many tasks at once. Generating a name
/// for one entity must not affect names generated for another.
pub trait NameSource: Send + Sync {
    /// Keyed single word: the same `(category, triggers)` always gives the
    /// same word
    fn generate_single(&self, category: Category, triggers: &TriggerMap) -> Result<String>;

    /// Random single word from a cryptographically strong source
    fn generate_single_random(&self, category: Category) -> Result<String>;

    /// Random compound name
    ///
    /// # Errors
    ///
    /// - `EmptyCategoryList` if `config.categories` is empty
    /// - `EmptyWordSet` if a category has no words
    /// - `RandomSource` if the entropy source fails
    fn generate_compound(&self, config: &NameConfig) -> Result<String>;

    /// Source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
