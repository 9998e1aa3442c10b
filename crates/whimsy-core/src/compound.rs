//! Compound name builder
//!
//! Draws one random word per category and joins the words with a delimiter.
//! Compound names are never keyed: every build is a fresh draw.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::{Catalog, Category};
use crate::error::{Error, Result};
use crate::model::NameConfig;
use crate::rng::secure_rng;

/// Build a compound name from category tags
///
/// Every tag is validated before any word is drawn.
pub fn build_from_tags<S: AsRef<str>>(
    catalog: &Catalog,
    tags: &[S],
    delimiter: &str,
    shuffle: bool,
) -> Result<String> {
    if tags.is_empty() {
        return Err(Error::EmptyCategoryList);
    }
    let categories = Category::parse_all(tags)?;
    build(catalog, &categories, delimiter, shuffle)
}

/// Build a compound name from a [`NameConfig`]
pub fn build_config(catalog: &Catalog, config: &NameConfig) -> Result<String> {
    build(catalog, &config.categories, &config.delimiter, config.shuffle)
}

/// Build a compound name using a cryptographically strong generator
pub fn build(
    catalog: &Catalog,
    categories: &[Category],
    delimiter: &str,
    shuffle: bool,
) -> Result<String> {
    let mut rng = secure_rng()?;
    build_with_rng(catalog, categories, delimiter, shuffle, &mut rng)
}

/// Build a compound name with a caller-supplied generator
///
/// The generator drives both the shuffle and the word draws.
pub fn build_with_rng<R: Rng + ?Sized>(
    catalog: &Catalog,
    categories: &[Category],
    delimiter: &str,
    shuffle: bool,
    rng: &mut R,
) -> Result<String> {
    if categories.is_empty() {
        return Err(Error::EmptyCategoryList);
    }

    let mut order = categories.to_vec();
    if shuffle {
        // Fisher-Yates
        order.shuffle(rng);
    }

    let words = order
        .iter()
        .map(|category| catalog.words(*category).choose(rng))
        .collect::<Result<Vec<_>>>()?;

    Ok(words.join(delimiter))
}
