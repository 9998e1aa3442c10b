//! Keyed word selection
//!
//! Maps `(category, triggers)` to a word that never changes for the same key:
//!
//! 1. Seed string = category tag followed by `key=value;` for every trigger,
//!    keys ascending.
//! 2. SHA-256 of the seed string; the first 8 bytes, big-endian, give a `u64`.
//! 3. That `u64` seeds a ChaCha8 generator, which draws one uniform index
//!    into the category's word set.

use sha2::{Digest, Sha256};

use crate::catalog::{Catalog, Category};
use crate::error::{Error, Result};
use crate::model::TriggerMap;
use crate::rng::{seeded_rng, uniform_index};

/// Seed string for a category and trigger map
pub fn seed_string(category: Category, triggers: &TriggerMap) -> String {
    let mut seed = String::from(category.tag());
    seed.push_str(&triggers.canonical());
    seed
}

/// 64-bit seed derived from a category and trigger map
pub fn seed(category: Category, triggers: &TriggerMap) -> u64 {
    let digest = Sha256::digest(seed_string(category, triggers).as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// Select a word for `(category, triggers)` from `catalog`
pub fn select(
    catalog: &Catalog,
    category: Category,
    triggers: &TriggerMap,
) -> Result<&'static str> {
    let words = catalog.words(category);
    if words.is_empty() {
        return Err(Error::empty_word_set(category.tag()));
    }

    let mut rng = seeded_rng(seed(category, triggers));
    let index = uniform_index(&mut rng, words.len());
    words
        .get(index)
        .ok_or_else(|| Error::empty_word_set(category.tag()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WordSet;

    #[test]
    fn seed_string_puts_category_first() {
        let triggers = TriggerMap::from([("region", "eu"), ("env", "prod")]);
        assert_eq!(seed_string(Category::Plant, &triggers), "plantenv=prod;region=eu;");
        assert_eq!(seed_string(Category::Color, &TriggerMap::new()), "color");
    }

    #[test]
    fn seed_is_the_big_endian_digest_prefix() {
        let digest = Sha256::digest(b"plant");
        let expected = u64::from_be_bytes(digest[..8].try_into().unwrap());
        assert_eq!(seed(Category::Plant, &TriggerMap::new()), expected);
    }

    #[test]
    fn same_key_same_word() {
        let catalog = Catalog::global();
        let triggers = TriggerMap::from([("env", "prod")]);
        for category in Category::ALL {
            let first = select(catalog, category, &triggers).unwrap();
            let second = select(catalog, category, &triggers).unwrap();
            assert_eq!(first, second);
            assert!(catalog.words(category).contains(first));
        }
    }

    #[test]
    fn insertion_order_does_not_change_the_word() {
        let catalog = Catalog::global();
        let mut forward = TriggerMap::new();
        forward.insert("a", "1");
        forward.insert("b", "2");
        let mut backward = TriggerMap::new();
        backward.insert("b", "2");
        backward.insert("a", "1");
        assert_eq!(
            select(catalog, Category::Animal, &forward).unwrap(),
            select(catalog, Category::Animal, &backward).unwrap()
        );
    }

    #[test]
    fn different_keys_spread_across_the_set() {
        let catalog = Catalog::global();
        let distinct: std::collections::HashSet<&str> = (0..200)
            .map(|i| {
                let triggers = TriggerMap::from([("build", i.to_string())]);
                select(catalog, Category::Plant, &triggers).unwrap()
            })
            .collect();
        assert!(distinct.len() > 50, "only {} distinct words", distinct.len());
    }

    #[test]
    fn empty_word_set_is_an_error() {
        let catalog = Catalog::new(
            WordSet::new(Category::Plant, &["fern"]),
            WordSet::new(Category::Animal, &[]),
            WordSet::new(Category::Color, &["red"]),
        );
        let err = select(&catalog, Category::Animal, &TriggerMap::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyWordSet(_)));
        assert_eq!(select(&catalog, Category::Plant, &TriggerMap::new()).unwrap(), "fern");
    }
}
